// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Member authentication HTTP handlers.

use axum::{
	extract::{Query, State},
	response::IntoResponse,
	Json,
};
use encore_server_session::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use serde::Deserialize;

use crate::api::AppState;
use crate::api_response::MessageResponse;
use crate::error::ServerError;
use crate::extract::AuthMember;

pub const LOGIN_SUCCESS_MESSAGE: &str = "로그인 성공";
pub const WITHDRAW_SUCCESS_MESSAGE: &str = "카카오 탈퇴 성공";

#[derive(Debug, Deserialize)]
pub struct KakaoCallbackParams {
	pub code: String,
}

/// GET /api/members/login/kakao - Kakao OAuth callback.
///
/// Logs the member in (registering them on first visit) and returns the
/// session tokens in the `Access-Token` and `Refresh-Token` response
/// headers.
pub async fn login_kakao(
	State(state): State<AppState>,
	Query(params): Query<KakaoCallbackParams>,
) -> Result<impl IntoResponse, ServerError> {
	let service = state
		.kakao_login
		.as_ref()
		.ok_or_else(|| ServerError::Internal("kakao login not configured".to_string()))?;

	let (_member, pair) = service.login(&params.code).await?;

	Ok((
		[
			(ACCESS_TOKEN_HEADER, pair.access_token),
			(REFRESH_TOKEN_HEADER, pair.refresh_token),
		],
		Json(MessageResponse::new(LOGIN_SUCCESS_MESSAGE)),
	))
}

/// POST /api/members/withdraw/kakao - sever the caller's Kakao link.
///
/// Requires a bearer access token; the `code` query parameter is a fresh
/// Kakao authorization code proving account control.
pub async fn withdraw_kakao(
	State(state): State<AppState>,
	AuthMember(member): AuthMember,
	Query(params): Query<KakaoCallbackParams>,
) -> Result<impl IntoResponse, ServerError> {
	let service = state
		.kakao_login
		.as_ref()
		.ok_or_else(|| ServerError::Internal("kakao login not configured".to_string()))?;

	service.withdraw(&params.code, &member).await?;

	Ok(Json(MessageResponse::new(WITHDRAW_SUCCESS_MESSAGE)))
}
