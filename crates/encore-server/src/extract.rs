// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use encore_server_members::Member;

use crate::api::AppState;
use crate::error::ServerError;

/// The member authenticated by the request's bearer access token.
///
/// Rejects with 401 when the header is missing, the token is invalid or
/// expired, a refresh token is presented in place of an access token, or
/// the subject no longer exists.
pub struct AuthMember(pub Member);

impl FromRequestParts<AppState> for AuthMember {
	type Rejection = ServerError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let jwt = state
			.jwt
			.as_ref()
			.ok_or_else(|| ServerError::Unauthorized("sessions not configured".to_string()))?;

		let token = parts
			.headers
			.get(header::AUTHORIZATION)
			.and_then(|v| v.to_str().ok())
			.and_then(|v| v.strip_prefix("Bearer "))
			.ok_or_else(|| ServerError::Unauthorized("missing bearer token".to_string()))?;

		let claims = jwt
			.decode_access(token)
			.map_err(|e| ServerError::Unauthorized(format!("invalid access token: {e}")))?;

		let member = state
			.members
			.find_by_email(&claims.sub)
			.await?
			.ok_or_else(|| ServerError::Unauthorized("unknown member".to_string()))?;

		Ok(AuthMember(member))
	}
}
