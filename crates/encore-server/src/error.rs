// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error type and HTTP status mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};
use encore_server_auth_kakao::OAuthError;
use encore_server_db::DbError;
use encore_server_session::SessionError;

use crate::api_response::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("OAuth error: {0}")]
	OAuth(#[from] OAuthError),

	#[error("Database error: {0}")]
	Db(#[from] DbError),

	#[error("Session error: {0}")]
	Session(#[from] SessionError),

	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Bad request: {0}")]
	BadRequest(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl ServerError {
	/// HTTP status for this error.
	///
	/// Provider-side failures surface as 502 so callers can tell them apart
	/// from our own validation (400) and persistence (404/409) failures.
	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::OAuth(OAuthError::Upstream { .. })
			| ServerError::OAuth(OAuthError::HttpRequest(_)) => StatusCode::BAD_GATEWAY,
			ServerError::OAuth(OAuthError::Parse { .. })
			| ServerError::OAuth(OAuthError::UnsupportedRegion(_))
			| ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ServerError::Db(DbError::NotFound(_)) | ServerError::NotFound(_) => {
				StatusCode::NOT_FOUND
			}
			ServerError::Db(DbError::Conflict(_)) => StatusCode::CONFLICT,
			ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
			ServerError::Db(_) | ServerError::Session(_) | ServerError::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self.status() {
			StatusCode::BAD_GATEWAY => "upstream_error",
			StatusCode::BAD_REQUEST => "bad_request",
			StatusCode::NOT_FOUND => "not_found",
			StatusCode::CONFLICT => "conflict",
			StatusCode::UNAUTHORIZED => "unauthorized",
			_ => "internal_error",
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, status = %status, "request rejected");
		}
		let body = ErrorResponse {
			error: self.code().to_string(),
			message: self.to_string(),
		};
		(status, Json(body)).into_response()
	}
}
