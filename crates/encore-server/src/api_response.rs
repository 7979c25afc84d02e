// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Common response bodies for HTTP handlers.

use serde::{Deserialize, Serialize};

/// Success body carrying a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
	pub message: String,
}

impl MessageResponse {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Error body with a stable machine code and a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn message_response_serializes_flat() {
		let body = MessageResponse::new("로그인 성공");
		let json = serde_json::to_string(&body).unwrap();
		assert_eq!(json, r#"{"message":"로그인 성공"}"#);
	}
}
