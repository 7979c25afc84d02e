// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session management for the Encore server.
//!
//! A successful login yields a [`TokenPair`]: a short-lived access JWT and a
//! longer-lived refresh JWT. The refresh token is additionally written to the
//! [`RefreshTokenStore`] keyed by member email, so it can be revoked server
//! side before its embedded expiry.

pub mod jwt;
pub mod store;

pub use jwt::{Claims, JwtIssuer, TokenPair, TokenType};
pub use store::{InMemoryRefreshTokenStore, RedisRefreshTokenStore, RefreshTokenStore};

/// Response header carrying the access token after login.
pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";

/// Response header carrying the refresh token after login.
pub const REFRESH_TOKEN_HEADER: &str = "Refresh-Token";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	#[error("JWT error: {0}")]
	Jwt(#[from] jsonwebtoken::errors::Error),

	#[error("wrong token type: expected {expected}, got {got}")]
	WrongTokenType { expected: TokenType, got: TokenType },

	#[error("Redis error: {0}")]
	Redis(#[from] redis::RedisError),

	#[error("Redis pool error: {0}")]
	Pool(#[from] deadpool_redis::PoolError),

	#[error("Redis pool creation error: {0}")]
	CreatePool(#[from] deadpool_redis::CreatePoolError),
}
