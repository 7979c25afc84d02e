// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HS256 JWT minting and verification.

use chrono::{Duration, Utc};
use encore_common_secret::SecretString;
use encore_server_members::Member;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Discriminates access from refresh tokens inside the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
	Access,
	Refresh,
}

impl std::fmt::Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TokenType::Access => write!(f, "access"),
			TokenType::Refresh => write!(f, "refresh"),
		}
	}
}

/// Claims carried by both token kinds. `sub` is the member's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	pub sub: String,
	pub token_type: TokenType,
	pub iat: i64,
	pub exp: i64,
}

/// The two tokens handed to a client after login.
#[derive(Debug, Clone)]
pub struct TokenPair {
	pub access_token: String,
	pub refresh_token: String,
}

/// Mints and verifies the server's session JWTs.
#[derive(Clone)]
pub struct JwtIssuer {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	access_ttl: Duration,
	refresh_ttl: Duration,
}

impl JwtIssuer {
	/// Create an issuer from the shared signing secret and token lifetimes.
	pub fn new(secret: &SecretString, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
		Self {
			encoding_key: EncodingKey::from_secret(secret.expose().as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.expose().as_bytes()),
			access_ttl: Duration::seconds(access_ttl_secs as i64),
			refresh_ttl: Duration::seconds(refresh_ttl_secs as i64),
		}
	}

	/// How long a refresh token lives, in seconds. The store TTL must match.
	pub fn refresh_ttl_secs(&self) -> u64 {
		self.refresh_ttl.num_seconds() as u64
	}

	/// Mint an access/refresh token pair for a member.
	#[tracing::instrument(skip(self, member), fields(member_id = %member.id))]
	pub fn issue(&self, member: &Member) -> Result<TokenPair, SessionError> {
		let now = Utc::now();
		let access_token = self.mint(&member.email, TokenType::Access, now, self.access_ttl)?;
		let refresh_token = self.mint(&member.email, TokenType::Refresh, now, self.refresh_ttl)?;
		Ok(TokenPair {
			access_token,
			refresh_token,
		})
	}

	/// Verify an access token and return its claims.
	///
	/// # Errors
	/// Returns `SessionError::Jwt` for bad signatures or expired tokens and
	/// `SessionError::WrongTokenType` when handed a refresh token.
	pub fn decode_access(&self, token: &str) -> Result<Claims, SessionError> {
		self.decode_expecting(token, TokenType::Access)
	}

	/// Verify a refresh token and return its claims.
	pub fn decode_refresh(&self, token: &str) -> Result<Claims, SessionError> {
		self.decode_expecting(token, TokenType::Refresh)
	}

	fn mint(
		&self,
		email: &str,
		token_type: TokenType,
		now: chrono::DateTime<Utc>,
		ttl: Duration,
	) -> Result<String, SessionError> {
		let claims = Claims {
			sub: email.to_string(),
			token_type,
			iat: now.timestamp(),
			exp: (now + ttl).timestamp(),
		};
		Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
	}

	fn decode_expecting(
		&self,
		token: &str,
		expected: TokenType,
	) -> Result<Claims, SessionError> {
		let mut validation = Validation::default();
		validation.leeway = 0;
		let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
		if data.claims.token_type != expected {
			return Err(SessionError::WrongTokenType {
				expected,
				got: data.claims.token_type,
			});
		}
		Ok(data.claims)
	}
}
