// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kakao OAuth 2.0 authentication for Encore.
//!
//! This crate implements the Kakao authorization code flow used for member
//! login, registration, and account withdrawal.
//!
//! # OAuth Flow
//!
//! 1. **Authorization URL Generation**: the user is sent to Kakao's consent
//!    page and redirected back to the configured `redirect_uri` with an
//!    authorization `code`.
//!
//! 2. **Code Exchange**: [`KakaoOAuthClient::exchange_code`] trades the code
//!    for an access token at Kakao's token endpoint.
//!
//! 3. **Profile Fetch**: [`KakaoOAuthClient::fetch_profile`] reads the
//!    authenticated user's profile and decodes it into a [`KakaoProfile`],
//!    applying the Korean phone-number region rule.
//!
//! 4. **Unlink**: [`KakaoOAuthClient::unlink`] revokes the app link on
//!    withdrawal.
//!
//! # Security Considerations
//!
//! - The `client_secret` is wrapped in [`SecretString`] to prevent
//!   accidental logging, as are access tokens in [`KakaoTokenResponse`].
//! - All tracing instrumentation skips sensitive parameters.

mod profile;

pub use profile::{KakaoAccount, KakaoProfile, KakaoProperties, KakaoUserResponse};

use encore_common_secret::SecretString;
use encore_server_members::UnsupportedRegionError;
use serde::Deserialize;
use std::env;
use url::Url;

/// Default base URL for Kakao's authorization server (consent + token).
pub const KAKAO_AUTH_BASE_URL: &str = "https://kauth.kakao.com";
/// Default base URL for Kakao's API server (profile + unlink).
pub const KAKAO_API_BASE_URL: &str = "https://kapi.kakao.com";

const AUTHORIZE_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";
const PROFILE_PATH: &str = "/v2/user/me";
const UNLINK_PATH: &str = "/v1/user/unlink";

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Errors that can occur during OAuth operations.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
	/// The HTTP request to Kakao failed (network error, timeout, etc.).
	#[error("HTTP request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// Kakao responded with a non-success status.
	#[error("Kakao responded with status {status}")]
	Upstream {
		/// The upstream HTTP status code, preserved for the caller.
		status: u16,
	},

	/// A required field of the provider response was missing or malformed.
	#[error("failed to parse provider response field {field}")]
	Parse {
		/// JSON path of the offending field.
		field: String,
	},

	/// The profile's phone number is outside the supported region.
	#[error(transparent)]
	UnsupportedRegion(#[from] UnsupportedRegionError),
}

impl OAuthError {
	fn parse(field: impl Into<String>) -> Self {
		OAuthError::Parse {
			field: field.into(),
		}
	}
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Kakao OAuth client.
///
/// The `client_secret` is wrapped in [`SecretString`] to prevent accidental
/// logging or exposure. The base URLs default to Kakao's production servers
/// and exist as fields so tests can point the client at a local stub.
#[derive(Debug, Clone)]
pub struct KakaoOAuthConfig {
	/// The OAuth application client ID (Kakao REST API key).
	pub client_id: String,
	/// The OAuth application client secret (never logged).
	pub client_secret: SecretString,
	/// The callback URL where Kakao redirects after consent.
	pub redirect_uri: String,
	/// Authorization server base URL (consent + token endpoints).
	pub auth_base_url: String,
	/// API server base URL (profile + unlink endpoints).
	pub api_base_url: String,
}

impl KakaoOAuthConfig {
	/// Create a configuration against Kakao's production servers.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: SecretString,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret,
			redirect_uri: redirect_uri.into(),
			auth_base_url: KAKAO_AUTH_BASE_URL.to_string(),
			api_base_url: KAKAO_API_BASE_URL.to_string(),
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `ENCORE_SERVER_KAKAO_CLIENT_ID`
	/// - `ENCORE_SERVER_KAKAO_CLIENT_SECRET`
	/// - `ENCORE_SERVER_KAKAO_REDIRECT_URI`
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingEnvVar`] if any required variable is
	/// not set.
	pub fn from_env() -> Result<Self, ConfigError> {
		let client_id = env::var("ENCORE_SERVER_KAKAO_CLIENT_ID")
			.map_err(|_| ConfigError::MissingEnvVar("ENCORE_SERVER_KAKAO_CLIENT_ID".to_string()))?;

		let client_secret = env::var("ENCORE_SERVER_KAKAO_CLIENT_SECRET").map_err(|_| {
			ConfigError::MissingEnvVar("ENCORE_SERVER_KAKAO_CLIENT_SECRET".to_string())
		})?;

		let redirect_uri = env::var("ENCORE_SERVER_KAKAO_REDIRECT_URI").map_err(|_| {
			ConfigError::MissingEnvVar("ENCORE_SERVER_KAKAO_REDIRECT_URI".to_string())
		})?;

		Ok(Self::new(
			client_id,
			SecretString::new(client_secret),
			redirect_uri,
		))
	}

	/// Validate that all configuration fields are non-empty.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if any field is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"client_id cannot be empty".to_string(),
			));
		}
		if self.client_secret.expose().is_empty() {
			return Err(ConfigError::InvalidConfig(
				"client_secret cannot be empty".to_string(),
			));
		}
		if self.redirect_uri.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"redirect_uri cannot be empty".to_string(),
			));
		}
		Ok(())
	}
}

// =============================================================================
// Response types
// =============================================================================

/// Response from Kakao's token endpoint after exchanging an authorization
/// code.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoTokenResponse {
	/// The access token for API requests (wrapped to prevent logging).
	#[serde(deserialize_with = "deserialize_secret_string")]
	pub access_token: SecretString,
	/// The token type (always "bearer").
	pub token_type: Option<String>,
	/// Seconds until the access token expires.
	pub expires_in: Option<i64>,
}

fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let s = String::deserialize(deserializer)?;
	Ok(SecretString::new(s))
}

// =============================================================================
// Client
// =============================================================================

/// OAuth client for authenticating members via Kakao.
///
/// # Example
///
/// ```rust,no_run
/// use encore_server_auth_kakao::{KakaoOAuthClient, KakaoOAuthConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = KakaoOAuthConfig::from_env()?;
/// let client = KakaoOAuthClient::new(config);
///
/// let token = client.exchange_code("authorization-code-from-callback").await?;
/// let profile = client.fetch_profile(token.access_token.expose()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KakaoOAuthClient {
	config: KakaoOAuthConfig,
	http_client: reqwest::Client,
}

impl KakaoOAuthClient {
	/// Create a new Kakao OAuth client with the given configuration.
	///
	/// # Panics
	///
	/// Panics if the HTTP client cannot be built (should never happen in
	/// practice).
	#[tracing::instrument(skip_all, name = "KakaoOAuthClient::new")]
	pub fn new(config: KakaoOAuthConfig) -> Self {
		let http_client = encore_common_http::builder()
			.build()
			.expect("failed to build HTTP client");

		Self {
			config,
			http_client,
		}
	}

	/// Generate the Kakao consent URL for the OAuth flow.
	///
	/// # Arguments
	///
	/// - `state`: a random, unguessable string to prevent CSRF attacks,
	///   verified when the user is redirected back.
	#[tracing::instrument(skip(self), fields(client_id = %self.config.client_id))]
	pub fn authorization_url(&self, state: &str) -> String {
		let mut url = Url::parse(&self.config.auth_base_url).expect("invalid auth base URL");
		url.set_path(AUTHORIZE_PATH);

		url.query_pairs_mut()
			.append_pair("response_type", "code")
			.append_pair("client_id", &self.config.client_id)
			.append_pair("redirect_uri", &self.config.redirect_uri)
			.append_pair("state", state);

		url.to_string()
	}

	/// Exchange an authorization code for an access token.
	///
	/// # Errors
	///
	/// - [`OAuthError::HttpRequest`]: network error or timeout.
	/// - [`OAuthError::Upstream`]: Kakao rejected the code (expired,
	///   invalid, or a server-side failure); carries the status code.
	/// - [`OAuthError::Parse`]: unexpected response format.
	#[tracing::instrument(skip(self, code), name = "KakaoOAuthClient::exchange_code")]
	pub async fn exchange_code(&self, code: &str) -> Result<KakaoTokenResponse, OAuthError> {
		tracing::debug!("exchanging authorization code for access token");

		let response = self
			.http_client
			.post(format!("{}{}", self.config.auth_base_url, TOKEN_PATH))
			.form(&[
				("grant_type", "authorization_code"),
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.expose().as_str()),
				("redirect_uri", self.config.redirect_uri.as_str()),
				("code", code),
			])
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), "token exchange rejected");
			return Err(OAuthError::Upstream {
				status: status.as_u16(),
			});
		}

		let body = response.text().await?;
		serde_json::from_str(&body).map_err(|_| OAuthError::parse("access_token"))
	}

	/// Fetch the authenticated user's profile from Kakao.
	///
	/// Decodes the nested payload into a [`KakaoProfile`] with per-field
	/// validation, applying the `+82` region check and phone normalization.
	///
	/// # Errors
	///
	/// - [`OAuthError::HttpRequest`]: network error or timeout.
	/// - [`OAuthError::Upstream`]: token invalid or expired.
	/// - [`OAuthError::Parse`]: a required profile field was missing or
	///   malformed; carries the field path.
	/// - [`OAuthError::UnsupportedRegion`]: phone number outside `+82`.
	#[tracing::instrument(skip(self, access_token), name = "KakaoOAuthClient::fetch_profile")]
	pub async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, OAuthError> {
		tracing::debug!("fetching Kakao user profile");

		let response = self
			.http_client
			.get(format!("{}{}", self.config.api_base_url, PROFILE_PATH))
			.header("Authorization", format!("Bearer {access_token}"))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), "profile fetch rejected");
			return Err(OAuthError::Upstream {
				status: status.as_u16(),
			});
		}

		let body = response.text().await?;
		let raw: KakaoUserResponse =
			serde_json::from_str(&body).map_err(|_| OAuthError::parse("body"))?;
		KakaoProfile::from_response(raw)
	}

	/// Revoke the app link for the authenticated user.
	///
	/// Any 2xx status is success; everything else surfaces as
	/// [`OAuthError::Upstream`] with the upstream status preserved.
	#[tracing::instrument(skip(self, access_token), name = "KakaoOAuthClient::unlink")]
	pub async fn unlink(&self, access_token: &str) -> Result<(), OAuthError> {
		tracing::debug!("unlinking Kakao account");

		let response = self
			.http_client
			.post(format!("{}{}", self.config.api_base_url, UNLINK_PATH))
			.header("Authorization", format!("Bearer {access_token}"))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), "unlink rejected");
			return Err(OAuthError::Upstream {
				status: status.as_u16(),
			});
		}

		Ok(())
	}
}
