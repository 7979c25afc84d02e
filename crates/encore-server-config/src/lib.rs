// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Encore server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`ENCORE_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use encore_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use encore_common_secret::load_secret_env;
use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub redis: RedisConfig,
	pub kakao: Option<KakaoConfig>,
	pub session: SessionConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`ENCORE_SERVER_*`)
/// 2. Config file (`/etc/encore/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let redis = layer.redis.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	let kakao = layer.kakao.and_then(|l| l.finalize());

	let jwt_secret = load_secret_env("ENCORE_SERVER_SESSION_JWT_SECRET")
		.map_err(|e| ConfigError::Secret(e.to_string()))?;
	let session = layer.session.unwrap_or_default().finalize(jwt_secret);

	validate_config(&session)?;

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		redis_enabled = redis.enabled,
		kakao_configured = kakao.is_some(),
		jwt_secret_configured = session.jwt_secret.is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		redis,
		kakao,
		session,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(session: &SessionConfig) -> Result<(), ConfigError> {
	if session.access_ttl_secs == 0 || session.refresh_ttl_secs == 0 {
		return Err(ConfigError::Validation(
			"session token TTLs must be positive".to_string(),
		));
	}
	if session.access_ttl_secs >= session.refresh_ttl_secs {
		return Err(ConfigError::Validation(format!(
			"access token TTL ({}) must be shorter than refresh token TTL ({})",
			session.access_ttl_secs, session.refresh_ttl_secs
		)));
	}
	Ok(())
}
