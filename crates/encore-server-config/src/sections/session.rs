// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session token configuration.

use encore_common_secret::SecretString;
use serde::Deserialize;

/// Access tokens last an hour.
pub const DEFAULT_ACCESS_TTL_SECS: u64 = 3_600;

/// Refresh tokens last seven days, matching the store-side TTL.
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 604_800;

/// Session configuration (runtime, fully resolved).
///
/// `jwt_secret` comes from the environment only, never from the TOML file.
#[derive(Debug, Clone)]
pub struct SessionConfig {
	pub jwt_secret: Option<SecretString>,
	pub access_ttl_secs: u64,
	pub refresh_ttl_secs: u64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			jwt_secret: None,
			access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
			refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
		}
	}
}

/// Session configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfigLayer {
	#[serde(default)]
	pub access_ttl_secs: Option<u64>,
	#[serde(default)]
	pub refresh_ttl_secs: Option<u64>,
}

impl SessionConfigLayer {
	pub fn merge(&mut self, other: SessionConfigLayer) {
		if other.access_ttl_secs.is_some() {
			self.access_ttl_secs = other.access_ttl_secs;
		}
		if other.refresh_ttl_secs.is_some() {
			self.refresh_ttl_secs = other.refresh_ttl_secs;
		}
	}

	pub fn finalize(self, jwt_secret: Option<SecretString>) -> SessionConfig {
		SessionConfig {
			jwt_secret,
			access_ttl_secs: self.access_ttl_secs.unwrap_or(DEFAULT_ACCESS_TTL_SECS),
			refresh_ttl_secs: self.refresh_ttl_secs.unwrap_or(DEFAULT_REFRESH_TTL_SECS),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_ttls() {
		let config = SessionConfigLayer::default().finalize(None);
		assert_eq!(config.access_ttl_secs, 3_600);
		assert_eq!(config.refresh_ttl_secs, 604_800);
	}

	#[test]
	fn test_custom_ttls() {
		let layer = SessionConfigLayer {
			access_ttl_secs: Some(60),
			refresh_ttl_secs: Some(120),
		};
		let config = layer.finalize(Some(SecretString::from("s")));
		assert_eq!(config.access_ttl_secs, 60);
		assert_eq!(config.refresh_ttl_secs, 120);
		assert!(config.jwt_secret.is_some());
	}
}
