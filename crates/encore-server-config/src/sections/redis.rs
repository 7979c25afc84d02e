// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redis configuration for the refresh-token store.
//!
//! When disabled the server falls back to the in-memory store, which is
//! fine for single-instance deployments.

use serde::Deserialize;

/// Redis configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct RedisConfig {
	pub enabled: bool,
	pub url: String,
}

impl Default for RedisConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			url: "redis://127.0.0.1:6379".to_string(),
		}
	}
}

/// Redis configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub url: Option<String>,
}

impl RedisConfigLayer {
	pub fn merge(&mut self, other: RedisConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.url.is_some() {
			self.url = other.url;
		}
	}

	pub fn finalize(self) -> RedisConfig {
		let defaults = RedisConfig::default();
		RedisConfig {
			enabled: self.enabled.unwrap_or(defaults.enabled),
			url: self.url.unwrap_or(defaults.url),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_disabled_by_default() {
		let config = RedisConfigLayer::default().finalize();
		assert!(!config.enabled);
		assert_eq!(config.url, "redis://127.0.0.1:6379");
	}
}
