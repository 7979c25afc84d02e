// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kakao OAuth app credentials.
//!
//! The section is optional: a server without Kakao credentials simply does
//! not mount the Kakao login routes.

use encore_common_secret::SecretString;
use serde::Deserialize;

/// Kakao OAuth configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct KakaoConfig {
	pub client_id: String,
	pub client_secret: SecretString,
	pub redirect_uri: String,
}

/// Kakao OAuth configuration layer (partial, for merging).
///
/// The client secret is env-only; a `client_secret` key in a TOML file is
/// ignored rather than read into the layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoConfigLayer {
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(skip)]
	pub client_secret: Option<SecretString>,
	#[serde(default)]
	pub redirect_uri: Option<String>,
}

impl KakaoConfigLayer {
	pub fn merge(&mut self, other: KakaoConfigLayer) {
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.redirect_uri.is_some() {
			self.redirect_uri = other.redirect_uri;
		}
	}

	/// Resolve to a config only when all three fields are present.
	pub fn finalize(self) -> Option<KakaoConfig> {
		Some(KakaoConfig {
			client_id: self.client_id?,
			client_secret: self.client_secret?,
			redirect_uri: self.redirect_uri?,
		})
	}
}
