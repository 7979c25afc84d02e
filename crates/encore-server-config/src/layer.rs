// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration accumulated while merging sources.

use serde::Deserialize;

use crate::sections::{
	DatabaseConfigLayer, HttpConfigLayer, KakaoConfigLayer, LoggingConfigLayer, RedisConfigLayer,
	SessionConfigLayer,
};

/// Partial server configuration; every section is optional so that sources
/// only set what they know about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub redis: Option<RedisConfigLayer>,
	#[serde(default)]
	pub kakao: Option<KakaoConfigLayer>,
	#[serde(default)]
	pub session: Option<SessionConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge a higher-precedence layer into this one.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.redis, other.redis, RedisConfigLayer::merge);
		merge_section(&mut self.kakao, other.kakao, KakaoConfigLayer::merge);
		merge_section(&mut self.session, other.session, SessionConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl Fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(b), Some(o)) => merge(b, o),
		(None, Some(o)) => *base = Some(o),
		_ => {}
	}
}
