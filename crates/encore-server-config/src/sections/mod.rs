// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-section configuration types.
//!
//! Each section has a resolved runtime struct and a partial `*Layer` struct
//! used while merging sources.

mod database;
mod http;
mod kakao;
mod logging;
mod redis;
mod session;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use kakao::{KakaoConfig, KakaoConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use redis::{RedisConfig, RedisConfigLayer};
pub use session::{
	SessionConfig, SessionConfigLayer, DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS,
};
