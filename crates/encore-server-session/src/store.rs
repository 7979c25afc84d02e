// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-side refresh-token storage.
//!
//! The authoritative copy lives in Redis with a TTL matching the token's
//! embedded expiry. The in-memory implementation backs tests and
//! single-instance deployments that run without Redis.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use deadpool_redis::Pool as RedisPool;
use tokio::sync::RwLock;

use crate::SessionError;

const KEY_PREFIX: &str = "refresh_token:";

/// Storage for the server-side copy of refresh tokens, keyed by member email.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
	/// Store a refresh token, replacing any previous one for this email.
	async fn put(&self, email: &str, token: &str, ttl: Duration) -> Result<(), SessionError>;

	/// Fetch the stored token, if present and unexpired.
	async fn get(&self, email: &str) -> Result<Option<String>, SessionError>;

	/// Drop the stored token. Removing an absent token is not an error.
	async fn remove(&self, email: &str) -> Result<(), SessionError>;
}

/// Create a deadpool Redis pool from a connection URL.
pub fn create_redis_pool(url: &str) -> Result<RedisPool, SessionError> {
	let cfg = deadpool_redis::Config::from_url(url);
	Ok(cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))?)
}

/// Redis-backed store for multi-instance deployments.
#[derive(Clone)]
pub struct RedisRefreshTokenStore {
	pool: RedisPool,
}

impl RedisRefreshTokenStore {
	pub fn new(pool: RedisPool) -> Self {
		Self { pool }
	}

	fn key(email: &str) -> String {
		format!("{KEY_PREFIX}{email}")
	}
}

#[async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
	#[tracing::instrument(skip(self, token))]
	async fn put(&self, email: &str, token: &str, ttl: Duration) -> Result<(), SessionError> {
		let mut conn = self.pool.get().await?;
		let _: () = redis::cmd("SET")
			.arg(Self::key(email))
			.arg(token)
			.arg("EX")
			.arg(ttl.as_secs())
			.query_async(&mut conn)
			.await?;
		tracing::debug!("refresh token stored");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn get(&self, email: &str) -> Result<Option<String>, SessionError> {
		let mut conn = self.pool.get().await?;
		let token: Option<String> = redis::cmd("GET")
			.arg(Self::key(email))
			.query_async(&mut conn)
			.await?;
		Ok(token)
	}

	#[tracing::instrument(skip(self))]
	async fn remove(&self, email: &str) -> Result<(), SessionError> {
		let mut conn = self.pool.get().await?;
		let _: () = redis::cmd("DEL")
			.arg(Self::key(email))
			.query_async(&mut conn)
			.await?;
		Ok(())
	}
}

/// In-memory store for tests and single-instance deployments.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
	entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl InMemoryRefreshTokenStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
	async fn put(&self, email: &str, token: &str, ttl: Duration) -> Result<(), SessionError> {
		let deadline = Instant::now() + ttl;
		self.entries
			.write()
			.await
			.insert(email.to_string(), (token.to_string(), deadline));
		Ok(())
	}

	async fn get(&self, email: &str) -> Result<Option<String>, SessionError> {
		let entries = self.entries.read().await;
		Ok(entries.get(email).and_then(|(token, deadline)| {
			if Instant::now() < *deadline {
				Some(token.clone())
			} else {
				None
			}
		}))
	}

	async fn remove(&self, email: &str) -> Result<(), SessionError> {
		self.entries.write().await.remove(email);
		Ok(())
	}
}
