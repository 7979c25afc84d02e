// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use encore_server_auth_kakao::{KakaoOAuthClient, KakaoOAuthConfig};
use encore_server_config::ServerConfig;
use encore_server_db::{MemberRepository, SeatRepository};
use encore_server_session::{
	store::create_redis_pool, InMemoryRefreshTokenStore, JwtIssuer, RedisRefreshTokenStore,
	RefreshTokenStore,
};
use sqlx::SqlitePool;

use crate::auth_flow::KakaoLoginService;
use crate::error::ServerError;
use crate::routes;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub members: Arc<MemberRepository>,
	pub seats: Arc<SeatRepository>,
	pub jwt: Option<Arc<JwtIssuer>>,
	pub kakao_login: Option<Arc<KakaoLoginService>>,
}

/// Build the application state from configuration.
///
/// Kakao login is only wired up when both the Kakao credentials and the JWT
/// signing secret are configured; otherwise the server runs with the member
/// and seat APIs only.
pub async fn create_app_state(
	pool: SqlitePool,
	config: &ServerConfig,
) -> Result<AppState, ServerError> {
	let members = Arc::new(MemberRepository::new(pool.clone()));
	let seats = Arc::new(SeatRepository::new(pool.clone()));

	let jwt = config
		.session
		.jwt_secret
		.as_ref()
		.map(|secret| {
			Arc::new(JwtIssuer::new(
				secret,
				config.session.access_ttl_secs,
				config.session.refresh_ttl_secs,
			))
		});

	let kakao_login = match (&config.kakao, &jwt) {
		(Some(kakao), Some(jwt)) => {
			let oauth_config = KakaoOAuthConfig::new(
				kakao.client_id.clone(),
				kakao.client_secret.clone(),
				kakao.redirect_uri.clone(),
			);
			let oauth = Arc::new(KakaoOAuthClient::new(oauth_config));

			let refresh_store: Arc<dyn RefreshTokenStore> = if config.redis.enabled {
				let redis_pool = create_redis_pool(&config.redis.url)?;
				tracing::info!(url = %config.redis.url, "using redis refresh-token store");
				Arc::new(RedisRefreshTokenStore::new(redis_pool))
			} else {
				tracing::info!("using in-memory refresh-token store");
				Arc::new(InMemoryRefreshTokenStore::new())
			};

			Some(Arc::new(KakaoLoginService::new(
				oauth,
				members.clone(),
				jwt.as_ref().clone(),
				refresh_store,
			)))
		}
		(Some(_), None) => {
			tracing::warn!(
				"kakao credentials configured but ENCORE_SERVER_SESSION_JWT_SECRET is not set; \
				 kakao login disabled"
			);
			None
		}
		_ => {
			tracing::info!("kakao login not configured");
			None
		}
	};

	Ok(AppState {
		pool,
		members,
		seats,
		jwt,
		kakao_login,
	})
}

/// Build the HTTP router.
pub fn create_router(state: AppState) -> Router {
	let mut router = Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/venues/{venue_id}/seats",
			get(routes::seats::list_venue_seats),
		);

	if state.kakao_login.is_some() {
		router = router
			.route(
				"/api/members/login/kakao",
				get(routes::members::login_kakao),
			)
			.route(
				"/api/members/withdraw/kakao",
				post(routes::members::withdraw_kakao),
			);
	}

	router.with_state(state)
}
