// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kakao login and withdrawal orchestration.
//!
//! `login` turns an authorization code into a signed-in member: exchange the
//! code, fetch the profile, find or register the member by email, mint a
//! token pair, and store the refresh token server side. `withdraw` severs
//! the Kakao link upstream and records the fact with a bare `updated_at`
//! bump; the member row is otherwise left alone.

use std::sync::Arc;
use std::time::Duration;

use encore_server_auth_kakao::KakaoOAuthClient;
use encore_server_db::MemberStore;
use encore_server_members::Member;
use encore_server_session::{JwtIssuer, RefreshTokenStore, TokenPair};

use crate::error::ServerError;

/// Orchestrates the Kakao login and withdrawal flows.
///
/// The member directory is consumed through the [`MemberStore`] seam, like
/// the refresh-token store, so tests can substitute either side.
#[derive(Clone)]
pub struct KakaoLoginService {
	oauth: Arc<KakaoOAuthClient>,
	members: Arc<dyn MemberStore>,
	jwt: JwtIssuer,
	refresh_store: Arc<dyn RefreshTokenStore>,
}

impl KakaoLoginService {
	pub fn new(
		oauth: Arc<KakaoOAuthClient>,
		members: Arc<dyn MemberStore>,
		jwt: JwtIssuer,
		refresh_store: Arc<dyn RefreshTokenStore>,
	) -> Self {
		Self {
			oauth,
			members,
			jwt,
			refresh_store,
		}
	}

	/// Log a member in with a Kakao authorization code.
	///
	/// First-time visitors are registered from their provider profile;
	/// returning visitors are matched by email, and a member who originally
	/// signed up locally gets the `kakao_linked` flag set on first Kakao
	/// login. A returning Kakao member causes no writes at all.
	///
	/// The provider is consulted before the member directory is touched, so
	/// an upstream failure never leaves a partial registration behind.
	#[tracing::instrument(skip_all)]
	pub async fn login(&self, code: &str) -> Result<(Member, TokenPair), ServerError> {
		let token = self.oauth.exchange_code(code).await?;
		let profile = self.oauth.fetch_profile(token.access_token.expose()).await?;

		let member = match self.members.find_by_email(&profile.email).await? {
			Some(existing) => {
				if existing.kakao_linked {
					existing
				} else {
					self.members.mark_kakao_linked(&existing.id).await?;
					Member {
						kakao_linked: true,
						..existing
					}
				}
			}
			None => {
				let member = Member::from_provider_profile(
					profile.email,
					profile.name,
					profile.gender,
					profile.birth_date,
					profile.phone_number,
				);
				self.members.create(&member).await?;
				tracing::info!(member_id = %member.id, "member registered via kakao");
				member
			}
		};

		let pair = self.jwt.issue(&member)?;
		self.refresh_store
			.put(
				&member.email,
				&pair.refresh_token,
				Duration::from_secs(self.jwt.refresh_ttl_secs()),
			)
			.await?;

		tracing::debug!(member_id = %member.id, "login complete");
		Ok((member, pair))
	}

	/// Sever the member's Kakao link.
	///
	/// The fresh authorization code proves the caller still controls the
	/// Kakao account. Nothing is written until the provider confirms the
	/// unlink; afterwards only `updated_at` changes.
	#[tracing::instrument(skip_all, fields(member_id = %member.id))]
	pub async fn withdraw(&self, code: &str, member: &Member) -> Result<(), ServerError> {
		let token = self.oauth.exchange_code(code).await?;
		self.oauth.unlink(token.access_token.expose()).await?;

		self.members.touch_updated_at(&member.id).await?;
		tracing::info!(member_id = %member.id, "kakao withdrawal complete");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use encore_common_secret::SecretString;
	use encore_server_auth_kakao::{KakaoOAuthConfig, OAuthError};
	use encore_server_db::{testing::create_member_test_pool, DbError, MemberRepository};
	use encore_server_members::{Gender, MemberId};
	use encore_server_session::InMemoryRefreshTokenStore;
	use serde_json::json;
	use wiremock::matchers::{bearer_token, body_string_contains, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	struct Harness {
		service: KakaoLoginService,
		members: MemberRepository,
		store: Arc<InMemoryRefreshTokenStore>,
		jwt: JwtIssuer,
	}

	async fn harness(auth_server: &MockServer, api_server: &MockServer) -> Harness {
		let mut config = KakaoOAuthConfig::new(
			"rest-api-key",
			SecretString::from("client-secret"),
			"http://localhost:8087/api/members/login/kakao",
		);
		config.auth_base_url = auth_server.uri();
		config.api_base_url = api_server.uri();

		let members = MemberRepository::new(create_member_test_pool().await);
		let jwt = JwtIssuer::new(&SecretString::from("test-jwt-secret"), 3600, 604_800);
		let store = Arc::new(InMemoryRefreshTokenStore::new());

		Harness {
			service: KakaoLoginService::new(
				Arc::new(KakaoOAuthClient::new(config)),
				Arc::new(members.clone()),
				jwt.clone(),
				store.clone(),
			),
			members,
			store,
			jwt,
		}
	}

	async fn mount_token_success(auth_server: &MockServer) {
		Mock::given(method("POST"))
			.and(path("/oauth/token"))
			.and(body_string_contains("grant_type=authorization_code"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"access_token": "kakao-access-token",
				"token_type": "bearer",
				"expires_in": 21599
			})))
			.mount(auth_server)
			.await;
	}

	async fn mount_profile(api_server: &MockServer, email: &str, phone: &str) {
		Mock::given(method("GET"))
			.and(path("/v2/user/me"))
			.and(bearer_token("kakao-access-token"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"id": 1069,
				"properties": { "nickname": "Jiyeon" },
				"kakao_account": {
					"email": email,
					"gender": "female",
					"birthyear": "1995",
					"birthday": "0314",
					"phone_number": phone
				}
			})))
			.mount(api_server)
			.await;
	}

	#[tokio::test]
	async fn first_login_registers_a_member() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "new@x.com", "+82 1012345678").await;

		let h = harness(&auth_server, &api_server).await;
		let (member, pair) = h.service.login("auth-code").await.unwrap();

		assert_eq!(member.email, "new@x.com");
		assert_eq!(member.name, "Jiyeon");
		assert_eq!(member.gender, Gender::Female);
		assert_eq!(
			member.birth_date,
			NaiveDate::from_ymd_opt(1995, 3, 14).unwrap()
		);
		assert_eq!(member.phone_number, "01012345678");
		assert!(member.kakao_linked);

		// persisted
		let stored = h.members.find_by_email("new@x.com").await.unwrap().unwrap();
		assert_eq!(stored.id, member.id);

		// session minted and refresh token stored server side
		let claims = h.jwt.decode_access(&pair.access_token).unwrap();
		assert_eq!(claims.sub, "new@x.com");
		assert_eq!(
			h.store.get("new@x.com").await.unwrap(),
			Some(pair.refresh_token.clone())
		);
	}

	#[tokio::test]
	async fn local_member_gets_linked_on_first_kakao_login() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "local@x.com", "+82 1012345678").await;

		let h = harness(&auth_server, &api_server).await;
		let mut existing = Member::from_provider_profile(
			"local@x.com",
			"Existing Name",
			Gender::Male,
			NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
			"01099998888",
		);
		existing.kakao_linked = false;
		h.members.create(&existing).await.unwrap();

		let (member, _pair) = h.service.login("auth-code").await.unwrap();

		// matched by email, not re-registered; profile fields untouched
		assert_eq!(member.id, existing.id);
		assert!(member.kakao_linked);
		let stored = h
			.members
			.find_by_email("local@x.com")
			.await
			.unwrap()
			.unwrap();
		assert!(stored.kakao_linked);
		assert_eq!(stored.name, "Existing Name");
		assert_eq!(stored.phone_number, "01099998888");
	}

	#[tokio::test]
	async fn returning_kakao_member_causes_no_writes() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "back@x.com", "+82 1012345678").await;

		let h = harness(&auth_server, &api_server).await;
		let (first, _) = h.service.login("auth-code").await.unwrap();
		let before = h.members.find_by_email("back@x.com").await.unwrap().unwrap();

		let (second, _) = h.service.login("auth-code").await.unwrap();
		let after = h.members.find_by_email("back@x.com").await.unwrap().unwrap();

		assert_eq!(first.id, second.id);
		assert_eq!(before.updated_at, after.updated_at);
	}

	#[tokio::test]
	async fn failed_token_exchange_registers_nobody() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/oauth/token"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&auth_server)
			.await;

		let h = harness(&auth_server, &api_server).await;
		let err = h.service.login("bad-code").await.unwrap_err();

		assert!(matches!(
			err,
			ServerError::OAuth(OAuthError::Upstream { status: 500 })
		));
		assert!(h.store.get("new@x.com").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn foreign_phone_region_registers_nobody() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "jp@x.com", "+81 9012345678").await;

		let h = harness(&auth_server, &api_server).await;
		let err = h.service.login("auth-code").await.unwrap_err();

		assert!(matches!(
			err,
			ServerError::OAuth(OAuthError::UnsupportedRegion(_))
		));
		assert!(h.members.find_by_email("jp@x.com").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn withdraw_touches_only_updated_at() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		Mock::given(method("POST"))
			.and(path("/v1/user/unlink"))
			.and(bearer_token("kakao-access-token"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1069 })))
			.mount(&api_server)
			.await;

		let h = harness(&auth_server, &api_server).await;
		let member = Member::from_provider_profile(
			"gone@x.com",
			"G",
			Gender::Male,
			NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
			"01012345678",
		);
		h.members.create(&member).await.unwrap();
		let before = h.members.find_by_email("gone@x.com").await.unwrap().unwrap();

		tokio::time::sleep(std::time::Duration::from_millis(5)).await;
		h.service.withdraw("auth-code", &member).await.unwrap();

		let after = h.members.find_by_email("gone@x.com").await.unwrap().unwrap();
		assert!(after.updated_at > before.updated_at);
		assert_eq!(after.email, before.email);
		assert_eq!(after.kakao_linked, before.kakao_linked);
		assert_eq!(after.password, before.password);
	}

	#[tokio::test]
	async fn rejected_unlink_mutates_nothing() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		Mock::given(method("POST"))
			.and(path("/v1/user/unlink"))
			.respond_with(ResponseTemplate::new(403))
			.mount(&api_server)
			.await;

		let h = harness(&auth_server, &api_server).await;
		let member = Member::from_provider_profile(
			"stay@x.com",
			"S",
			Gender::Female,
			NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
			"01012345678",
		);
		h.members.create(&member).await.unwrap();
		let before = h.members.find_by_email("stay@x.com").await.unwrap().unwrap();

		let err = h.service.withdraw("auth-code", &member).await.unwrap_err();
		assert!(matches!(
			err,
			ServerError::OAuth(OAuthError::Upstream { status: 403 })
		));

		let after = h.members.find_by_email("stay@x.com").await.unwrap().unwrap();
		assert_eq!(after.updated_at, before.updated_at);
	}

	/// Member store whose insert always loses the registration race.
	struct LostRaceStore;

	#[async_trait::async_trait]
	impl MemberStore for LostRaceStore {
		async fn find_by_email(&self, _email: &str) -> Result<Option<Member>, DbError> {
			Ok(None)
		}

		async fn create(&self, _member: &Member) -> Result<(), DbError> {
			Err(DbError::Conflict(
				"member with email already exists".to_string(),
			))
		}

		async fn mark_kakao_linked(&self, _id: &MemberId) -> Result<(), DbError> {
			Ok(())
		}

		async fn touch_updated_at(&self, _id: &MemberId) -> Result<(), DbError> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn lost_registration_race_surfaces_through_login() {
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "race@x.com", "+82 1012345678").await;

		let mut config = KakaoOAuthConfig::new(
			"rest-api-key",
			SecretString::from("client-secret"),
			"http://localhost:8087/api/members/login/kakao",
		);
		config.auth_base_url = auth_server.uri();
		config.api_base_url = api_server.uri();

		let service = KakaoLoginService::new(
			Arc::new(KakaoOAuthClient::new(config)),
			Arc::new(LostRaceStore),
			JwtIssuer::new(&SecretString::from("test-jwt-secret"), 3600, 604_800),
			Arc::new(InMemoryRefreshTokenStore::new()),
		);

		let err = service.login("auth-code").await.unwrap_err();
		assert!(matches!(err, ServerError::Db(DbError::Conflict(_))));
	}

	#[tokio::test]
	async fn concurrent_registration_conflict_surfaces_as_db_error() {
		// Two services racing on the same email: the second insert hits the
		// UNIQUE constraint rather than silently duplicating the member.
		let auth_server = MockServer::start().await;
		let api_server = MockServer::start().await;
		mount_token_success(&auth_server).await;
		mount_profile(&api_server, "race@x.com", "+82 1012345678").await;

		let h = harness(&auth_server, &api_server).await;
		h.service.login("auth-code").await.unwrap();

		// Simulate the race by inserting a doppelganger directly.
		let dupe = Member::from_provider_profile(
			"race@x.com",
			"R",
			Gender::Male,
			NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
			"01012345678",
		);
		let err = h.members.create(&dupe).await.unwrap_err();
		assert!(matches!(err, DbError::Conflict(_)));
	}
}
