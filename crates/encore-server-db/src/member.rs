// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Member repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use encore_server_members::{Gender, Member, MemberId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait MemberStore: Send + Sync {
	async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DbError>;
	async fn create(&self, member: &Member) -> Result<(), DbError>;
	async fn mark_kakao_linked(&self, id: &MemberId) -> Result<(), DbError>;
	async fn touch_updated_at(&self, id: &MemberId) -> Result<(), DbError>;
}

/// Repository for member database operations.
///
/// All IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct MemberRepository {
	pool: SqlitePool,
}

impl MemberRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Look up a member by email.
	///
	/// # Returns
	/// `None` if no member exists with this email.
	#[tracing::instrument(skip(self, email))]
	pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, email, name, gender, birth_date, phone_number, password,
			       kakao_linked, created_at, updated_at
			FROM members
			WHERE email = ?
			"#,
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| self.row_to_member(&r)).transpose()
	}

	/// Insert a new member.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if a member with the same email already
	/// exists, `DbError::Sqlx` for any other database failure.
	#[tracing::instrument(skip(self, member), fields(member_id = %member.id))]
	pub async fn create(&self, member: &Member) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO members (id, email, name, gender, birth_date, phone_number,
			                     password, kakao_linked, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(member.id.to_string())
		.bind(&member.email)
		.bind(&member.name)
		.bind(member.gender.to_string())
		.bind(member.birth_date.format("%Y-%m-%d").to_string())
		.bind(&member.phone_number)
		.bind(&member.password)
		.bind(member.kakao_linked as i32)
		.bind(member.created_at.to_rfc3339())
		.bind(member.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!(member_id = %member.id, "member created");
				Ok(())
			}
			Err(e) if is_unique_violation(&e) => Err(DbError::Conflict(format!(
				"member with email already exists: {e}"
			))),
			Err(e) => Err(e.into()),
		}
	}

	/// Record that a member has linked their Kakao account.
	///
	/// The flag is sticky; withdrawal never clears it. Also bumps
	/// `updated_at`.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if no member exists with this ID.
	#[tracing::instrument(skip(self), fields(member_id = %id))]
	pub async fn mark_kakao_linked(&self, id: &MemberId) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE members SET kakao_linked = 1, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(now)
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("member {id}")));
		}
		tracing::debug!(member_id = %id, "member marked kakao-linked");
		Ok(())
	}

	/// Bump a member's `updated_at` without changing any other column.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if no member exists with this ID.
	#[tracing::instrument(skip(self), fields(member_id = %id))]
	pub async fn touch_updated_at(&self, id: &MemberId) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query("UPDATE members SET updated_at = ? WHERE id = ?")
			.bind(now)
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("member {id}")));
		}
		Ok(())
	}

	// =========================================================================
	// Helpers
	// =========================================================================

	fn row_to_member(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Member, DbError> {
		let id_str: String = row.get("id");
		let gender_str: String = row.get("gender");
		let birth_date_str: String = row.get("birth_date");
		let kakao_linked: i32 = row.get("kakao_linked");
		let created_at: String = row.get("created_at");
		let updated_at: String = row.get("updated_at");

		let id = Uuid::parse_str(&id_str)
			.map_err(|e| DbError::Internal(format!("Invalid member ID: {e}")))?;
		let gender = gender_str
			.parse::<Gender>()
			.map_err(|e| DbError::Internal(format!("Invalid gender: {e}")))?;
		let birth_date = chrono::NaiveDate::parse_from_str(&birth_date_str, "%Y-%m-%d")
			.map_err(|e| DbError::Internal(format!("Invalid birth_date: {e}")))?;

		Ok(Member {
			id: MemberId::new(id),
			email: row.get("email"),
			name: row.get("name"),
			gender,
			birth_date,
			phone_number: row.get("phone_number"),
			password: row.get("password"),
			kakao_linked: kakao_linked != 0,
			created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
				.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
				.with_timezone(&Utc),
			updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
				.map_err(|e| DbError::Internal(format!("Invalid updated_at: {e}")))?
				.with_timezone(&Utc),
		})
	}
}

#[async_trait]
impl MemberStore for MemberRepository {
	async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DbError> {
		MemberRepository::find_by_email(self, email).await
	}

	async fn create(&self, member: &Member) -> Result<(), DbError> {
		MemberRepository::create(self, member).await
	}

	async fn mark_kakao_linked(&self, id: &MemberId) -> Result<(), DbError> {
		MemberRepository::mark_kakao_linked(self, id).await
	}

	async fn touch_updated_at(&self, id: &MemberId) -> Result<(), DbError> {
		MemberRepository::touch_updated_at(self, id).await
	}
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
	matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_member_test_pool;
	use chrono::NaiveDate;

	fn sample_member(email: &str) -> Member {
		Member::from_provider_profile(
			email,
			"Jiyeon",
			Gender::Female,
			NaiveDate::from_ymd_opt(1995, 3, 14).unwrap(),
			"01012345678",
		)
	}

	async fn make_repo() -> MemberRepository {
		MemberRepository::new(create_member_test_pool().await)
	}

	#[tokio::test]
	async fn create_then_find_round_trips() {
		let repo = make_repo().await;
		let member = sample_member("a@x.com");
		repo.create(&member).await.unwrap();

		let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
		assert_eq!(found.id, member.id);
		assert_eq!(found.email, member.email);
		assert_eq!(found.name, member.name);
		assert_eq!(found.gender, member.gender);
		assert_eq!(found.birth_date, member.birth_date);
		assert_eq!(found.phone_number, member.phone_number);
		assert_eq!(found.password, member.password);
		assert!(found.kakao_linked);
	}

	#[tokio::test]
	async fn find_missing_email_is_none() {
		let repo = make_repo().await;
		assert!(repo.find_by_email("nobody@x.com").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn duplicate_email_is_a_conflict() {
		let repo = make_repo().await;
		repo.create(&sample_member("a@x.com")).await.unwrap();

		let err = repo.create(&sample_member("a@x.com")).await.unwrap_err();
		assert!(matches!(err, DbError::Conflict(_)));
	}

	#[tokio::test]
	async fn mark_kakao_linked_sets_flag() {
		let repo = make_repo().await;
		let mut member = sample_member("a@x.com");
		member.kakao_linked = false;
		repo.create(&member).await.unwrap();

		repo.mark_kakao_linked(&member.id).await.unwrap();
		let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
		assert!(found.kakao_linked);
	}

	#[tokio::test]
	async fn mark_kakao_linked_missing_member_is_not_found() {
		let repo = make_repo().await;
		let err = repo
			.mark_kakao_linked(&MemberId::generate())
			.await
			.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)));
	}

	#[tokio::test]
	async fn touch_updated_at_changes_only_timestamp() {
		let repo = make_repo().await;
		let member = sample_member("a@x.com");
		repo.create(&member).await.unwrap();
		let before = repo.find_by_email("a@x.com").await.unwrap().unwrap();

		tokio::time::sleep(std::time::Duration::from_millis(5)).await;
		repo.touch_updated_at(&member.id).await.unwrap();

		let after = repo.find_by_email("a@x.com").await.unwrap().unwrap();
		assert!(after.updated_at > before.updated_at);
		assert_eq!(after.created_at, before.created_at);
		assert_eq!(after.email, before.email);
		assert_eq!(after.kakao_linked, before.kakao_linked);
		assert_eq!(after.password, before.password);
	}

	#[tokio::test]
	async fn touch_updated_at_missing_member_is_not_found() {
		let repo = make_repo().await;
		let err = repo
			.touch_updated_at(&MemberId::generate())
			.await
			.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)));
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;
		use std::collections::HashSet;

		proptest! {
			#[test]
			fn member_id_generation_is_unique(count in 1..1000usize) {
				let mut ids = HashSet::new();
				for _ in 0..count {
					let id = MemberId::generate();
					prop_assert!(ids.insert(id.to_string()), "Generated duplicate MemberId");
				}
			}
		}
	}
}
