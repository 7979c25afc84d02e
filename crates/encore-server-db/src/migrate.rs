// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema setup.
//!
//! The schema is small enough that idempotent `CREATE TABLE IF NOT EXISTS`
//! statements run at startup cover it; there is no versioned migration
//! history yet.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

/// Create all tables if they do not exist.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS members (
			id TEXT PRIMARY KEY,
			email TEXT UNIQUE NOT NULL,
			name TEXT NOT NULL,
			gender TEXT NOT NULL,
			birth_date TEXT NOT NULL,
			phone_number TEXT NOT NULL,
			password TEXT NOT NULL,
			kakao_linked INTEGER NOT NULL DEFAULT 0,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS venues (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			created_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS seats (
			id TEXT PRIMARY KEY,
			venue_id TEXT NOT NULL REFERENCES venues(id),
			seat_row INTEGER NOT NULL,
			seat_column INTEGER NOT NULL,
			UNIQUE(venue_id, seat_row, seat_column)
		)
		"#,
	)
	.execute(pool)
	.await?;

	tracing::debug!("database schema ensured");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	#[tokio::test]
	async fn migrations_are_idempotent() {
		let pool = create_test_pool().await;
		run_migrations(&pool).await.unwrap();
		run_migrations(&pool).await.unwrap();
	}

	#[tokio::test]
	async fn email_is_unique() {
		let pool = create_test_pool().await;
		run_migrations(&pool).await.unwrap();

		let insert = r#"
			INSERT INTO members (id, email, name, gender, birth_date, phone_number, password, kakao_linked, created_at, updated_at)
			VALUES (?, 'a@x.com', 'A', 'MALE', '1995-03-14', '01012345678', 'pw', 1, '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')
		"#;
		sqlx::query(insert)
			.bind("id-1")
			.execute(&pool)
			.await
			.unwrap();
		assert!(sqlx::query(insert).bind("id-2").execute(&pool).await.is_err());
	}
}
