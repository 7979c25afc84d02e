// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::SqlitePool;

pub async fn create_test_pool() -> SqlitePool {
	SqlitePool::connect(":memory:").await.unwrap()
}

pub async fn create_members_table(pool: &SqlitePool) {
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
	.await
	.unwrap();
}

pub async fn create_venues_table(pool: &SqlitePool) {
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
	.await
	.unwrap();
}

pub async fn create_seats_table(pool: &SqlitePool) {
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
	.await
	.unwrap();
}

pub async fn create_member_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_members_table(&pool).await;
	pool
}

pub async fn create_seat_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_venues_table(&pool).await;
	create_seats_table(&pool).await;
	pool
}
