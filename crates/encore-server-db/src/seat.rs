// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Venue and seat repository.
//!
//! Seats belong to exactly one venue. The venue is not embedded in the seat
//! record; callers that need it fetch it on demand through
//! [`SeatRepository::venue_of`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

/// Unique identifier for a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(Uuid);

impl VenueId {
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl std::fmt::Display for VenueId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Unique identifier for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(Uuid);

impl SeatId {
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl std::fmt::Display for SeatId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A venue that holds seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
	pub id: VenueId,
	pub name: String,
	pub created_at: DateTime<Utc>,
}

impl Venue {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: VenueId::generate(),
			name: name.into(),
			created_at: Utc::now(),
		}
	}
}

/// A seat at a fixed row/column position within a venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
	pub id: SeatId,
	pub venue_id: VenueId,
	pub row: i64,
	pub column: i64,
}

impl Seat {
	pub fn new(venue_id: VenueId, row: i64, column: i64) -> Self {
		Self {
			id: SeatId::generate(),
			venue_id,
			row,
			column,
		}
	}
}

/// Repository for venue and seat database operations.
#[derive(Clone)]
pub struct SeatRepository {
	pool: SqlitePool,
}

impl SeatRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, venue), fields(venue_id = %venue.id))]
	pub async fn create_venue(&self, venue: &Venue) -> Result<(), DbError> {
		sqlx::query("INSERT INTO venues (id, name, created_at) VALUES (?, ?, ?)")
			.bind(venue.id.to_string())
			.bind(&venue.name)
			.bind(venue.created_at.to_rfc3339())
			.execute(&self.pool)
			.await?;

		tracing::debug!(venue_id = %venue.id, "venue created");
		Ok(())
	}

	/// Get a venue by ID.
	///
	/// # Returns
	/// `None` if no venue exists with this ID.
	#[tracing::instrument(skip(self), fields(venue_id = %id))]
	pub async fn get_venue(&self, id: &VenueId) -> Result<Option<Venue>, DbError> {
		let row = sqlx::query("SELECT id, name, created_at FROM venues WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| self.row_to_venue(&r)).transpose()
	}

	/// Insert a new seat.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the venue does not exist and
	/// `DbError::Conflict` if the (venue, row, column) position is taken.
	#[tracing::instrument(skip(self, seat), fields(seat_id = %seat.id, venue_id = %seat.venue_id))]
	pub async fn create_seat(&self, seat: &Seat) -> Result<(), DbError> {
		if self.get_venue(&seat.venue_id).await?.is_none() {
			return Err(DbError::NotFound(format!("venue {}", seat.venue_id)));
		}

		let result = sqlx::query(
			r#"
			INSERT INTO seats (id, venue_id, seat_row, seat_column)
			VALUES (?, ?, ?, ?)
			"#,
		)
		.bind(seat.id.to_string())
		.bind(seat.venue_id.to_string())
		.bind(seat.row)
		.bind(seat.column)
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!(seat_id = %seat.id, "seat created");
				Ok(())
			}
			Err(e) if is_unique_violation(&e) => Err(DbError::Conflict(format!(
				"seat position already taken: {e}"
			))),
			Err(e) => Err(e.into()),
		}
	}

	/// Get a seat by ID.
	///
	/// # Returns
	/// `None` if no seat exists with this ID.
	#[tracing::instrument(skip(self), fields(seat_id = %id))]
	pub async fn get_seat(&self, id: &SeatId) -> Result<Option<Seat>, DbError> {
		let row = sqlx::query(
			"SELECT id, venue_id, seat_row, seat_column FROM seats WHERE id = ?",
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| self.row_to_seat(&r)).transpose()
	}

	/// List all seats of a venue ordered by row then column.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the venue does not exist.
	#[tracing::instrument(skip(self), fields(venue_id = %venue_id))]
	pub async fn list_by_venue(&self, venue_id: &VenueId) -> Result<Vec<Seat>, DbError> {
		if self.get_venue(venue_id).await?.is_none() {
			return Err(DbError::NotFound(format!("venue {venue_id}")));
		}

		let rows = sqlx::query(
			r#"
			SELECT id, venue_id, seat_row, seat_column
			FROM seats
			WHERE venue_id = ?
			ORDER BY seat_row ASC, seat_column ASC
			"#,
		)
		.bind(venue_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let seats: Result<Vec<_>, _> = rows.iter().map(|r| self.row_to_seat(r)).collect();
		let seats = seats?;
		tracing::debug!(venue_id = %venue_id, count = seats.len(), "listed venue seats");
		Ok(seats)
	}

	/// Fetch the venue a seat belongs to.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the referenced venue is gone.
	#[tracing::instrument(skip(self, seat), fields(seat_id = %seat.id))]
	pub async fn venue_of(&self, seat: &Seat) -> Result<Venue, DbError> {
		self.get_venue(&seat.venue_id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("venue {}", seat.venue_id)))
	}

	// =========================================================================
	// Helpers
	// =========================================================================

	fn row_to_venue(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Venue, DbError> {
		let id_str: String = row.get("id");
		let created_at: String = row.get("created_at");

		let id = Uuid::parse_str(&id_str)
			.map_err(|e| DbError::Internal(format!("Invalid venue ID: {e}")))?;

		Ok(Venue {
			id: VenueId::new(id),
			name: row.get("name"),
			created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
				.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
				.with_timezone(&Utc),
		})
	}

	fn row_to_seat(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Seat, DbError> {
		let id_str: String = row.get("id");
		let venue_id_str: String = row.get("venue_id");

		let id = Uuid::parse_str(&id_str)
			.map_err(|e| DbError::Internal(format!("Invalid seat ID: {e}")))?;
		let venue_id = Uuid::parse_str(&venue_id_str)
			.map_err(|e| DbError::Internal(format!("Invalid venue ID: {e}")))?;

		Ok(Seat {
			id: SeatId::new(id),
			venue_id: VenueId::new(venue_id),
			row: row.get("seat_row"),
			column: row.get("seat_column"),
		})
	}
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
	matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
