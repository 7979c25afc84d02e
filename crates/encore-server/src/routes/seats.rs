// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Venue seat HTTP handlers.

use axum::{
	extract::{Path, State},
	Json,
};
use encore_server_db::{Seat, VenueId};
use uuid::Uuid;

use crate::api::AppState;
use crate::error::ServerError;

/// GET /api/venues/{venue_id}/seats - list a venue's seats in row/column order.
pub async fn list_venue_seats(
	State(state): State<AppState>,
	Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<Seat>>, ServerError> {
	let seats = state.seats.list_by_venue(&VenueId::new(venue_id)).await?;
	Ok(Json(seats))
}
