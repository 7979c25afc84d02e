// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the Encore server.
//!
//! SQLite via sqlx, one repository per aggregate. Timestamps are stored as
//! RFC 3339 text, dates as `YYYY-MM-DD` text, and UUIDs as their canonical
//! string form.

pub mod error;
pub mod member;
pub mod migrate;
pub mod pool;
pub mod seat;
pub mod testing;

pub use error::{DbError, Result};
pub use member::{MemberRepository, MemberStore};
pub use migrate::run_migrations;
pub use pool::create_pool;
pub use seat::{Seat, SeatId, SeatRepository, Venue, VenueId};
