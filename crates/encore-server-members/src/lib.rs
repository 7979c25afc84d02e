// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Member domain types for Encore.
//!
//! This crate defines the core member model shared by the persistence layer,
//! the Kakao OAuth client, and the HTTP surface:
//!
//! - [`MemberId`] - type-safe UUID wrapper
//! - [`Gender`] - the two-valued gender enum stored on member records
//! - [`Member`] - the member entity
//! - [`normalize_kr_phone_number`] - the national phone-number rule applied
//!   during provider registration

pub mod member;
pub mod phone;
pub mod types;

pub use member::Member;
pub use phone::{normalize_kr_phone_number, UnsupportedRegionError, KR_COUNTRY_PREFIX};
pub use types::{Gender, MemberId};
