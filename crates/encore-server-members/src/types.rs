// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! ID and enum types for the member domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
	/// Create a new ID from a UUID.
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	/// Generate a new random ID.
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	/// Get the inner UUID value.
	pub fn into_inner(self) -> Uuid {
		self.0
	}

	/// Get a reference to the inner UUID.
	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl fmt::Display for MemberId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Uuid> for MemberId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

impl From<MemberId> for Uuid {
	fn from(id: MemberId) -> Self {
		id.0
	}
}

/// Gender as recorded on a member.
///
/// Stored in the database and serialized in its SCREAMING case form
/// (`MALE` / `FEMALE`); the provider reports it lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
	Male,
	Female,
}

impl Gender {
	/// Returns all gender values.
	pub fn all() -> &'static [Gender] {
		&[Gender::Male, Gender::Female]
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Gender::Male => write!(f, "MALE"),
			Gender::Female => write!(f, "FEMALE"),
		}
	}
}

impl std::str::FromStr for Gender {
	type Err = ParseGenderError;

	/// Case-insensitive parse, accepting both the stored form (`MALE`) and
	/// the provider form (`male`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"MALE" => Ok(Gender::Male),
			"FEMALE" => Ok(Gender::Female),
			_ => Err(ParseGenderError(s.to_string())),
		}
	}
}

/// Error returned when a gender string is neither `male` nor `female`.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized gender value: {0}")]
pub struct ParseGenderError(pub String);
