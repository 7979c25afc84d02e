// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The member entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Gender, MemberId};

/// A member of the service.
///
/// Members are created either through local signup or through the Kakao
/// login flow; `email` is the uniqueness key across both paths.
///
/// # PII Handling
///
/// `name`, `email`, `birth_date`, and `phone_number` are user PII and must
/// be redacted in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
	/// Unique identifier for this member.
	pub id: MemberId,

	/// Email address; unique across all members.
	pub email: String,

	/// Display name from signup or the provider profile.
	pub name: String,

	/// Recorded gender.
	pub gender: Gender,

	/// Date of birth.
	pub birth_date: NaiveDate,

	/// Phone number in domestic leading-zero form.
	pub phone_number: String,

	/// Password hash for local login. Provider-registered accounts carry a
	/// random opaque placeholder that is never accepted for password login.
	#[serde(skip_serializing)]
	pub password: String,

	/// Whether this account has been linked to Kakao at least once.
	/// Withdrawal does not reset this flag.
	pub kakao_linked: bool,

	/// When the member was created.
	pub created_at: DateTime<Utc>,

	/// When the member was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Member {
	/// Construct a member from a provider profile, as used by first-time
	/// Kakao registration. The placeholder password is a random UUID so the
	/// account cannot be entered through the password path.
	pub fn from_provider_profile(
		email: impl Into<String>,
		name: impl Into<String>,
		gender: Gender,
		birth_date: NaiveDate,
		phone_number: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: MemberId::generate(),
			email: email.into(),
			name: name.into(),
			gender,
			birth_date,
			phone_number: phone_number.into(),
			password: Uuid::new_v4().to_string(),
			kakao_linked: true,
			created_at: now,
			updated_at: now,
		}
	}
}
