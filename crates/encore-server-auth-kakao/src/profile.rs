// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed decoding of Kakao's profile payload.
//!
//! Kakao nests the interesting fields two levels deep and marks them all
//! optional. [`KakaoProfile::from_response`] performs the required-field
//! validation explicitly so that each missing or malformed field produces a
//! [`OAuthError::Parse`] carrying its JSON path, rather than an opaque
//! decode failure.

use chrono::NaiveDate;
use encore_server_members::{normalize_kr_phone_number, Gender};
use serde::Deserialize;

use crate::OAuthError;

/// Raw response from Kakao's `/v2/user/me` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoUserResponse {
	#[serde(default)]
	pub properties: Option<KakaoProperties>,
	#[serde(default)]
	pub kakao_account: Option<KakaoAccount>,
}

/// The `properties` object of the profile payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProperties {
	#[serde(default)]
	pub nickname: Option<String>,
}

/// The `kakao_account` object of the profile payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoAccount {
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub gender: Option<String>,
	#[serde(default)]
	pub birthyear: Option<String>,
	#[serde(default)]
	pub birthday: Option<String>,
	#[serde(default)]
	pub phone_number: Option<String>,
}

/// A validated, request-scoped view of the provider profile.
///
/// Never persisted as its own record; used only to construct or match a
/// member. The phone number is already normalized to domestic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KakaoProfile {
	pub name: String,
	pub email: String,
	pub gender: Gender,
	pub birth_date: NaiveDate,
	pub phone_number: String,
}

impl KakaoProfile {
	/// Validate and decode a raw profile response.
	///
	/// # Errors
	///
	/// - [`OAuthError::Parse`] with the field path for any missing or
	///   malformed required field.
	/// - [`OAuthError::UnsupportedRegion`] for a phone number outside `+82`.
	pub fn from_response(raw: KakaoUserResponse) -> Result<Self, OAuthError> {
		let properties = raw.properties.ok_or_else(|| parse("properties"))?;
		let account = raw.kakao_account.ok_or_else(|| parse("kakao_account"))?;

		let name = properties
			.nickname
			.filter(|v| !v.is_empty())
			.ok_or_else(|| parse("properties.nickname"))?;

		let email = account
			.email
			.filter(|v| !v.is_empty())
			.ok_or_else(|| parse("kakao_account.email"))?;

		let gender = account
			.gender
			.ok_or_else(|| parse("kakao_account.gender"))?
			.parse::<Gender>()
			.map_err(|_| parse("kakao_account.gender"))?;

		let birthyear = account
			.birthyear
			.ok_or_else(|| parse("kakao_account.birthyear"))?;
		let birthday = account
			.birthday
			.ok_or_else(|| parse("kakao_account.birthday"))?;
		// birthyear "1995" + birthday "0314" parse as one 8-digit date.
		let birth_date = NaiveDate::parse_from_str(&format!("{birthyear}{birthday}"), "%Y%m%d")
			.map_err(|_| parse("kakao_account.birthday"))?;

		let raw_phone = account
			.phone_number
			.ok_or_else(|| parse("kakao_account.phone_number"))?;
		let phone_number = normalize_kr_phone_number(&raw_phone)?;

		Ok(Self {
			name,
			email,
			gender,
			birth_date,
			phone_number,
		})
	}
}

fn parse(field: &str) -> OAuthError {
	OAuthError::Parse {
		field: field.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_response() -> KakaoUserResponse {
		KakaoUserResponse {
			properties: Some(KakaoProperties {
				nickname: Some("Jiyeon".to_string()),
			}),
			kakao_account: Some(KakaoAccount {
				email: Some("new@x.com".to_string()),
				gender: Some("female".to_string()),
				birthyear: Some("1995".to_string()),
				birthday: Some("0314".to_string()),
				phone_number: Some("+82 1012345678".to_string()),
			}),
		}
	}

	fn field_of(err: OAuthError) -> String {
		match err {
			OAuthError::Parse { field } => field,
			other => panic!("expected Parse error, got {other:?}"),
		}
	}

	#[test]
	fn full_payload_decodes() {
		let profile = KakaoProfile::from_response(full_response()).unwrap();
		assert_eq!(profile.name, "Jiyeon");
		assert_eq!(profile.email, "new@x.com");
		assert_eq!(profile.gender, Gender::Female);
		assert_eq!(
			profile.birth_date,
			NaiveDate::from_ymd_opt(1995, 3, 14).unwrap()
		);
		assert_eq!(profile.phone_number, "01012345678");
	}

	#[test]
	fn missing_nickname_names_the_field() {
		let mut raw = full_response();
		raw.properties.as_mut().unwrap().nickname = None;
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "properties.nickname");
	}

	#[test]
	fn missing_email_names_the_field() {
		let mut raw = full_response();
		raw.kakao_account.as_mut().unwrap().email = None;
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "kakao_account.email");
	}

	#[test]
	fn unknown_gender_is_a_parse_error() {
		let mut raw = full_response();
		raw.kakao_account.as_mut().unwrap().gender = Some("unknown".to_string());
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "kakao_account.gender");
	}

	#[test]
	fn invalid_birthday_is_a_parse_error() {
		let mut raw = full_response();
		raw.kakao_account.as_mut().unwrap().birthday = Some("9999".to_string());
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "kakao_account.birthday");
	}

	#[test]
	fn missing_birthyear_names_the_field() {
		let mut raw = full_response();
		raw.kakao_account.as_mut().unwrap().birthyear = None;
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "kakao_account.birthyear");
	}

	#[test]
	fn missing_account_object_names_the_field() {
		let raw = KakaoUserResponse {
			properties: Some(KakaoProperties {
				nickname: Some("Jiyeon".to_string()),
			}),
			kakao_account: None,
		};
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert_eq!(field_of(err), "kakao_account");
	}

	#[test]
	fn foreign_phone_is_unsupported_region() {
		let mut raw = full_response();
		raw.kakao_account.as_mut().unwrap().phone_number = Some("+81 9012345678".to_string());
		let err = KakaoProfile::from_response(raw).unwrap_err();
		assert!(matches!(err, OAuthError::UnsupportedRegion(_)));
	}

	#[test]
	fn decodes_from_raw_json() {
		let json = r#"{
			"id": 12345,
			"properties": { "nickname": "Jiyeon" },
			"kakao_account": {
				"profile_needs_agreement": false,
				"email": "new@x.com",
				"gender": "female",
				"birthyear": "1995",
				"birthday": "0314",
				"phone_number": "+82 1012345678"
			}
		}"#;
		let raw: KakaoUserResponse = serde_json::from_str(json).unwrap();
		let profile = KakaoProfile::from_response(raw).unwrap();
		assert_eq!(profile.phone_number, "01012345678");
	}
}
