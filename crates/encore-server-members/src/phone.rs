// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Phone-number normalization for provider registration.
//!
//! Registration is restricted to Korean numbers: the provider reports them
//! with the `+82 ` country calling prefix, and member records store the
//! domestic leading-zero form.

/// The only country calling prefix accepted during provider registration.
pub const KR_COUNTRY_PREFIX: &str = "+82 ";

/// A phone number outside the supported `+82` region.
#[derive(Debug, thiserror::Error)]
#[error("phone number {phone:?} is outside the supported +82 region")]
pub struct UnsupportedRegionError {
	/// The offending number as the provider reported it.
	pub phone: String,
}

/// Normalize a provider-reported phone number to domestic form.
///
/// `"+82 1012345678"` becomes `"01012345678"`; everything after the prefix
/// is preserved unchanged. Numbers with any other prefix are rejected.
pub fn normalize_kr_phone_number(raw: &str) -> Result<String, UnsupportedRegionError> {
	match raw.strip_prefix(KR_COUNTRY_PREFIX) {
		Some(rest) => Ok(format!("0{rest}")),
		None => Err(UnsupportedRegionError {
			phone: raw.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn korean_number_is_normalized() {
		assert_eq!(
			normalize_kr_phone_number("+82 1012345678").unwrap(),
			"01012345678"
		);
	}

	#[test]
	fn tail_is_preserved_verbatim() {
		assert_eq!(
			normalize_kr_phone_number("+82 10-1234-5678").unwrap(),
			"010-1234-5678"
		);
	}

	#[test]
	fn other_regions_are_rejected() {
		assert!(normalize_kr_phone_number("+1 5551234567").is_err());
		assert!(normalize_kr_phone_number("+81 9012345678").is_err());
		assert!(normalize_kr_phone_number("01012345678").is_err());
	}

	#[test]
	fn prefix_without_space_is_rejected() {
		// The provider always inserts a space after the calling code.
		assert!(normalize_kr_phone_number("+821012345678").is_err());
	}

	#[test]
	fn error_carries_original_number() {
		let err = normalize_kr_phone_number("+44 7700900000").unwrap_err();
		assert_eq!(err.phone, "+44 7700900000");
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn normalized_numbers_start_with_zero_and_keep_tail(
				tail in "[0-9]{4,12}"
			) {
				let raw = format!("+82 {tail}");
				let normalized = normalize_kr_phone_number(&raw).unwrap();
				prop_assert_eq!(normalized, format!("0{}", tail));
			}

			#[test]
			fn non_korean_prefixes_always_fail(
				code in 1u32..999,
				tail in "[0-9]{4,12}"
			) {
				prop_assume!(code != 82);
				let raw = format!("+{code} {tail}");
				prop_assert!(normalize_kr_phone_number(&raw).is_err());
			}
		}
	}
}
