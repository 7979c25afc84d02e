// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper types for Encore.
//!
//! This crate provides:
//! - [`Secret<T>`]: a wrapper that redacts its contents in `Debug` and
//!   `Display` output and zeroizes them on drop
//! - [`SecretString`]: the common string specialization used for client
//!   secrets, access tokens, and signing keys
//! - [`load_secret_env`]: helper for loading secrets from environment
//!   variables, with `*_FILE` indirection support

pub mod env;

pub use env::{load_secret_env, SecretEnvError};

use std::fmt;
use zeroize::Zeroize;

/// Placeholder emitted wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A wrapper that prevents accidental logging of sensitive values.
///
/// The inner value is only reachable through [`Secret::expose`], which makes
/// every use of the raw secret visible at the call site. `Debug` and
/// `Display` both print [`REDACTED`], and the value is zeroized when the
/// wrapper is dropped.
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
	/// Wrap a sensitive value.
	pub fn new(value: T) -> Self {
		Self(value)
	}

	/// Access the inner value.
	pub fn expose(&self) -> &T {
		&self.0
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl<T: Zeroize + Eq> Eq for Secret<T> {}

impl<T: Zeroize> From<T> for Secret<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: Zeroize + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret::new)
	}
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for Secret<T>
where
	T: Zeroize + serde::Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.0.serialize(serializer)
	}
}

/// The common string secret.
pub type SecretString = Secret<String>;

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_output_is_redacted() {
		let secret = SecretString::new("hunter2".to_string());
		assert_eq!(format!("{secret:?}"), REDACTED);
	}

	#[test]
	fn display_output_is_redacted() {
		let secret = SecretString::new("hunter2".to_string());
		assert_eq!(secret.to_string(), REDACTED);
	}

	#[test]
	fn expose_returns_inner_value() {
		let secret = SecretString::new("hunter2".to_string());
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn clone_preserves_value() {
		let secret = SecretString::new("hunter2".to_string());
		let cloned = secret.clone();
		assert_eq!(secret, cloned);
	}

	#[test]
	fn equality_compares_inner_values() {
		let a = SecretString::from("same");
		let b = SecretString::from("same");
		let c = SecretString::from("different");
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn deserializes_from_plain_string() {
		let secret: SecretString = serde_json::from_str("\"token-value\"").unwrap();
		assert_eq!(secret.expose(), "token-value");
	}

	#[cfg(feature = "serde")]
	#[test]
	fn debug_of_deserialized_secret_is_redacted() {
		let secret: SecretString = serde_json::from_str("\"token-value\"").unwrap();
		assert!(!format!("{secret:?}").contains("token-value"));
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn secret_never_leaks_in_debug(value in "[a-zA-Z0-9]{1,64}") {
				prop_assume!(!REDACTED.contains(&value));
				let secret = SecretString::new(value.clone());
				let debug = format!("{secret:?}");
				prop_assert!(!debug.contains(&value));
				prop_assert_eq!(debug, REDACTED);
			}

			#[test]
			fn expose_roundtrips(value in "[ -~]{0,128}") {
				let secret = SecretString::new(value.clone());
				prop_assert_eq!(secret.expose(), &value);
			}
		}
	}
}
