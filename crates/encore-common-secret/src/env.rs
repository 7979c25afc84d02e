// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets from the environment.
//!
//! Supports the `*_FILE` convention: if `NAME` is unset but `NAME_FILE` is,
//! the secret is read from the named file. This keeps raw secrets out of
//! process environments in containerized deployments.

use std::path::PathBuf;

use crate::SecretString;

/// Errors that can occur when loading a secret from the environment.
#[derive(Debug, thiserror::Error)]
pub enum SecretEnvError {
	/// Both `NAME` and `NAME_FILE` were set.
	#[error("both {var} and {var}_FILE are set; use exactly one")]
	Ambiguous { var: String },

	/// The file referenced by `NAME_FILE` could not be read.
	#[error("failed to read secret file {path} for {var}: {source}")]
	FileRead {
		var: String,
		path: PathBuf,
		source: std::io::Error,
	},
}

/// Load an optional secret from `name`, falling back to `name_FILE`.
///
/// Empty values are treated as unset. File contents are trimmed of trailing
/// whitespace so that files with a final newline behave as expected.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let direct = std::env::var(name).ok().filter(|v| !v.is_empty());
	let file_var = format!("{name}_FILE");
	let from_file = std::env::var(&file_var).ok().filter(|v| !v.is_empty());

	match (direct, from_file) {
		(Some(_), Some(_)) => Err(SecretEnvError::Ambiguous {
			var: name.to_string(),
		}),
		(Some(value), None) => Ok(Some(SecretString::new(value))),
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let content = std::fs::read_to_string(&path).map_err(|e| SecretEnvError::FileRead {
				var: name.to_string(),
				path: path.clone(),
				source: e,
			})?;
			let trimmed = content.trim_end().to_string();
			if trimmed.is_empty() {
				Ok(None)
			} else {
				Ok(Some(SecretString::new(trimmed)))
			}
		}
		(None, None) => Ok(None),
	}
}
