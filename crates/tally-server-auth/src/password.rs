// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing with Argon2id. Hashes are PHC strings.

use argon2::password_hash::{
	rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use tracing::instrument;

use crate::argon2_config::argon2_instance;
use crate::error::PasswordError;

#[instrument(level = "debug", skip_all)]
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Constant-time check of `password` against a stored PHC hash. A malformed
/// hash never verifies.
#[instrument(level = "debug", skip_all)]
pub fn verify_password(password: &str, hash: &str) -> bool {
	let Ok(parsed) = PasswordHash::new(hash) else {
		return false;
	};
	argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok()
}
