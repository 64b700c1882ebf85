// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token and password error types.

use thiserror::Error;

use crate::token::TokenKind;

/// Errors from issuing or verifying session tokens.
#[derive(Debug, Error)]
pub enum TokenError {
	/// The token's `exp` has passed.
	#[error("token expired")]
	Expired,

	/// Bad signature, wrong issuer, malformed, or missing claims.
	#[error("invalid token: {0}")]
	Invalid(String),

	/// A refresh token was presented where an access token was expected, or
	/// the reverse.
	#[error("expected {expected} token, got {actual}")]
	WrongKind {
		expected: TokenKind,
		actual: TokenKind,
	},

	#[error("failed to sign token: {0}")]
	Signing(String),
}

/// Errors from password hashing.
#[derive(Debug, Error)]
pub enum PasswordError {
	#[error("failed to hash password: {0}")]
	Hash(String),
}
