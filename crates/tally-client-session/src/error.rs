// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session error types.

/// Errors raised while loading, saving or clearing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	#[error("IO error: {0}")]
	Io(String),

	#[error("Serialization error: {0}")]
	Serde(String),

	#[error("Invalid session: {0}")]
	Invalid(String),
}

impl From<std::io::Error> for SessionError {
	fn from(err: std::io::Error) -> Self {
		SessionError::Io(err.to_string())
	}
}

impl From<serde_json::Error> for SessionError {
	fn from(err: serde_json::Error) -> Self {
		SessionError::Serde(err.to_string())
	}
}
