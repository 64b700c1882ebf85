// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use tally_server_api::ErrorResponse;
use tally_server_auth::{PasswordError, TokenError};

use crate::authz_middleware::AuthorizationError;
use crate::store::StoreError;

/// Errors surfaced by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Authentication missing or failed.
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// Authenticated but not permitted.
	#[error("Forbidden: {0}")]
	Forbidden(String),

	#[error("Not found: {0}")]
	NotFound(String),

	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// The request conflicts with current state.
	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal error: {0}")]
	Internal(String),

	#[error("Token error: {0}")]
	Token(#[from] TokenError),

	#[error("Password error: {0}")]
	Password(#[from] PasswordError),
}

impl From<AuthorizationError> for ServerError {
	fn from(err: AuthorizationError) -> Self {
		ServerError::Forbidden(err.message)
	}
}

impl From<StoreError> for ServerError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::NotFound(what) => ServerError::NotFound(what),
			StoreError::Conflict(what) => ServerError::Conflict(what),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::Unauthorized(message) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("unauthorized", message.clone()),
			),
			ServerError::Forbidden(message) => (
				StatusCode::FORBIDDEN,
				ErrorResponse::new("forbidden", message.clone()),
			),
			ServerError::NotFound(what) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", format!("{what} not found")),
			),
			ServerError::BadRequest(message) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", message.clone()),
			),
			ServerError::Conflict(message) => (
				StatusCode::CONFLICT,
				ErrorResponse::new("conflict", message.clone()),
			),
			ServerError::Internal(message) => {
				tracing::error!(error = %message, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Token(TokenError::Signing(e)) => {
				tracing::error!(error = %e, "token signing failed");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Token(e) => {
				tracing::debug!(error = %e, "token rejected");
				(
					StatusCode::UNAUTHORIZED,
					ErrorResponse::new("unauthorized", "Invalid or expired token"),
				)
			}
			ServerError::Password(e) => {
				tracing::error!(error = %e, "password hashing failed");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}
