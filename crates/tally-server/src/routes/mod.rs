// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP handlers, one module per resource.

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod settings;
pub mod tenders;
pub mod transactions;
pub mod users;

use std::str::FromStr;

use crate::error::ServerError;

/// Parse a path segment into a typed ID, answering 400 when malformed.
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ServerError> {
	raw
		.parse()
		.map_err(|_| ServerError::BadRequest(format!("invalid {what} id")))
}
