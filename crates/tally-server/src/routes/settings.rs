// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform settings. Read and update are guarded at the route by
//! `RequireAbility(Read, Settings)` and `RequireAbility(Update, Settings)`.

use axum::{extract::State, Json};
use tally_server_api::{SettingsResponse, UpdateSettingsRequest};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError};

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
	Json(state.store.settings().await.to_response())
}

/// PUT /api/settings
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn update_settings(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, ServerError> {
	let currency = body
		.currency
		.map(|c| validate_currency(&c))
		.transpose()?;

	if let Some(month) = body.fiscal_year_start_month {
		if !(1..=12).contains(&month) {
			return Err(ServerError::BadRequest(
				"fiscal_year_start_month must be between 1 and 12".to_string(),
			));
		}
	}
	if let Some(threshold) = body.approval_threshold {
		if threshold < 0 {
			return Err(ServerError::BadRequest(
				"approval_threshold must not be negative".to_string(),
			));
		}
	}

	let updated = state
		.store
		.update_settings(|s| {
			if let Some(currency) = currency {
				s.currency = currency;
			}
			if let Some(month) = body.fiscal_year_start_month {
				s.fiscal_year_start_month = month;
			}
			if let Some(threshold) = body.approval_threshold {
				s.approval_threshold = threshold;
			}
		})
		.await;

	tracing::info!(currency = %updated.currency, "settings updated");
	Ok(Json(updated.to_response()))
}

/// Three ASCII letters, normalised to upper case.
fn validate_currency(code: &str) -> Result<String, ServerError> {
	let code = code.trim();
	if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
		Ok(code.to_ascii_uppercase())
	} else {
		Err(ServerError::BadRequest(format!(
			"'{code}' is not an ISO 4217 currency code"
		)))
	}
}
