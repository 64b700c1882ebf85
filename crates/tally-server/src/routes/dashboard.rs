// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard handler. Guarded by `RequireAbility(Read, Dashboard)`; each
//! count only includes items the caller may read.

use axum::{extract::State, Json};
use chrono::Utc;
use tally_server_api::{DashboardResponse, TransactionStatus};
use tally_server_auth::{
	ability::conditions::is_tender_active_at, define_abilities_at, Action,
};

use crate::{api::AppState, auth_middleware::RequireAuth};

/// GET /api/dashboard
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn get_dashboard(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<DashboardResponse> {
	let now = Utc::now();
	// One ability for the whole page, evaluated at a single instant.
	let ability = define_abilities_at(Some(&current_user.identity), now);

	let accounts = state
		.store
		.list_accounts()
		.await
		.iter()
		.filter(|a| ability.can(Action::Read, &a.resource()))
		.count();

	let pending_transactions = state
		.store
		.list_transactions()
		.await
		.iter()
		.filter(|t| t.status == TransactionStatus::Pending)
		.filter(|t| ability.can(Action::Read, &t.resource()))
		.count();

	let active_tenders = state
		.store
		.list_tenders()
		.await
		.iter()
		.map(|t| t.resource())
		.filter(|t| is_tender_active_at(None, Some(t), now))
		.filter(|t| ability.can(Action::Read, t))
		.count();

	let reports = state
		.store
		.list_reports()
		.await
		.iter()
		.filter(|r| ability.can(Action::Read, &r.resource()))
		.count();

	Json(DashboardResponse {
		accounts,
		pending_transactions,
		active_tenders,
		reports,
	})
}
