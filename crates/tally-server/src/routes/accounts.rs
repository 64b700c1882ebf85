// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Utc;
use tally_server_api::{AccountResponse, CreateAccountRequest, ListAccountsResponse};
use tally_server_auth::{has_permission, AccountId, Action, ResourceAttrs, Subject};

use crate::{
	api::AppState, auth_middleware::RequireAuth, authorize, error::ServerError, routes::parse_id,
	store::AccountRecord,
};

async fn load_account(state: &AppState, raw_id: &str) -> Result<AccountRecord, ServerError> {
	let id: AccountId = parse_id(raw_id, "account")?;
	state
		.store
		.get_account(id)
		.await
		.ok_or_else(|| ServerError::NotFound("account".to_string()))
}

/// GET /api/accounts
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn list_accounts(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<ListAccountsResponse> {
	let identity = &current_user.identity;
	let accounts = state
		.store
		.list_accounts()
		.await
		.into_iter()
		.filter(|a| {
			has_permission(
				Some(identity),
				Action::Read,
				Subject::Account,
				Some(&a.resource()),
			)
		})
		.map(|a| a.to_response())
		.collect();

	Json(ListAccountsResponse { accounts })
}

/// POST /api/accounts
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn create_account(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ServerError> {
	let target =
		ResourceAttrs::account(body.department_id).with_created_by(current_user.id());
	authorize!(&current_user.identity, Action::Create, &target)?;

	let name = body.name.trim();
	if name.is_empty() {
		return Err(ServerError::BadRequest("name is required".to_string()));
	}

	let account = AccountRecord {
		id: AccountId::generate(),
		name: name.to_string(),
		department_id: body.department_id,
		balance: body.opening_balance,
		created_by: current_user.id(),
		created_at: Utc::now(),
	};
	let response = account.to_response();
	state.store.insert_account(account).await;

	tracing::info!(account_id = %response.id, department_id = %response.department_id, "account created");
	Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/accounts/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn get_account(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ServerError> {
	let account = load_account(&state, &id).await?;
	authorize!(&current_user.identity, Action::Read, &account.resource())?;
	Ok(Json(account.to_response()))
}

/// DELETE /api/accounts/{id}
///
/// Accounts that carry transactions answer 409.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn delete_account(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
	let account = load_account(&state, &id).await?;
	authorize!(&current_user.identity, Action::Delete, &account.resource())?;

	state.store.delete_account(account.id).await?;
	tracing::info!(account_id = %account.id, "account deleted");
	Ok(StatusCode::NO_CONTENT)
}
