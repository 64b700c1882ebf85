// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transaction handlers.
//!
//! Creation is checked against the amount being posted, so a user's
//! transaction limit applies before anything is stored. Approval and
//! rejection lock the transaction; a locked transaction cannot be reviewed
//! again.

use axum::{
	body::Bytes,
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Utc;
use tally_server_api::{
	CreateTransactionRequest, ListTransactionsResponse, ReviewTransactionRequest,
	TransactionResponse, TransactionStatus,
};
use tally_server_auth::{
	ability::conditions::is_not_locked, has_permission, Action, Identity, ResourceAttrs,
	Subject, TransactionId,
};

use crate::{
	api::AppState, auth_middleware::RequireAuth, authorize, error::ServerError, routes::parse_id,
	store::TransactionRecord,
};

async fn load_transaction(
	state: &AppState,
	raw_id: &str,
) -> Result<TransactionRecord, ServerError> {
	let id: TransactionId = parse_id(raw_id, "transaction")?;
	state
		.store
		.get_transaction(id)
		.await
		.ok_or_else(|| ServerError::NotFound("transaction".to_string()))
}

/// GET /api/transactions
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn list_transactions(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<ListTransactionsResponse> {
	let identity = &current_user.identity;
	let transactions = state
		.store
		.list_transactions()
		.await
		.into_iter()
		.filter(|t| {
			has_permission(
				Some(identity),
				Action::Read,
				Subject::Transaction,
				Some(&t.resource()),
			)
		})
		.map(|t| t.to_response())
		.collect();

	Json(ListTransactionsResponse { transactions })
}

/// POST /api/transactions
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), amount = body.amount))]
pub async fn create_transaction(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ServerError> {
	let identity = &current_user.identity;

	if body.amount <= 0 {
		return Err(ServerError::BadRequest("amount must be positive".to_string()));
	}

	let target = ResourceAttrs::transaction(identity.id, body.amount);
	authorize!(identity, Action::Create, &target)?;

	let account = state
		.store
		.get_account(body.account_id)
		.await
		.ok_or_else(|| ServerError::NotFound("account".to_string()))?;
	// Posting to an account requires being able to see it.
	authorize!(identity, Action::Read, &account.resource())?;

	let transaction = TransactionRecord {
		id: TransactionId::generate(),
		account_id: account.id,
		amount: body.amount,
		description: body.description.trim().to_string(),
		status: TransactionStatus::Pending,
		is_locked: false,
		created_by: identity.id,
		reviewed_by: None,
		review_note: None,
		created_at: Utc::now(),
	};
	let response = transaction.to_response();
	state.store.insert_transaction(transaction).await?;

	tracing::info!(transaction_id = %response.id, account_id = %response.account_id, "transaction created");
	Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/transactions/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn get_transaction(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, ServerError> {
	let transaction = load_transaction(&state, &id).await?;
	authorize!(&current_user.identity, Action::Read, &transaction.resource())?;
	Ok(Json(transaction.to_response()))
}

/// POST /api/transactions/{id}/approve
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn approve_transaction(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Bytes,
) -> Result<Json<TransactionResponse>, ServerError> {
	let body = parse_review(&body)?;
	review(&state, &current_user.identity, &id, Action::Approve, body).await
}

/// POST /api/transactions/{id}/reject
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn reject_transaction(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Bytes,
) -> Result<Json<TransactionResponse>, ServerError> {
	let body = parse_review(&body)?;
	review(&state, &current_user.identity, &id, Action::Reject, body).await
}

/// The review body is optional; an empty body means no note.
fn parse_review(body: &Bytes) -> Result<ReviewTransactionRequest, ServerError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(ReviewTransactionRequest::default());
	}
	serde_json::from_slice(body)
		.map_err(|e| ServerError::BadRequest(format!("invalid review body: {e}")))
}

async fn review(
	state: &AppState,
	identity: &Identity,
	raw_id: &str,
	action: Action,
	body: ReviewTransactionRequest,
) -> Result<Json<TransactionResponse>, ServerError> {
	let transaction = load_transaction(state, raw_id).await?;
	let resource = transaction.resource();
	authorize!(identity, action, &resource)?;

	if !is_not_locked(Some(identity), Some(&resource)) {
		return Err(ServerError::Conflict(
			"transaction has already been reviewed".to_string(),
		));
	}

	let status = match action {
		Action::Approve => TransactionStatus::Approved,
		_ => TransactionStatus::Rejected,
	};
	let note = body
		.note
		.map(|n| n.trim().to_string())
		.filter(|n| !n.is_empty());

	let reviewed = state
		.store
		.review_transaction(transaction.id, status, identity.id, note)
		.await?;

	tracing::info!(transaction_id = %reviewed.id, ?status, "transaction reviewed");
	Ok(Json(reviewed.to_response()))
}
