// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tender handlers. Users only see tenders whose bidding window is open.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use tally_server_api::{CreateTenderRequest, ListTendersResponse, TenderResponse};
use tally_server_auth::{has_permission, Action, ResourceAttrs, Subject, TenderId};

use crate::{
	api::AppState, auth_middleware::RequireAuth, authorize, error::ServerError, routes::parse_id,
	store::TenderRecord,
};

/// GET /api/tenders
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn list_tenders(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<ListTendersResponse> {
	let identity = &current_user.identity;
	let tenders = state
		.store
		.list_tenders()
		.await
		.into_iter()
		.filter(|t| {
			has_permission(
				Some(identity),
				Action::Read,
				Subject::Tender,
				Some(&t.resource()),
			)
		})
		.map(|t| t.to_response())
		.collect();

	Json(ListTendersResponse { tenders })
}

/// POST /api/tenders
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn create_tender(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<CreateTenderRequest>,
) -> Result<(StatusCode, Json<TenderResponse>), ServerError> {
	if body.end_date < body.start_date {
		return Err(ServerError::BadRequest(
			"end_date must not be before start_date".to_string(),
		));
	}

	let target = ResourceAttrs::tender(body.start_date, body.end_date)
		.with_participants(body.participants.iter().copied())
		.with_created_by(current_user.id());
	authorize!(&current_user.identity, Action::Create, &target)?;

	let title = body.title.trim();
	if title.is_empty() {
		return Err(ServerError::BadRequest("title is required".to_string()));
	}

	let mut participants = body.participants;
	participants.sort();
	participants.dedup();

	let tender = TenderRecord {
		id: TenderId::generate(),
		title: title.to_string(),
		start_date: body.start_date,
		end_date: body.end_date,
		is_closed: false,
		participants,
		created_by: current_user.id(),
	};
	let response = tender.to_response();
	state.store.insert_tender(tender).await;

	tracing::info!(tender_id = %response.id, "tender created");
	Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/tenders/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn get_tender(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TenderResponse>, ServerError> {
	let id: TenderId = parse_id(&id, "tender")?;
	let tender = state
		.store
		.get_tender(id)
		.await
		.ok_or_else(|| ServerError::NotFound("tender".to_string()))?;

	authorize!(&current_user.identity, Action::Read, &tender.resource())?;
	Ok(Json(tender.to_response()))
}
