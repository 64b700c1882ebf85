// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Report handlers, including CSV export of account balances.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Utc;
use serde::Serialize;
use tally_server_api::{
	CreateReportRequest, ListReportsResponse, ReportExportResponse, ReportResponse,
};
use tally_server_auth::{
	has_permission, AccountId, Action, DepartmentId, ReportId, ResourceAttrs, Subject,
};

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	authorize,
	error::ServerError,
	routes::parse_id,
	store::{AccountRecord, ReportRecord},
};

/// One line of an exported report.
#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
	account_id: AccountId,
	name: &'a str,
	department_id: DepartmentId,
	balance: i64,
}

async fn load_report(state: &AppState, raw_id: &str) -> Result<ReportRecord, ServerError> {
	let id: ReportId = parse_id(raw_id, "report")?;
	state
		.store
		.get_report(id)
		.await
		.ok_or_else(|| ServerError::NotFound("report".to_string()))
}

/// GET /api/reports
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn list_reports(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<ListReportsResponse> {
	let identity = &current_user.identity;
	let reports = state
		.store
		.list_reports()
		.await
		.into_iter()
		.filter(|r| {
			has_permission(
				Some(identity),
				Action::Read,
				Subject::Report,
				Some(&r.resource()),
			)
		})
		.map(|r| r.to_response())
		.collect();

	Json(ListReportsResponse { reports })
}

/// POST /api/reports
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn create_report(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), ServerError> {
	let mut target = ResourceAttrs::report(body.is_public).with_created_by(current_user.id());
	if let Some(department_id) = body.department_id {
		target = target.with_department(department_id);
	}
	authorize!(&current_user.identity, Action::Create, &target)?;

	let title = body.title.trim();
	if title.is_empty() {
		return Err(ServerError::BadRequest("title is required".to_string()));
	}

	let report = ReportRecord {
		id: ReportId::generate(),
		title: title.to_string(),
		is_public: body.is_public,
		department_id: body.department_id,
		created_by: current_user.id(),
		created_at: Utc::now(),
	};
	let response = report.to_response();
	state.store.insert_report(report).await;

	tracing::info!(report_id = %response.id, is_public = response.is_public, "report created");
	Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/reports/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn get_report(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ReportResponse>, ServerError> {
	let report = load_report(&state, &id).await?;
	authorize!(&current_user.identity, Action::Read, &report.resource())?;
	Ok(Json(report.to_response()))
}

/// GET /api/reports/{id}/export
///
/// Balances of the accounts the report covers, as CSV.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn export_report(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ReportExportResponse>, ServerError> {
	let report = load_report(&state, &id).await?;
	authorize!(&current_user.identity, Action::Export, &report.resource())?;

	let accounts: Vec<AccountRecord> = state
		.store
		.list_accounts()
		.await
		.into_iter()
		.filter(|a| match report.department_id {
			Some(department_id) => a.department_id == department_id,
			None => true,
		})
		.collect();

	tracing::info!(report_id = %report.id, rows = accounts.len(), "report exported");
	Ok(Json(ReportExportResponse {
		report_id: report.id,
		format: "csv".to_string(),
		content: render_csv(&accounts).await?,
	}))
}

/// Header row is emitted with the first record, so an empty export is empty.
async fn render_csv(accounts: &[AccountRecord]) -> Result<String, ServerError> {
	let mut serializer = csv_async::AsyncSerializer::from_writer(Vec::new());
	for account in accounts {
		serializer
			.serialize(BalanceRow {
				account_id: account.id,
				name: &account.name,
				department_id: account.department_id,
				balance: account.balance,
			})
			.await
			.map_err(|e| ServerError::Internal(format!("csv export failed: {e}")))?;
	}
	let bytes = serializer
		.into_inner()
		.await
		.map_err(|e| ServerError::Internal(format!("csv export failed: {e}")))?;
	String::from_utf8(bytes).map_err(|e| ServerError::Internal(format!("csv export failed: {e}")))
}
