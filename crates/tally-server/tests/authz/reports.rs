// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for report routes.

use axum::http::{Method, StatusCode};
use serde_json::json;
use tally_server_api::{ListReportsResponse, ReportExportResponse};
use tally_server_auth::ReportId;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn report_read_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = |id: ReportId| format!("/api/reports/{id}");

	let cases = vec![
		AuthzCase {
			name: "guest_reads_public",
			method: Method::GET,
			path: path(f.public_report.id),
			user: Some(f.guest.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "guest_reads_private",
			method: Method::GET,
			path: path(f.private_report.id),
			user: Some(f.guest.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user_reads_private",
			method: Method::GET,
			path: path(f.private_report.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "accountant_reads_public",
			method: Method::GET,
			path: path(f.public_report.id),
			user: Some(f.accountant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_reads_public",
			method: Method::GET,
			path: path(f.public_report.id),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app.get("/api/reports", Some(&f.guest)).await;
	let list: ListReportsResponse = json_body(response).await;
	assert_eq!(list.reports.len(), 1);
	assert!(list.reports[0].is_public);
}

#[tokio::test]
async fn report_write_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let export = |id: ReportId| format!("/api/reports/{id}/export");

	let cases = vec![
		AuthzCase {
			name: "user_cannot_create_report",
			method: Method::POST,
			path: "/api/reports".to_string(),
			user: Some(f.user.clone()),
			body: Some(json!({ "title": "Q3", "is_public": true })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "manager_creates_report",
			method: Method::POST,
			path: "/api/reports".to_string(),
			user: Some(f.manager.clone()),
			body: Some(json!({ "title": "Q3", "is_public": false })),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "user_cannot_export",
			method: Method::GET,
			path: export(f.public_report.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "guest_cannot_export",
			method: Method::GET,
			path: export(f.public_report.id),
			user: Some(f.guest.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn export_covers_the_report_department() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.get(
			&format!("/api/reports/{}/export", f.public_report.id),
			Some(&f.manager),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let export: ReportExportResponse = json_body(response).await;
	assert_eq!(export.format, "csv");
	assert!(export.content.contains(&f.account_a.id.to_string()));
	assert!(!export.content.contains(&f.account_b.id.to_string()));

	let response = app
		.get(
			&format!("/api/reports/{}/export", f.private_report.id),
			Some(&f.admin),
		)
		.await;
	let export: ReportExportResponse = json_body(response).await;
	assert_eq!(export.content.lines().count(), 3);
}
