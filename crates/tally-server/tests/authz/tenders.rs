// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for tender routes.

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tally_server_api::{ListTendersResponse, TenderResponse};
use tally_server_auth::TenderId;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn users_only_read_active_tenders() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = |id: TenderId| format!("/api/tenders/{id}");

	let cases = vec![
		AuthzCase {
			name: "user_reads_active",
			method: Method::GET,
			path: path(f.active_tender.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "user_reads_closed",
			method: Method::GET,
			path: path(f.closed_tender.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "manager_reads_closed",
			method: Method::GET,
			path: path(f.closed_tender.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "guest_reads_active",
			method: Method::GET,
			path: path(f.active_tender.id),
			user: Some(f.guest.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app.get("/api/tenders", Some(&f.user)).await;
	let list: ListTendersResponse = json_body(response).await;
	assert_eq!(list.tenders.len(), 1);
	assert_eq!(list.tenders[0].id, f.active_tender.id);
}

#[tokio::test]
async fn only_managers_create_tenders() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let now = Utc::now();
	let body = json!({
		"title": "Cleaning services",
		"start_date": now,
		"end_date": now + Duration::days(14),
		"participants": [f.user.user.id, f.other_user.user.id, f.user.user.id]
	});

	let response = app.post("/api/tenders", Some(&f.user), body.clone()).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let response = app.post("/api/tenders", Some(&f.manager), body).await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created: TenderResponse = json_body(response).await;
	assert_eq!(created.participants.len(), 2);
	assert!(!created.is_closed);

	let response = app
		.post(
			"/api/tenders",
			Some(&f.manager),
			json!({
				"title": "Backwards",
				"start_date": now,
				"end_date": now - Duration::days(1)
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
