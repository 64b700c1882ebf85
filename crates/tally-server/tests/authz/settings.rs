// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for platform settings.

use axum::http::{Method, StatusCode};
use serde_json::json;
use tally_server_api::SettingsResponse;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn settings_guard_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let update = Some(json!({ "currency": "eur" }));

	let cases = vec![
		AuthzCase {
			name: "manager_reads",
			method: Method::GET,
			path: "/api/settings".to_string(),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "user_reads",
			method: Method::GET,
			path: "/api/settings".to_string(),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user_updates",
			method: Method::PUT,
			path: "/api/settings".to_string(),
			user: Some(f.user.clone()),
			body: update.clone(),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_updates",
			method: Method::PUT,
			path: "/api/settings".to_string(),
			user: None,
			body: update.clone(),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "manager_updates",
			method: Method::PUT,
			path: "/api/settings".to_string(),
			user: Some(f.manager.clone()),
			body: update,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "invalid_month",
			method: Method::PUT,
			path: "/api/settings".to_string(),
			user: Some(f.admin.clone()),
			body: Some(json!({ "fiscal_year_start_month": 13 })),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app.get("/api/settings", Some(&f.admin)).await;
	let settings: SettingsResponse = json_body(response).await;
	assert_eq!(settings.currency, "EUR");
	assert_eq!(settings.fiscal_year_start_month, 1);
}
