// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The dashboard is guarded by a route layer before the handler runs.

use axum::http::{Method, StatusCode};
use tally_server_api::DashboardResponse;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn dashboard_guard_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let case = |name, user: Option<&super::support::TestUser>, expected_status| AuthzCase {
		name,
		method: Method::GET,
		path: "/api/dashboard".to_string(),
		user: user.cloned(),
		body: None,
		expected_status,
	};

	let cases = vec![
		case("admin", Some(&f.admin), StatusCode::OK),
		case("manager", Some(&f.manager), StatusCode::OK),
		case("user", Some(&f.user), StatusCode::OK),
		// Guest access depends on a public resource, never granted for the bare subject.
		case("guest", Some(&f.guest), StatusCode::FORBIDDEN),
		case("accountant", Some(&f.accountant), StatusCode::FORBIDDEN),
		case("anonymous", None, StatusCode::UNAUTHORIZED),
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn dashboard_counts_what_the_caller_can_read() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app.get("/api/dashboard", Some(&f.user)).await;
	let user_view: DashboardResponse = json_body(response).await;
	assert_eq!(user_view.accounts, 1);
	assert_eq!(user_view.pending_transactions, 1);
	assert_eq!(user_view.active_tenders, 1);
	assert_eq!(user_view.reports, 2);

	let response = app.get("/api/dashboard", Some(&f.admin)).await;
	let admin_view: DashboardResponse = json_body(response).await;
	assert_eq!(admin_view.accounts, 2);
	assert_eq!(admin_view.active_tenders, 1);
}
