// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for account routes.

use axum::http::{Method, StatusCode};
use serde_json::json;
use tally_server_api::ListAccountsResponse;
use tally_server_auth::AccountId;

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn users_see_only_their_department() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = |id: AccountId| format!("/api/accounts/{id}");

	let cases = vec![
		AuthzCase {
			name: "user_reads_own_department",
			method: Method::GET,
			path: path(f.account_a.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "user_reads_other_department",
			method: Method::GET,
			path: path(f.account_b.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "manager_reads_any_department",
			method: Method::GET,
			path: path(f.account_b.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "accountant_reads_own_department",
			method: Method::GET,
			path: path(f.account_a.id),
			user: Some(f.accountant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_account",
			method: Method::GET,
			path: path(AccountId::generate()),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app.get("/api/accounts", Some(&f.user)).await;
	let list: ListAccountsResponse = json_body(response).await;
	assert_eq!(list.accounts.len(), 1);
	assert_eq!(list.accounts[0].id, f.account_a.id);
	assert_eq!(list.accounts[0].department_id, f.department_a);

	let response = app.get("/api/accounts", Some(&f.other_user)).await;
	let list: ListAccountsResponse = json_body(response).await;
	assert_eq!(list.accounts.len(), 1);
	assert_eq!(list.accounts[0].id, f.account_b.id);
	assert_eq!(list.accounts[0].department_id, f.department_b);
}

#[tokio::test]
async fn account_write_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "user_cannot_create_account",
			method: Method::POST,
			path: "/api/accounts".to_string(),
			user: Some(f.user.clone()),
			body: Some(json!({ "name": "Petty cash", "department_id": f.department_a })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "manager_creates_account",
			method: Method::POST,
			path: "/api/accounts".to_string(),
			user: Some(f.manager.clone()),
			body: Some(json!({ "name": "Petty cash", "department_id": f.department_a })),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "blank_account_name",
			method: Method::POST,
			path: "/api/accounts".to_string(),
			user: Some(f.manager.clone()),
			body: Some(json!({ "name": "  ", "department_id": f.department_a })),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "user_cannot_delete_account",
			method: Method::DELETE,
			path: format!("/api/accounts/{}", f.account_b.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "account_with_transactions_is_kept",
			method: Method::DELETE,
			path: format!("/api/accounts/{}", f.account_a.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "manager_deletes_empty_account",
			method: Method::DELETE,
			path: format!("/api/accounts/{}", f.account_b.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
}
