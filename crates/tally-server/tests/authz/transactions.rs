// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for transaction routes, including the per-user
//! transaction limit and review locking.

use axum::http::{Method, StatusCode};
use serde_json::json;
use tally_server_api::{ListTransactionsResponse, TransactionResponse, TransactionStatus};

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp, USER_LIMIT};

#[tokio::test]
async fn transaction_limit_is_enforced_on_create() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let create = |amount: i64| {
		Some(json!({
			"account_id": f.account_a.id,
			"amount": amount,
			"description": "Supplies"
		}))
	};

	let cases = vec![
		AuthzCase {
			name: "within_limit",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.user.clone()),
			body: create(4_000),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "exactly_at_limit",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.user.clone()),
			body: create(USER_LIMIT),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "over_limit",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.user.clone()),
			body: create(6_000),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user_without_limit",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.other_user.clone()),
			body: Some(json!({ "account_id": f.account_b.id, "amount": 10 })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "negative_amount",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.user.clone()),
			body: create(-100),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "manager_has_no_limit",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.manager.clone()),
			body: create(1_000_000),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "guest_cannot_post",
			method: Method::POST,
			path: "/api/transactions".to_string(),
			user: Some(f.guest.clone()),
			body: create(1),
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn posting_to_unreadable_account_is_forbidden() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			"/api/transactions",
			Some(&f.user),
			json!({ "account_id": f.account_b.id, "amount": 100 }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn users_only_see_transactions_within_their_limit() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			"/api/transactions",
			Some(&f.manager),
			json!({ "account_id": f.account_a.id, "amount": 9_000 }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let large: TransactionResponse = json_body(response).await;

	let response = app.get("/api/transactions", Some(&f.user)).await;
	let list: ListTransactionsResponse = json_body(response).await;
	assert!(list.transactions.iter().all(|t| t.amount <= USER_LIMIT));
	assert!(list
		.transactions
		.iter()
		.any(|t| t.id == f.pending_transaction.id));

	let response = app
		.get(&format!("/api/transactions/{}", large.id), Some(&f.user))
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn approval_locks_the_transaction() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let approve = format!("/api/transactions/{}/approve", f.pending_transaction.id);
	let reject = format!("/api/transactions/{}/reject", f.pending_transaction.id);

	let response = app.post(&approve, Some(&f.user), json!({})).await;
	assert_eq!(
		response.status(),
		StatusCode::FORBIDDEN,
		"Users cannot approve transactions"
	);

	let response = app
		.post(&approve, Some(&f.manager), json!({ "note": "Matches invoice" }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let approved: TransactionResponse = json_body(response).await;
	assert_eq!(approved.status, TransactionStatus::Approved);
	assert!(approved.is_locked);
	assert_eq!(approved.reviewed_by, Some(f.manager.user.id));
	assert_eq!(approved.review_note.as_deref(), Some("Matches invoice"));

	let account = app.state.store.get_account(f.account_a.id).await.unwrap();
	assert_eq!(
		account.balance,
		f.account_a.balance + f.pending_transaction.amount
	);

	let response = app.post(&reject, Some(&f.admin), json!({})).await;
	assert_eq!(
		response.status(),
		StatusCode::CONFLICT,
		"A locked transaction cannot be reviewed again"
	);
}

#[tokio::test]
async fn rejection_leaves_balance_untouched() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&format!("/api/transactions/{}/reject", f.pending_transaction.id),
			Some(&f.manager),
			json!({}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let rejected: TransactionResponse = json_body(response).await;
	assert_eq!(rejected.status, TransactionStatus::Rejected);
	assert!(rejected.is_locked);
	assert!(rejected.review_note.is_none());

	let account = app.state.store.get_account(f.account_a.id).await.unwrap();
	assert_eq!(account.balance, f.account_a.balance);
}
