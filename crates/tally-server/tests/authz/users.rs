// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for user management routes.

use axum::http::{Method, StatusCode};
use serde_json::json;
use tally_server_api::{ListUsersResponse, UserResponse};
use tally_server_auth::{Role, UserId};

use super::support::{json_body, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn user_read_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = |id: UserId| format!("/api/users/{id}");

	let cases = vec![
		AuthzCase {
			name: "user_reads_self",
			method: Method::GET,
			path: path(f.user.user.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "user_reads_other_user",
			method: Method::GET,
			path: path(f.other_user.user.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "manager_reads_user",
			method: Method::GET,
			path: path(f.user.user.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "manager_reads_admin",
			method: Method::GET,
			path: path(f.admin.user.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_reads_anyone",
			method: Method::GET,
			path: path(f.manager.user.id),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "guest_reads_user",
			method: Method::GET,
			path: path(f.user.user.id),
			user: Some(f.guest.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "accountant_reads_self",
			method: Method::GET,
			path: path(f.accountant.user.id),
			user: Some(f.accountant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_reads_user",
			method: Method::GET,
			path: path(f.user.user.id),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "malformed_id",
			method: Method::GET,
			path: "/api/users/not-a-uuid".to_string(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn list_only_contains_readable_users() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app.get("/api/users", Some(&f.user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let list: ListUsersResponse = json_body(response).await;
	assert_eq!(list.users.len(), 1);
	assert_eq!(list.users[0].id, f.user.user.id);

	let response = app.get("/api/users", Some(&f.manager)).await;
	let list: ListUsersResponse = json_body(response).await;
	assert!(list.users.iter().all(|u| u.role != Role::Admin));
	assert!(list.users.iter().any(|u| u.id == f.other_user.user.id));

	let response = app.get("/api/users", Some(&f.admin)).await;
	let list: ListUsersResponse = json_body(response).await;
	assert_eq!(list.users.len(), 6);

	let response = app.get("/api/users", Some(&f.guest)).await;
	let list: ListUsersResponse = json_body(response).await;
	assert!(list.users.is_empty());
}

#[tokio::test]
async fn manager_creates_users_but_not_admins() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			"/api/users",
			Some(&f.manager),
			json!({
				"username": "carol",
				"display_name": "Carol",
				"password": "long-enough-password",
				"department_id": f.department_a,
				"transaction_limit": 2500
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created: UserResponse = json_body(response).await;
	assert_eq!(created.role, Role::User);
	assert_eq!(created.transaction_limit, Some(2500));

	let response = app
		.post(
			"/api/users",
			Some(&f.manager),
			json!({
				"username": "eve",
				"display_name": "Eve",
				"password": "long-enough-password",
				"role": "admin"
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_create_validation() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "user_cannot_create_users",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: Some(f.user.clone()),
			body: Some(json!({
				"username": "dave",
				"display_name": "Dave",
				"password": "long-enough-password"
			})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "short_password",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(json!({
				"username": "dave",
				"display_name": "Dave",
				"password": "short"
			})),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "duplicate_username",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(json!({
				"username": "Alice",
				"display_name": "Alice again",
				"password": "long-enough-password"
			})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "unknown_role",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(json!({
				"username": "dave",
				"display_name": "Dave",
				"password": "long-enough-password",
				"role": "superuser"
			})),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app
		.post(
			"/api/users",
			Some(&f.admin),
			json!({
				"username": "grace",
				"display_name": "Grace",
				"password": "long-enough-password",
				"role": "Guest"
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created: UserResponse = json_body(response).await;
	assert_eq!(created.role, Role::Guest);
}

#[tokio::test]
async fn user_can_rename_self_but_not_raise_own_limit() {
	let app = TestApp::new().await;
	let user = &app.fixtures.user;
	let path = format!("/api/users/{}", user.user.id);

	let response = app
		.patch(&path, Some(user), json!({ "display_name": "Alice A." }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let updated: UserResponse = json_body(response).await;
	assert_eq!(updated.display_name, "Alice A.");

	let response = app
		.patch(&path, Some(user), json!({ "transaction_limit": 1_000_000 }))
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let stored = app.state.store.get_user(user.user.id).await.unwrap();
	assert_eq!(stored.transaction_limit, Some(super::support::USER_LIMIT));
}

#[tokio::test]
async fn manager_changes_user_limit() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.patch(
			&format!("/api/users/{}", f.user.user.id),
			Some(&f.manager),
			json!({ "transaction_limit": 7500 }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let updated: UserResponse = json_body(response).await;
	assert_eq!(updated.transaction_limit, Some(7500));
}

#[tokio::test]
async fn delete_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = |id: UserId| format!("/api/users/{id}");

	let cases = vec![
		AuthzCase {
			name: "manager_cannot_delete",
			method: Method::DELETE,
			path: path(f.user.user.id),
			user: Some(f.manager.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user_cannot_delete_self",
			method: Method::DELETE,
			path: path(f.user.user.id),
			user: Some(f.user.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_cannot_delete_self",
			method: Method::DELETE,
			path: path(f.admin.user.id),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "admin_deletes_user",
			method: Method::DELETE,
			path: path(f.other_user.user.id),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_user_is_gone",
			method: Method::GET,
			path: path(f.other_user.user.id),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn deleting_user_revokes_their_refresh_tokens() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.delete(&format!("/api/users/{}", f.other_user.user.id), Some(&f.admin))
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let refresh = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": f.other_user.refresh_token }),
		)
		.await;
	assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}
