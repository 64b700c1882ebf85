// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login, token rotation and session introspection.

use axum::http::StatusCode;
use serde_json::json;
use tally_server_api::{MeResponse, TokenResponse};
use tally_server_auth::{verify_password, Action, Condition, Role, Subject};

use super::support::{json_body, TestApp, TEST_PASSWORD};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_with_valid_credentials_issues_tokens() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/auth/login",
			None,
			json!({ "username": "alice", "password": TEST_PASSWORD }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let tokens: TokenResponse = json_body(response).await;
	assert_eq!(tokens.token_type, "Bearer");
	assert!(tokens.expires_in > 0);
	assert_eq!(tokens.user.id, app.fixtures.user.user.id);
	assert_eq!(tokens.user.role, Role::User);

	let me = app
		.get_with_authorization("/auth/me", &format!("Bearer {}", tokens.access_token))
		.await;
	assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_username_is_case_insensitive() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/auth/login",
			None,
			json!({ "username": "ALICE", "password": TEST_PASSWORD }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_credentials_identically() {
	let app = TestApp::new().await;

	let wrong_password = app
		.post(
			"/auth/login",
			None,
			json!({ "username": "alice", "password": "not-the-password" }),
		)
		.await;
	let unknown_user = app
		.post(
			"/auth/login",
			None,
			json!({ "username": "mallory", "password": TEST_PASSWORD }),
		)
		.await;

	assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

	let a: serde_json::Value = json_body(wrong_password).await;
	let b: serde_json::Value = json_body(unknown_user).await;
	assert_eq!(a, b);

	// Unknown usernames still pay for a full Argon2 verification.
	assert!(app.state.login_decoy_hash.starts_with("$argon2id$"));
	assert!(!verify_password(TEST_PASSWORD, &app.state.login_decoy_hash));
}

// ============================================================================
// Refresh and logout
// ============================================================================

#[tokio::test]
async fn refresh_rotates_and_rejects_reuse() {
	let app = TestApp::new().await;
	let refresh_token = app.fixtures.user.refresh_token.clone();

	let first = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": refresh_token }),
		)
		.await;
	assert_eq!(first.status(), StatusCode::OK);
	let rotated: TokenResponse = json_body(first).await;
	assert_ne!(rotated.refresh_token, refresh_token);

	let replay = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": refresh_token }),
		)
		.await;
	assert_eq!(
		replay.status(),
		StatusCode::UNAUTHORIZED,
		"A consumed refresh token must not be accepted again"
	);

	let next = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": rotated.refresh_token }),
		)
		.await;
	assert_eq!(next.status(), StatusCode::OK);
}

#[tokio::test]
async fn access_token_cannot_be_used_to_refresh() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": app.fixtures.user.access_token }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_refresh_token() {
	let app = TestApp::new().await;
	let user = &app.fixtures.user;

	let response = app
		.post(
			"/auth/logout",
			Some(user),
			json!({ "refresh_token": user.refresh_token }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let refresh = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": user.refresh_token }),
		)
		.await;
	assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_cannot_revoke_another_users_token() {
	let app = TestApp::new().await;
	let victim = &app.fixtures.other_user;

	let response = app
		.post(
			"/auth/logout",
			Some(&app.fixtures.user),
			json!({ "refresh_token": victim.refresh_token }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let refresh = app
		.post(
			"/auth/refresh",
			None,
			json!({ "refresh_token": victim.refresh_token }),
		)
		.await;
	assert_eq!(refresh.status(), StatusCode::OK);
}

// ============================================================================
// Session introspection
// ============================================================================

#[tokio::test]
async fn me_requires_authentication() {
	let app = TestApp::new().await;

	assert_eq!(
		app.get("/auth/me", None).await.status(),
		StatusCode::UNAUTHORIZED
	);
	assert_eq!(
		app
			.get_with_authorization("/auth/me", "Bearer not-a-jwt")
			.await
			.status(),
		StatusCode::UNAUTHORIZED
	);
	assert_eq!(
		app
			.get_with_authorization("/auth/me", "Basic YWxpY2U6cGFzcw==")
			.await
			.status(),
		StatusCode::UNAUTHORIZED
	);
}

#[tokio::test]
async fn me_returns_compiled_rules() {
	let app = TestApp::new().await;

	let response = app.get("/auth/me", Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let me: MeResponse = json_body(response).await;
	assert_eq!(me.user.role, Role::Admin);
	assert_eq!(me.rules.len(), 1);
	assert_eq!(me.rules[0].action, Action::Manage);
	assert_eq!(me.rules[0].subject, Subject::All);
	assert!(me.rules[0].conditions.is_empty());

	let response = app.get("/auth/me", Some(&app.fixtures.guest)).await;
	let me: MeResponse = json_body(response).await;
	assert!(!me.rules.is_empty());
	assert!(me
		.rules
		.iter()
		.all(|r| r.action == Action::Read && r.conditions == [Condition::IsPublic]));
}

#[tokio::test]
async fn accountant_session_has_no_rules() {
	let app = TestApp::new().await;

	let response = app.get("/auth/me", Some(&app.fixtures.accountant)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let me: MeResponse = json_body(response).await;
	assert!(me.rules.is_empty());
}

#[tokio::test]
async fn health_is_public() {
	let app = TestApp::new().await;
	assert_eq!(app.get("/health", None).await.status(), StatusCode::OK);
}
