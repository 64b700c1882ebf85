// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session endpoints: login, refresh rotation, logout and `/auth/me`.
//!
//! Refresh tokens are single use. Each successful refresh consumes the
//! presented token's digest and registers the new one, and the new access
//! token is built from the stored user record so role changes apply from the
//! next refresh on.

use axum::{extract::State, Json};
use tally_server_api::{
	LoginRequest, LogoutRequest, MeResponse, RefreshRequest, RuleResponse, SuccessResponse,
	TokenResponse,
};
use tally_server_auth::{
	define_abilities_for, hash_refresh_token, verify_password, TokenKind,
};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError, store::UserRecord};

fn invalid_credentials() -> ServerError {
	ServerError::Unauthorized("Invalid username or password".to_string())
}

async fn issue_tokens(state: &AppState, user: &UserRecord) -> Result<TokenResponse, ServerError> {
	let pair = state.signer.issue_pair(&user.identity())?;
	state
		.refresh_tokens
		.register(hash_refresh_token(pair.refresh_token.expose()), user.id)
		.await;

	Ok(TokenResponse {
		access_token: pair.access_token.expose().clone(),
		refresh_token: pair.refresh_token.expose().clone(),
		token_type: "Bearer".to_string(),
		expires_in: state.signer.access_ttl().num_seconds(),
		access_expires_at: pair.access_expires_at,
		refresh_expires_at: pair.refresh_expires_at,
		user: user.to_response(),
	})
}

/// POST /auth/login
#[tracing::instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
	State(state): State<AppState>,
	Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
	let Some(user) = state.store.find_user_by_username(&body.username).await else {
		let _ = verify_password(&body.password, &state.login_decoy_hash);
		tracing::info!("login failed: unknown username");
		return Err(invalid_credentials());
	};

	if !verify_password(&body.password, &user.password_hash) {
		tracing::info!(user_id = %user.id, "login failed: wrong password");
		return Err(invalid_credentials());
	}

	let response = issue_tokens(&state, &user).await?;
	tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
	Ok(Json(response))
}

/// POST /auth/refresh
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn refresh(
	State(state): State<AppState>,
	Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
	let claims = state
		.signer
		.verify(&body.refresh_token, TokenKind::Refresh)?;
	tracing::Span::current().record("user_id", tracing::field::display(claims.sub));

	let digest = hash_refresh_token(&body.refresh_token);
	match state.refresh_tokens.consume(&digest).await {
		Some(owner) if owner == claims.sub => {}
		_ => {
			tracing::info!("refresh rejected: token is not live");
			return Err(ServerError::Unauthorized(
				"Refresh token is no longer valid".to_string(),
			));
		}
	}

	let user = state
		.store
		.get_user(claims.sub)
		.await
		.ok_or_else(|| ServerError::Unauthorized("Account no longer exists".to_string()))?;

	let response = issue_tokens(&state, &user).await?;
	tracing::debug!("refresh token rotated");
	Ok(Json(response))
}

/// POST /auth/logout
///
/// Revokes the given refresh token if it belongs to the caller. Always
/// succeeds, so repeated logouts are harmless.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn logout(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<LogoutRequest>,
) -> Json<SuccessResponse> {
	let digest = hash_refresh_token(&body.refresh_token);
	let revoked = state
		.refresh_tokens
		.revoke(&digest, current_user.id())
		.await;
	tracing::info!(revoked, "logout");

	Json(SuccessResponse {
		message: "Logged out".to_string(),
	})
}

/// GET /auth/me
///
/// The caller's profile plus the rules compiled from the access token's
/// identity.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn me(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<Json<MeResponse>, ServerError> {
	let user = state
		.store
		.get_user(current_user.id())
		.await
		.ok_or_else(|| ServerError::Unauthorized("Account no longer exists".to_string()))?;

	let ability = define_abilities_for(Some(&current_user.identity));
	let rules = ability.rules().iter().map(RuleResponse::from).collect();

	Ok(Json(MeResponse {
		user: user.to_response(),
		rules,
	}))
}
