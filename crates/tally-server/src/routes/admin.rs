// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin-only handlers. The router guards these with `RequireRole::admin()`.

use axum::{
	extract::{Path, State},
	Json,
};
use tally_server_api::{UpdateRoleRequest, UserResponse};
use tally_server_auth::{Role, UserId};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError, routes::parse_id};

/// PUT /api/admin/users/{id}/role
///
/// The new role reaches the user's access token at their next refresh.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn update_user_role(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ServerError> {
	let target: UserId = parse_id(&id, "user")?;
	let role: Role = body
		.role
		.parse()
		.map_err(|e: tally_server_auth::UnknownRole| ServerError::BadRequest(e.to_string()))?;

	if target == current_user.id() && role != Role::Admin {
		return Err(ServerError::BadRequest(
			"admins cannot demote themselves".to_string(),
		));
	}

	let mut previous = None;
	let updated = state
		.store
		.update_user(target, |u| {
			previous = Some(u.role);
			u.role = role;
		})
		.await?;

	tracing::info!(
		target_user_id = %updated.id,
		from = ?previous,
		to = %role,
		"user role changed"
	);
	Ok(Json(updated.to_response()))
}
