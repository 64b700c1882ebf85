// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User management HTTP handlers.
//!
//! Every endpoint checks the concrete user record: users see and edit only
//! themselves, managers handle everyone except admins, admins handle all.
//! Department and transaction-limit changes additionally require the manager
//! role, so a user cannot raise their own limit.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Utc;
use tally_server_api::{CreateUserRequest, ListUsersResponse, UpdateUserRequest, UserResponse};
use tally_server_auth::{
	has_permission, hash_password, Action, Requirement, ResourceAttrs, Role, Subject, UserId,
};

use crate::{
	api::AppState, auth_middleware::RequireAuth, authorize, error::ServerError, routes::parse_id,
	store::UserRecord,
};

const MIN_PASSWORD_LEN: usize = 8;

fn validate_password(password: &str) -> Result<(), ServerError> {
	if password.chars().count() < MIN_PASSWORD_LEN {
		return Err(ServerError::BadRequest(format!(
			"password must be at least {MIN_PASSWORD_LEN} characters"
		)));
	}
	Ok(())
}

fn validate_limit(limit: Option<i64>) -> Result<(), ServerError> {
	match limit {
		Some(limit) if limit < 0 => Err(ServerError::BadRequest(
			"transaction_limit must not be negative".to_string(),
		)),
		_ => Ok(()),
	}
}

async fn load_user(state: &AppState, raw_id: &str) -> Result<UserRecord, ServerError> {
	let id: UserId = parse_id(raw_id, "user")?;
	state
		.store
		.get_user(id)
		.await
		.ok_or_else(|| ServerError::NotFound("user".to_string()))
}

/// GET /api/users
///
/// Lists the users the caller may read.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id()))]
pub async fn list_users(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Json<ListUsersResponse> {
	let identity = &current_user.identity;
	let users = state
		.store
		.list_users()
		.await
		.into_iter()
		.filter(|u| {
			has_permission(
				Some(identity),
				Action::Read,
				Subject::User,
				Some(&u.resource()),
			)
		})
		.map(|u| u.to_response())
		.collect();

	Json(ListUsersResponse { users })
}

/// POST /api/users
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), username = %body.username))]
pub async fn create_user(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ServerError> {
	let role = body.role.unwrap_or(Role::User);
	if role == Role::Unknown {
		return Err(ServerError::BadRequest("unknown role".to_string()));
	}

	let mut target = ResourceAttrs::new(Subject::User).with_role(role);
	if let Some(department_id) = body.department_id {
		target = target.with_department(department_id);
	}
	authorize!(&current_user.identity, Action::Create, &target)?;

	let username = body.username.trim();
	if username.is_empty() {
		return Err(ServerError::BadRequest("username is required".to_string()));
	}
	validate_password(&body.password)?;
	validate_limit(body.transaction_limit)?;

	let display_name = match body.display_name.trim() {
		"" => username.to_string(),
		name => name.to_string(),
	};

	let user = UserRecord {
		id: UserId::generate(),
		username: username.to_string(),
		display_name,
		password_hash: hash_password(&body.password)?,
		role,
		department_id: body.department_id,
		transaction_limit: body.transaction_limit,
		created_at: Utc::now(),
	};
	let response = user.to_response();
	state.store.insert_user(user).await?;

	tracing::info!(new_user_id = %response.id, %role, "user created");
	Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/users/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn get_user(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<UserResponse>, ServerError> {
	let user = load_user(&state, &id).await?;
	authorize!(&current_user.identity, Action::Read, &user.resource())?;
	Ok(Json(user.to_response()))
}

/// PATCH /api/users/{id}
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn update_user(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ServerError> {
	let user = load_user(&state, &id).await?;
	let identity = &current_user.identity;
	authorize!(identity, Action::Update, &user.resource())?;

	if body.department_id.is_some() || body.transaction_limit.is_some() {
		let decision =
			tally_server_auth::authorize(Some(identity), Requirement::Role(Role::Manager));
		if !decision.is_allowed() {
			return Err(ServerError::Forbidden(
				"Changing department or transaction limit requires a manager".to_string(),
			));
		}
		validate_limit(body.transaction_limit)?;
	}

	let password_hash = match &body.password {
		Some(password) => {
			validate_password(password)?;
			Some(hash_password(password)?)
		}
		None => None,
	};

	let updated = state
		.store
		.update_user(user.id, |u| {
			if let Some(name) = body.display_name.as_deref().map(str::trim) {
				if !name.is_empty() {
					u.display_name = name.to_string();
				}
			}
			if let Some(department_id) = body.department_id {
				u.department_id = Some(department_id);
			}
			if let Some(limit) = body.transaction_limit {
				u.transaction_limit = Some(limit);
			}
			if let Some(hash) = password_hash {
				u.password_hash = hash;
			}
		})
		.await?;

	tracing::info!(target_user_id = %updated.id, "user updated");
	Ok(Json(updated.to_response()))
}

/// DELETE /api/users/{id}
///
/// Also revokes the deleted user's refresh tokens.
#[tracing::instrument(skip_all, fields(user_id = %current_user.id(), %id))]
pub async fn delete_user(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
	let user = load_user(&state, &id).await?;
	authorize!(&current_user.identity, Action::Delete, &user.resource())?;

	if user.id == current_user.id() {
		return Err(ServerError::BadRequest(
			"you cannot delete your own account".to_string(),
		));
	}

	state.store.delete_user(user.id).await?;
	let revoked = state.refresh_tokens.revoke_all_for_user(user.id).await;

	tracing::info!(target_user_id = %user.id, revoked, "user deleted");
	Ok(StatusCode::NO_CONTENT)
}
