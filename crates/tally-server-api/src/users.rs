// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{DepartmentId, Role, UserId};

/// A user in API responses. Never includes credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
	pub id: UserId,
	pub username: String,
	pub display_name: String,
	pub role: Role,
	pub department_id: Option<DepartmentId>,
	/// Minor currency units.
	pub transaction_limit: Option<i64>,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
	pub username: String,
	pub display_name: String,
	pub password: String,
	/// Defaults to `user`.
	#[serde(default)]
	pub role: Option<Role>,
	#[serde(default)]
	pub department_id: Option<DepartmentId>,
	#[serde(default)]
	pub transaction_limit: Option<i64>,
}

/// Partial profile update. Role changes go through the admin endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
	pub display_name: Option<String>,
	pub department_id: Option<DepartmentId>,
	pub transaction_limit: Option<i64>,
	pub password: Option<String>,
}

/// Body of `PUT /api/admin/users/{id}/role`. Parsed strictly; unknown role
/// names are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
	pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
	pub users: Vec<UserResponse>,
}
