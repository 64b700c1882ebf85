// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{Duration, Utc};
use tally_server_api::{TokenResponse, UserResponse};
use tally_server_auth::{DepartmentId, Role, UserId};

use crate::state::SessionState;

pub fn sample_tokens(role: Role) -> TokenResponse {
	let now = Utc::now();
	TokenResponse {
		access_token: format!("access-{role}"),
		refresh_token: format!("refresh-{role}"),
		token_type: "Bearer".to_string(),
		expires_in: 900,
		access_expires_at: now + Duration::minutes(15),
		refresh_expires_at: now + Duration::days(7),
		user: UserResponse {
			id: UserId::generate(),
			username: role.to_string(),
			display_name: role.to_string(),
			role,
			department_id: Some(DepartmentId::generate()),
			transaction_limit: Some(5_000),
			created_at: now,
		},
	}
}

pub fn sample_state(role: Role) -> SessionState {
	sample_tokens(role).into()
}
