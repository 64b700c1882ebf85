// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{Action, Condition, Rule, Subject};

use crate::users::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
	pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
	pub refresh_token: String,
}

/// Issued on login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
	pub access_token: String,
	pub refresh_token: String,
	pub token_type: String,
	/// Seconds until the access token expires.
	pub expires_in: i64,
	pub access_expires_at: DateTime<Utc>,
	pub refresh_expires_at: DateTime<Utc>,
	pub user: UserResponse,
}

/// One compiled grant, as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResponse {
	pub action: Action,
	pub subject: Subject,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub conditions: Vec<Condition>,
}

impl From<&Rule> for RuleResponse {
	fn from(rule: &Rule) -> Self {
		Self {
			action: rule.action,
			subject: rule.subject,
			conditions: rule.conditions.to_vec(),
		}
	}
}

/// The caller's profile plus the rules their role compiles to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
	pub user: UserResponse,
	pub rules: Vec<RuleResponse>,
}
