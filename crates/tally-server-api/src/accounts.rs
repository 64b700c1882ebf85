// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{AccountId, DepartmentId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
	pub id: AccountId,
	pub name: String,
	pub department_id: DepartmentId,
	/// Minor currency units.
	pub balance: i64,
	pub created_by: UserId,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
	pub name: String,
	pub department_id: DepartmentId,
	#[serde(default)]
	pub opening_balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsResponse {
	pub accounts: Vec<AccountResponse>,
}
