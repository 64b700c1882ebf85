// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{TenderId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderResponse {
	pub id: TenderId,
	pub title: String,
	pub start_date: DateTime<Utc>,
	pub end_date: DateTime<Utc>,
	pub is_closed: bool,
	pub participants: Vec<UserId>,
	pub created_by: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenderRequest {
	pub title: String,
	pub start_date: DateTime<Utc>,
	pub end_date: DateTime<Utc>,
	#[serde(default)]
	pub participants: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTendersResponse {
	pub tenders: Vec<TenderResponse>,
}
