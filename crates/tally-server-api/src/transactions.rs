// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{AccountId, TransactionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
	Pending,
	Approved,
	Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
	pub id: TransactionId,
	pub account_id: AccountId,
	/// Minor currency units.
	pub amount: i64,
	pub description: String,
	pub status: TransactionStatus,
	/// Reviewed transactions are locked against further review.
	pub is_locked: bool,
	pub created_by: UserId,
	pub reviewed_by: Option<UserId>,
	pub review_note: Option<String>,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
	pub account_id: AccountId,
	pub amount: i64,
	#[serde(default)]
	pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewTransactionRequest {
	#[serde(default)]
	pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTransactionsResponse {
	pub transactions: Vec<TransactionResponse>,
}
