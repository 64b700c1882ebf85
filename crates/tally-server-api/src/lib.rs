// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod reports;
pub mod settings;
pub mod tenders;
pub mod transactions;
pub mod users;

use serde::{Deserialize, Serialize};

pub use accounts::{AccountResponse, CreateAccountRequest, ListAccountsResponse};
pub use auth::{
	LoginRequest, LogoutRequest, MeResponse, RefreshRequest, RuleResponse, TokenResponse,
};
pub use dashboard::DashboardResponse;
pub use reports::{CreateReportRequest, ListReportsResponse, ReportExportResponse, ReportResponse};
pub use settings::{SettingsResponse, UpdateSettingsRequest};
pub use tenders::{CreateTenderRequest, ListTendersResponse, TenderResponse};
pub use transactions::{
	CreateTransactionRequest, ListTransactionsResponse, ReviewTransactionRequest,
	TransactionResponse, TransactionStatus,
};
pub use users::{
	CreateUserRequest, ListUsersResponse, UpdateRoleRequest, UpdateUserRequest, UserResponse,
};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Stable machine-readable code, e.g. `forbidden`.
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

/// Generic success body for endpoints with nothing else to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
	pub message: String,
}
