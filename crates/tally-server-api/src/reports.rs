// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_server_auth::{DepartmentId, ReportId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
	pub id: ReportId,
	pub title: String,
	pub is_public: bool,
	pub department_id: Option<DepartmentId>,
	pub created_by: UserId,
	pub created_at: DateTime<Utc>,
}

/// A report covers one department's accounts, or every account when
/// `department_id` is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
	pub title: String,
	#[serde(default)]
	pub is_public: bool,
	#[serde(default)]
	pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReportsResponse {
	pub reports: Vec<ReportResponse>,
}

/// CSV rendering of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExportResponse {
	pub report_id: ReportId,
	pub format: String,
	pub content: String,
}
