// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Tenant-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
	/// ISO 4217 code.
	pub currency: String,
	/// 1-12.
	pub fiscal_year_start_month: u8,
	/// Review threshold, in minor units.
	pub approval_threshold: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
	pub currency: Option<String>,
	pub fiscal_year_start_month: Option<u8>,
	pub approval_threshold: Option<i64>,
}
