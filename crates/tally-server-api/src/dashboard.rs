// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Counts of what the caller can see, not global totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
	pub accounts: usize,
	pub pending_transactions: usize,
	pub active_tenders: usize,
	pub reports: usize,
}
