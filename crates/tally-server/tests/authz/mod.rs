// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod accounts;
mod auth;
mod dashboard;
mod reports;
mod settings;
mod tenders;
mod transactions;
mod users;
