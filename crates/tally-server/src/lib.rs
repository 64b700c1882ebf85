// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tally financial platform server.
//!
//! This crate provides the HTTP API for accounts, transactions, tenders and
//! reports, with every route gated by the role-based ability model in
//! `tally-server-auth`.

pub mod api;
pub mod auth_middleware;
pub mod authz_middleware;
pub mod error;
pub mod routes;
pub mod store;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use tally_server_config::ServerConfig;
