// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for tally-server.

pub mod auth;
pub mod bootstrap;
pub mod http;
pub mod logging;

pub use auth::{AuthConfig, AuthConfigLayer, MIN_JWT_SECRET_BYTES};
pub use bootstrap::{BootstrapConfig, BootstrapConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
