// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared configuration helpers.
//!
//! Re-exports [`Secret`] and provides [`load_secret_env`], which reads a
//! secret from `VAR` or from the file named by `VAR_FILE`.

pub mod env;

pub use tally_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, SecretEnvError};
