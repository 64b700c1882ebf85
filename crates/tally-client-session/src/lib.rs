// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side session handling for Tally.
//!
//! - [`ClientSession`]: the signed-in user, their tokens, and role and
//!   permission checks evaluated with the same ability model as the server
//! - [`SessionStore`]: where sessions live between runs ([`FileSessionStore`],
//!   [`MemorySessionStore`])
//! - [`RouteGuard`]: gates client navigation

pub mod error;
pub mod guard;
pub mod session;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::SessionError;
pub use guard::{GuardOutcome, RouteGuard};
pub use session::{ClientSession, DEFAULT_REFRESH_SKEW_SECS};
pub use state::{PersistedSession, SessionState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
