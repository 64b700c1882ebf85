// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side navigation guard.
//!
//! ```text
//! evaluate(session)
//!   ├── not authenticated            → RedirectToLogin
//!   ├── required role not satisfied  → Forbidden
//!   ├── required permission missing  → Forbidden
//!   └── otherwise                    → Allow
//! ```

use tally_server_auth::{Action, Role, Subject};

use crate::session::ClientSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
	Allow,
	RedirectToLogin,
	Forbidden,
}

/// Requirements a client route places on the session. With no role or
/// permission set, only authentication is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
	role: Option<Role>,
	permission: Option<(Action, Subject)>,
}

impl RouteGuard {
	pub fn authenticated() -> Self {
		Self::default()
	}

	pub fn require_role(mut self, role: Role) -> Self {
		self.role = Some(role);
		self
	}

	/// Requires an unconditional grant of `action` on `subject`.
	pub fn require_permission(mut self, action: Action, subject: Subject) -> Self {
		self.permission = Some((action, subject));
		self
	}

	pub fn evaluate(&self, session: &ClientSession) -> GuardOutcome {
		if !session.is_authenticated() {
			return GuardOutcome::RedirectToLogin;
		}

		if let Some(role) = self.role {
			if !session.has_role(role) {
				tracing::debug!(required = %role, held = ?session.role(), "route guard: role missing");
				return GuardOutcome::Forbidden;
			}
		}

		if let Some((action, subject)) = self.permission {
			if !session.has_permission(action, subject, None) {
				tracing::debug!(%action, %subject, "route guard: permission missing");
				return GuardOutcome::Forbidden;
			}
		}

		GuardOutcome::Allow
	}
}
