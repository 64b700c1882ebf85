// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The single authorization entry point.
//!
//! Both capability checks and role checks go through [`authorize`]. Route
//! layers, handler helpers and the client session's role and permission
//! checks share one decision procedure and one log line format.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::ability::{define_abilities_for, role_satisfies, ResourceAttrs};
use crate::{Action, Identity, Role, Subject};

/// What the caller needs.
#[derive(Debug, Clone, Copy)]
pub enum Requirement<'a> {
	/// Perform `action` on `subject`, optionally on a concrete resource of
	/// that subject.
	Capability {
		action: Action,
		subject: Subject,
		resource: Option<&'a ResourceAttrs>,
	},
	/// Hold `Role` or a role above it in the hierarchy.
	Role(Role),
}

impl<'a> Requirement<'a> {
	pub fn capability(action: Action, subject: Subject) -> Self {
		Requirement::Capability {
			action,
			subject,
			resource: None,
		}
	}

	pub fn on_resource(action: Action, resource: &'a ResourceAttrs) -> Self {
		Requirement::Capability {
			action,
			subject: resource.subject,
			resource: Some(resource),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// No identity was presented.
	Unauthenticated,
	/// A role requirement was not met.
	MissingRole,
	/// The identity's ability does not grant the capability.
	Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Allow,
	Deny(DenyReason),
}

impl Decision {
	pub fn is_allowed(self) -> bool {
		matches!(self, Decision::Allow)
	}

	pub fn deny_reason(self) -> Option<DenyReason> {
		match self {
			Decision::Allow => None,
			Decision::Deny(reason) => Some(reason),
		}
	}
}

/// Decide whether `identity` satisfies `requirement`.
#[instrument(
	level = "debug",
	skip(identity, requirement),
	fields(user_id = ?identity.map(|i| i.id))
)]
pub fn authorize(identity: Option<&Identity>, requirement: Requirement<'_>) -> Decision {
	let Some(identity) = identity else {
		info!(?requirement, "denied: unauthenticated");
		return Decision::Deny(DenyReason::Unauthenticated);
	};

	let decision = match requirement {
		Requirement::Role(required) => {
			let held = identity.role.unwrap_or(Role::Unknown);
			if role_satisfies(held, required) {
				Decision::Allow
			} else {
				Decision::Deny(DenyReason::MissingRole)
			}
		}
		Requirement::Capability {
			action,
			subject,
			resource,
		} => {
			let ability = define_abilities_for(Some(identity));
			let granted = match resource {
				Some(resource) if resource.subject != subject => false,
				Some(resource) => ability.can(action, resource),
				None => ability.can(action, subject),
			};
			if granted {
				Decision::Allow
			} else {
				Decision::Deny(DenyReason::Forbidden)
			}
		}
	};

	match decision {
		Decision::Allow => debug!(role = ?identity.role, ?requirement, "granted"),
		Decision::Deny(reason) => {
			info!(role = ?identity.role, ?requirement, ?reason, "denied")
		}
	}

	decision
}
