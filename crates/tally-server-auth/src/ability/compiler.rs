// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiles a role's permission table into an evaluable [`AppAbility`].
//!
//! ```text
//! define_abilities_for(user)
//!     │
//!     ├── no user / no role ───────────────→ empty ability (denies everything)
//!     │
//!     └── permissions_for_role(role)
//!             └── for each permission × subject × action → Rule
//!
//! ability.can(action, target)
//!     ├── matching = rules where (rule.action == action || Manage)
//!     │                      and (rule.subject == subject || All)
//!     ├── matching empty → false
//!     └── every matching rule must hold:
//!             unconditional → holds
//!             conditional   → resource given and all conditions pass
//! ```
//!
//! Abilities are cheap to build and are never cached; each check compiles a
//! fresh one from the static tables.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use super::{permissions_for_role, Condition, ResourceAttrs};
use crate::{Action, Identity, Subject};

/// A single `(action, subject)` grant with its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
	pub action: Action,
	pub subject: Subject,
	#[serde(skip_serializing_if = "<[Condition]>::is_empty")]
	pub conditions: &'static [Condition],
}

impl Rule {
	fn matches(&self, action: Action, subject: Subject) -> bool {
		(self.action == action || self.action == Action::Manage)
			&& (self.subject == subject || self.subject == Subject::All)
	}

	fn holds(
		&self,
		user: Option<&Identity>,
		resource: Option<&ResourceAttrs>,
		now: DateTime<Utc>,
	) -> bool {
		if self.conditions.is_empty() {
			return true;
		}
		// A conditional grant never applies to a bare subject.
		resource.is_some()
			&& self
				.conditions
				.iter()
				.all(|condition| condition.evaluate(user, resource, now))
	}
}

/// What a check is made against: a bare subject type or a concrete resource.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
	Subject(Subject),
	Resource(&'a ResourceAttrs),
}

impl From<Subject> for Target<'_> {
	fn from(subject: Subject) -> Self {
		Target::Subject(subject)
	}
}

impl<'a> From<&'a ResourceAttrs> for Target<'a> {
	fn from(resource: &'a ResourceAttrs) -> Self {
		Target::Resource(resource)
	}
}

/// The compiled rule set for one user at one instant.
#[derive(Debug, Clone)]
pub struct AppAbility {
	user: Option<Identity>,
	rules: Vec<Rule>,
	now: DateTime<Utc>,
}

impl AppAbility {
	/// An ability that denies everything.
	pub fn empty() -> Self {
		Self {
			user: None,
			rules: Vec::new(),
			now: Utc::now(),
		}
	}

	pub fn can<'a>(&self, action: Action, target: impl Into<Target<'a>>) -> bool {
		let (subject, resource) = match target.into() {
			Target::Subject(subject) => (subject, None),
			Target::Resource(resource) => (resource.subject, Some(resource)),
		};

		let mut matched = false;
		for rule in self.rules.iter().filter(|rule| rule.matches(action, subject)) {
			matched = true;
			if !rule.holds(self.user.as_ref(), resource, self.now) {
				return false;
			}
		}
		matched
	}

	pub fn cannot<'a>(&self, action: Action, target: impl Into<Target<'a>>) -> bool {
		!self.can(action, target)
	}

	/// Whether any rule, conditional or not, mentions the subject.
	pub fn can_any(&self, subject: Subject) -> bool {
		self
			.rules
			.iter()
			.any(|rule| rule.subject == subject || rule.subject == Subject::All)
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn user(&self) -> Option<&Identity> {
		self.user.as_ref()
	}
}

/// Compile the ability for `user` against the current time.
pub fn define_abilities_for(user: Option<&Identity>) -> AppAbility {
	define_abilities_at(user, Utc::now())
}

/// Compile the ability for `user`, evaluating time-based conditions at `now`.
pub fn define_abilities_at(user: Option<&Identity>, now: DateTime<Utc>) -> AppAbility {
	let Some(role) = user.and_then(|u| u.role) else {
		return AppAbility {
			user: user.cloned(),
			rules: Vec::new(),
			now,
		};
	};

	let mut rules = Vec::new();
	for permission in permissions_for_role(role) {
		for &subject in permission.subjects {
			for &action in permission.actions {
				rules.push(Rule {
					action,
					subject,
					conditions: permission.conditions,
				});
			}
		}
	}

	trace!(%role, rules = rules.len(), "compiled ability");

	AppAbility {
		user: user.cloned(),
		rules,
		now,
	}
}

/// The client-facing hook: compiles a fresh ability on every call.
pub fn use_ability(user: Option<&Identity>) -> AppAbility {
	define_abilities_for(user)
}

/// One-shot check. With a resource, its attributes feed the conditions; a
/// resource whose subject differs from `subject` is denied. Without a
/// resource, conditional rules never grant.
pub fn has_permission(
	user: Option<&Identity>,
	action: Action,
	subject: Subject,
	resource: Option<&ResourceAttrs>,
) -> bool {
	let ability = define_abilities_for(user);
	match resource {
		Some(resource) if resource.subject != subject => false,
		Some(resource) => ability.can(action, resource),
		None => ability.can(action, subject),
	}
}
