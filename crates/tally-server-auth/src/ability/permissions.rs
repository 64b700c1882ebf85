// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static per-role permission tables and the role hierarchy.
//!
//! The tables are the single declaration of what each role may do. The
//! compiler in [`super::compiler`] expands them into rules; nothing else
//! interprets them.

use serde::Serialize;

use super::Condition;
use crate::{Action, Role, Subject};

/// One grant: every listed action on every listed subject, provided all
/// conditions hold for the resource in question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permission {
	pub actions: &'static [Action],
	pub subjects: &'static [Subject],
	pub conditions: &'static [Condition],
}

impl Permission {
	pub const fn new(actions: &'static [Action], subjects: &'static [Subject]) -> Self {
		Self {
			actions,
			subjects,
			conditions: &[],
		}
	}

	pub const fn when(self, conditions: &'static [Condition]) -> Self {
		Self { conditions, ..self }
	}

	pub fn is_conditional(&self) -> bool {
		!self.conditions.is_empty()
	}
}

use Action::*;
use Condition::*;

static ADMIN: [Permission; 1] = [Permission::new(&[Manage], &[Subject::All])];

static MANAGER: [Permission; 6] = [
	Permission::new(&[Read, Create, Update], &[Subject::User]).when(&[IsNotAdmin]),
	Permission::new(&[Manage], &[Subject::Account]),
	Permission::new(&[Manage], &[Subject::Transaction]),
	Permission::new(&[Manage], &[Subject::Tender]),
	Permission::new(&[Manage], &[Subject::Report, Subject::Dashboard]),
	Permission::new(&[Read, Update], &[Subject::Settings]),
];

static USER: [Permission; 5] = [
	Permission::new(&[Read, Update], &[Subject::User]).when(&[IsOwner]),
	Permission::new(&[Read], &[Subject::Account]).when(&[IsInSameDepartment]),
	Permission::new(&[Create, Read], &[Subject::Transaction]).when(&[IsWithinTransactionLimit]),
	Permission::new(&[Read], &[Subject::Tender]).when(&[IsTenderActive]),
	Permission::new(&[Read], &[Subject::Report, Subject::Dashboard]),
];

static GUEST: [Permission; 1] =
	[Permission::new(&[Read], &[Subject::Report, Subject::Dashboard]).when(&[IsPublic])];

static NONE: [Permission; 0] = [];

/// The permission table for a role. Never fails; roles without a table get an
/// empty slice. Repeated calls return the same static slice.
pub fn permissions_for_role(role: Role) -> &'static [Permission] {
	match role {
		Role::Admin => &ADMIN,
		Role::Manager => &MANAGER,
		Role::User => &USER,
		Role::Guest => &GUEST,
		Role::Accountant | Role::Unknown => &NONE,
	}
}

/// [`permissions_for_role`] keyed by role name. Unrecognised names yield an
/// empty slice.
pub fn permissions_for_role_name(name: &str) -> &'static [Permission] {
	permissions_for_role(Role::from_name(name))
}

/// For each role, the roles it satisfies in a role requirement.
pub static ROLE_HIERARCHY: &[(Role, &[Role])] = &[
	(
		Role::Admin,
		&[
			Role::Admin,
			Role::Manager,
			Role::User,
			Role::Guest,
			Role::Accountant,
		],
	),
	(Role::Manager, &[Role::Manager, Role::User, Role::Guest]),
	(Role::User, &[Role::User, Role::Guest]),
	(Role::Accountant, &[Role::Accountant]),
	(Role::Guest, &[Role::Guest]),
	(Role::Unknown, &[]),
];

/// Whether holding `held` satisfies a requirement for `required`.
pub fn role_satisfies(held: Role, required: Role) -> bool {
	ROLE_HIERARCHY
		.iter()
		.find(|(role, _)| *role == held)
		.is_some_and(|(_, satisfied)| satisfied.contains(&required))
}
