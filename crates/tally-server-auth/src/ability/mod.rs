// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based abilities with conditional grants.
//!
//! 1. **Conditions** ([`conditions`]): pure `(user, resource)` predicates
//! 2. **Permissions** ([`permissions`]): static per-role tables and the role hierarchy
//! 3. **Compiler** ([`compiler`]): expands a table into an [`AppAbility`]
//!
//! ```
//! use tally_server_auth::ability::{define_abilities_for, ResourceAttrs};
//! use tally_server_auth::{Action, Identity, Role, UserId};
//!
//! let user = Identity::new(UserId::generate(), Role::User).with_transaction_limit(5_000);
//! let ability = define_abilities_for(Some(&user));
//!
//! assert!(ability.can(Action::Create, &ResourceAttrs::transaction(user.id, 4_000)));
//! assert!(!ability.can(Action::Create, &ResourceAttrs::transaction(user.id, 6_000)));
//! ```

pub mod compiler;
pub mod conditions;
pub mod permissions;
pub mod resource;

pub use compiler::{
	define_abilities_at, define_abilities_for, has_permission, use_ability, AppAbility, Rule,
	Target,
};
pub use conditions::Condition;
pub use permissions::{
	permissions_for_role, permissions_for_role_name, role_satisfies, Permission, ROLE_HIERARCHY,
};
pub use resource::ResourceAttrs;
