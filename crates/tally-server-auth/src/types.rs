// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for identity and authorization.
//!
//! - **ID newtypes**: UUID wrappers per entity ([`UserId`], [`DepartmentId`],
//!   [`TransactionId`], ...) so identifiers cannot be mixed up.
//! - [`Role`]: the single role a user holds.
//! - [`Action`] and [`Subject`]: the two axes of every permission. [`Action::Manage`]
//!   and [`Subject::All`] are wildcards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(DepartmentId, "Unique identifier for a department.");
define_id_type!(AccountId, "Unique identifier for a ledger account.");
define_id_type!(TransactionId, "Unique identifier for a transaction.");
define_id_type!(TenderId, "Unique identifier for a tender.");
define_id_type!(ReportId, "Unique identifier for a report.");

// =============================================================================
// Roles
// =============================================================================

/// The role a user holds. Exactly one per user.
///
/// Role names deserialize like [`Role::from_name`]: case is ignored and
/// unrecognised names become [`Role::Unknown`], which is granted nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Admin,
	Manager,
	User,
	Guest,
	/// Accepted wherever roles are parsed; has no permission table entries.
	Accountant,
	Unknown,
}

impl Role {
	/// Every assignable role. [`Role::Unknown`] is not assignable.
	pub fn all() -> &'static [Role] {
		&[
			Role::Admin,
			Role::Manager,
			Role::User,
			Role::Guest,
			Role::Accountant,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "admin",
			Role::Manager => "manager",
			Role::User => "user",
			Role::Guest => "guest",
			Role::Accountant => "accountant",
			Role::Unknown => "unknown",
		}
	}

	/// Lenient parse: anything unrecognised becomes [`Role::Unknown`].
	pub fn from_name(name: &str) -> Role {
		name.parse().unwrap_or(Role::Unknown)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Role {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let name = String::deserialize(deserializer)?;
		Ok(Role::from_name(&name))
	}
}

/// Returned by strict role parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::all()
			.iter()
			.copied()
			.find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownRole(s.to_string()))
	}
}

// =============================================================================
// Actions & Subjects
// =============================================================================

/// Operations that can be granted. [`Action::Manage`] matches every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
	Manage,
	Create,
	Read,
	Update,
	Delete,
	Approve,
	Reject,
	Export,
	Import,
}

impl Action {
	pub fn all() -> &'static [Action] {
		&[
			Action::Manage,
			Action::Create,
			Action::Read,
			Action::Update,
			Action::Delete,
			Action::Approve,
			Action::Reject,
			Action::Export,
			Action::Import,
		]
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Action::Manage => "manage",
			Action::Create => "create",
			Action::Read => "read",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::Approve => "approve",
			Action::Reject => "reject",
			Action::Export => "export",
			Action::Import => "import",
		};
		f.write_str(s)
	}
}

/// Kinds of resource. [`Subject::All`] matches every subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
	User,
	Account,
	Transaction,
	Tender,
	Report,
	Dashboard,
	Settings,
	All,
}

impl Subject {
	pub fn all() -> &'static [Subject] {
		&[
			Subject::User,
			Subject::Account,
			Subject::Transaction,
			Subject::Tender,
			Subject::Report,
			Subject::Dashboard,
			Subject::Settings,
			Subject::All,
		]
	}
}

impl fmt::Display for Subject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Subject::User => "user",
			Subject::Account => "account",
			Subject::Transaction => "transaction",
			Subject::Tender => "tender",
			Subject::Report => "report",
			Subject::Dashboard => "dashboard",
			Subject::Settings => "settings",
			Subject::All => "all",
		};
		f.write_str(s)
	}
}
