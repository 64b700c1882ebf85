// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authenticated principal as seen by the permission model.

use serde::{Deserialize, Serialize};

use crate::{DepartmentId, Role, UserId};

/// Who is asking. Built from verified token claims on the server and from the
/// cached session on the client.
///
/// `role` is optional because a principal without one must still be
/// representable; it compiles to an empty ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub id: UserId,
	pub role: Option<Role>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub department_id: Option<DepartmentId>,
	/// Largest transaction amount this user may create, in minor units.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transaction_limit: Option<i64>,
}

impl Identity {
	pub fn new(id: UserId, role: Role) -> Self {
		Self {
			id,
			role: Some(role),
			department_id: None,
			transaction_limit: None,
		}
	}

	/// A principal with no role.
	pub fn without_role(id: UserId) -> Self {
		Self {
			id,
			role: None,
			department_id: None,
			transaction_limit: None,
		}
	}

	pub fn with_department(mut self, department_id: DepartmentId) -> Self {
		self.department_id = Some(department_id);
		self
	}

	pub fn with_transaction_limit(mut self, limit: i64) -> Self {
		self.transaction_limit = Some(limit);
		self
	}
}
