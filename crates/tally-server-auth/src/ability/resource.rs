// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attributes of the resource an ability check is made against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DepartmentId, Role, Subject, UserId};

/// A concrete resource, flattened to the attributes conditions inspect.
///
/// Every attribute except `subject` is optional; conditions that need a
/// missing attribute evaluate to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttrs {
	pub subject: Subject,
	/// For user resources, the user the record describes.
	pub user_id: Option<UserId>,
	pub created_by: Option<UserId>,
	pub department_id: Option<DepartmentId>,
	/// Minor currency units.
	pub amount: Option<i64>,
	pub is_locked: Option<bool>,
	pub start_date: Option<DateTime<Utc>>,
	pub end_date: Option<DateTime<Utc>>,
	pub is_closed: Option<bool>,
	#[serde(default)]
	pub participants: Vec<UserId>,
	pub is_public: Option<bool>,
	/// For user resources, the role the described user holds.
	pub role: Option<Role>,
}

impl ResourceAttrs {
	/// A resource with only its subject set.
	pub fn new(subject: Subject) -> Self {
		Self {
			subject,
			user_id: None,
			created_by: None,
			department_id: None,
			amount: None,
			is_locked: None,
			start_date: None,
			end_date: None,
			is_closed: None,
			participants: Vec::new(),
			is_public: None,
			role: None,
		}
	}

	pub fn user(user_id: UserId, role: Role) -> Self {
		Self::new(Subject::User)
			.with_user_id(user_id)
			.with_role(role)
	}

	pub fn account(department_id: DepartmentId) -> Self {
		Self::new(Subject::Account).with_department(department_id)
	}

	pub fn transaction(created_by: UserId, amount: i64) -> Self {
		Self::new(Subject::Transaction)
			.with_created_by(created_by)
			.with_amount(amount)
	}

	pub fn tender(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
		let mut resource = Self::new(Subject::Tender);
		resource.start_date = Some(start_date);
		resource.end_date = Some(end_date);
		resource
	}

	pub fn report(is_public: bool) -> Self {
		Self::new(Subject::Report).with_public(is_public)
	}

	pub fn with_user_id(mut self, user_id: UserId) -> Self {
		self.user_id = Some(user_id);
		self
	}

	pub fn with_created_by(mut self, user_id: UserId) -> Self {
		self.created_by = Some(user_id);
		self
	}

	pub fn with_department(mut self, department_id: DepartmentId) -> Self {
		self.department_id = Some(department_id);
		self
	}

	pub fn with_amount(mut self, amount: i64) -> Self {
		self.amount = Some(amount);
		self
	}

	pub fn with_locked(mut self, locked: bool) -> Self {
		self.is_locked = Some(locked);
		self
	}

	pub fn with_closed(mut self, closed: bool) -> Self {
		self.is_closed = Some(closed);
		self
	}

	pub fn with_participants(mut self, participants: impl IntoIterator<Item = UserId>) -> Self {
		self.participants = participants.into_iter().collect();
		self
	}

	pub fn with_public(mut self, is_public: bool) -> Self {
		self.is_public = Some(is_public);
		self
	}

	pub fn with_role(mut self, role: Role) -> Self {
		self.role = Some(role);
		self
	}
}
