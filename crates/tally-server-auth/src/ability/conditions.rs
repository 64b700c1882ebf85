// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Condition predicates attached to permissions.
//!
//! Every predicate is a pure function of `(user, resource)` (plus the clock for
//! [`is_tender_active_at`]). Missing input of any kind yields `false`, so a
//! malformed resource can never widen access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceAttrs;
use crate::Identity;

/// Names one predicate. Permissions carry a list of these; all must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
	IsOwner,
	IsInSameDepartment,
	IsWithinTransactionLimit,
	IsNotLocked,
	IsTenderActive,
	IsTenderParticipant,
	IsNotAdmin,
	IsPublic,
}

impl Condition {
	/// Evaluate against a user and resource at the given instant.
	pub fn evaluate(
		self,
		user: Option<&Identity>,
		resource: Option<&ResourceAttrs>,
		now: DateTime<Utc>,
	) -> bool {
		match self {
			Condition::IsOwner => is_owner(user, resource),
			Condition::IsInSameDepartment => is_in_same_department(user, resource),
			Condition::IsWithinTransactionLimit => is_within_transaction_limit(user, resource),
			Condition::IsNotLocked => is_not_locked(user, resource),
			Condition::IsTenderActive => is_tender_active_at(user, resource, now),
			Condition::IsTenderParticipant => is_tender_participant(user, resource),
			Condition::IsNotAdmin => is_not_admin(user, resource),
			Condition::IsPublic => is_public(user, resource),
		}
	}
}

/// The user is the described user or the creator of the resource.
pub fn is_owner(user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	let (Some(user), Some(resource)) = (user, resource) else {
		return false;
	};
	resource.user_id == Some(user.id) || resource.created_by == Some(user.id)
}

pub fn is_in_same_department(user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	match (
		user.and_then(|u| u.department_id),
		resource.and_then(|r| r.department_id),
	) {
		(Some(mine), Some(theirs)) => mine == theirs,
		_ => false,
	}
}

/// `amount <= transaction_limit`. Inclusive.
pub fn is_within_transaction_limit(
	user: Option<&Identity>,
	resource: Option<&ResourceAttrs>,
) -> bool {
	match (
		user.and_then(|u| u.transaction_limit),
		resource.and_then(|r| r.amount),
	) {
		(Some(limit), Some(amount)) => amount <= limit,
		_ => false,
	}
}

pub fn is_not_locked(_user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	resource.is_some_and(|r| r.is_locked != Some(true))
}

/// [`is_tender_active_at`] against the current time.
pub fn is_tender_active(user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	is_tender_active_at(user, resource, Utc::now())
}

/// `start_date <= now <= end_date` and the tender is not closed.
pub fn is_tender_active_at(
	_user: Option<&Identity>,
	resource: Option<&ResourceAttrs>,
	now: DateTime<Utc>,
) -> bool {
	let Some(resource) = resource else {
		return false;
	};
	let (Some(start), Some(end)) = (resource.start_date, resource.end_date) else {
		return false;
	};
	start <= now && now <= end && resource.is_closed != Some(true)
}

pub fn is_tender_participant(user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	match (user, resource) {
		(Some(user), Some(resource)) => resource.participants.contains(&user.id),
		_ => false,
	}
}

/// The target user does not hold the admin role. An absent role counts as
/// not-admin.
pub fn is_not_admin(_user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	resource.is_some_and(|r| r.role != Some(crate::Role::Admin))
}

pub fn is_public(_user: Option<&Identity>, resource: Option<&ResourceAttrs>) -> bool {
	resource.is_some_and(|r| r.is_public == Some(true))
}
