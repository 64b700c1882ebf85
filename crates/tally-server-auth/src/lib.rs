// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, role-based abilities and session tokens for Tally.
//!
//! This crate provides:
//! - Identity and ID types shared by the server and client
//! - The permission model: condition predicates, static per-role permission
//!   tables and the ability compiler ([`ability`])
//! - The single authorization entry point [`authorize`]
//! - HS256 access/refresh tokens and Argon2id password hashing
//! - Request authentication helpers
//!
//! # Authorization Model
//!
//! A role maps to a static table of `{actions, subjects, conditions}` entries.
//! Compiling a table yields an [`AppAbility`]; asking it `can(action, target)`
//! collects the rules matching the action (or `Manage`) and subject (or `All`)
//! and requires all of them to hold. Conditional rules only hold against a
//! concrete resource whose attributes satisfy every condition.
//!
//! # Security Considerations
//!
//! - Conditions fail closed on missing attributes
//! - Refresh tokens are persisted as SHA-256 digests, passwords as Argon2id hashes
//! - Signing keys and tokens travel as [`tally_common_secret::SecretString`]

pub mod ability;
mod argon2_config;
pub mod authz;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod token;
pub mod types;

pub use ability::{
	define_abilities_at, define_abilities_for, has_permission, permissions_for_role,
	permissions_for_role_name, role_satisfies, use_ability, AppAbility, Condition, Permission,
	ResourceAttrs, Rule, Target, ROLE_HIERARCHY,
};
pub use authz::{authorize, Decision, DenyReason, Requirement};
pub use error::{PasswordError, TokenError};
pub use identity::Identity;
pub use middleware::{authenticate_headers, extract_bearer_token, AuthContext, CurrentUser};
pub use password::{hash_password, verify_password};
pub use token::{
	generate_signing_secret, hash_refresh_token, Claims, TokenKind, TokenPair, TokenSigner,
};
pub use types::*;
