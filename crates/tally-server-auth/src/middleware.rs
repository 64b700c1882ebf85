// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authentication helpers.
//!
//! - [`CurrentUser`] - the verified principal behind a request
//! - [`AuthContext`] - auth state carried in request extensions
//! - [`extract_bearer_token`] / [`authenticate_headers`] - header parsing and
//!   access-token verification
//!
//! ```text
//! Request → Authorization: Bearer <jwt> → TokenSigner::verify(Access) → AuthContext
//!                  │                                │
//!                  └── absent → unauthenticated     └── invalid/expired → unauthenticated
//! ```
//!
//! Token values are never logged.

use chrono::{DateTime, Utc};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::token::{Claims, TokenKind, TokenSigner};
use crate::{Identity, Role, UserId};

/// The authenticated principal, built from verified access-token claims.
#[derive(Debug, Clone)]
pub struct CurrentUser {
	pub identity: Identity,
	/// `jti` of the access token that authenticated the request.
	pub token_id: Uuid,
	pub expires_at: DateTime<Utc>,
}

impl CurrentUser {
	pub fn from_claims(claims: &Claims) -> Self {
		Self {
			identity: claims.identity(),
			token_id: claims.jti,
			expires_at: claims.expires_at(),
		}
	}

	pub fn id(&self) -> UserId {
		self.identity.id
	}

	pub fn role(&self) -> Option<Role> {
		self.identity.role
	}
}

/// Authentication context for request processing.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	pub current_user: Option<CurrentUser>,
}

impl AuthContext {
	pub fn unauthenticated() -> Self {
		Self { current_user: None }
	}

	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self {
			current_user: Some(current_user),
		}
	}

	pub fn is_authenticated(&self) -> bool {
		self.current_user.is_some()
	}

	pub fn user(&self) -> Option<&CurrentUser> {
		self.current_user.as_ref()
	}

	pub fn identity(&self) -> Option<&Identity> {
		self.current_user.as_ref().map(|u| &u.identity)
	}
}

/// Extract bearer token from the Authorization header.
///
/// Expects `Authorization: Bearer <token>`; the scheme is matched
/// case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let (scheme, token) = auth_str.split_once(' ')?;
	if !scheme.eq_ignore_ascii_case("bearer") {
		return None;
	}
	let token = token.trim();
	(!token.is_empty()).then(|| token.to_string())
}

/// Build the [`AuthContext`] for a request. Missing, malformed, expired and
/// refresh-kind tokens all produce an unauthenticated context.
#[instrument(level = "debug", skip_all, fields(has_token))]
pub fn authenticate_headers(headers: &HeaderMap, signer: &TokenSigner) -> AuthContext {
	let Some(token) = extract_bearer_token(headers) else {
		tracing::Span::current().record("has_token", false);
		return AuthContext::unauthenticated();
	};
	tracing::Span::current().record("has_token", true);

	match signer.verify(&token, TokenKind::Access) {
		Ok(claims) => AuthContext::authenticated(CurrentUser::from_claims(&claims)),
		Err(e) => {
			debug!(error = %e, "rejected bearer token");
			AuthContext::unauthenticated()
		}
	}
}
