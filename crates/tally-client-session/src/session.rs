// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The explicit client session object.
//!
//! A [`ClientSession`] is created with an injected [`SessionStore`] and passed
//! to whatever needs to know who is signed in. Nothing reads or writes
//! session storage except through `load`, `save` and `clear`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tally_common_secret::SecretString;
use tally_server_api::{LogoutRequest, RefreshRequest, TokenResponse, UserResponse};
use tally_server_auth::{
	authorize, use_ability, Action, AppAbility, Identity, Requirement, ResourceAttrs, Role,
	Subject,
};

use crate::error::SessionError;
use crate::state::SessionState;
use crate::store::SessionStore;

/// Default margin before access-token expiry at which a refresh is due.
pub const DEFAULT_REFRESH_SKEW_SECS: i64 = 30;

#[derive(Debug, Clone)]
pub struct ClientSession {
	store: Arc<dyn SessionStore>,
	state: Option<SessionState>,
}

impl ClientSession {
	/// An empty session backed by `store`. Call [`ClientSession::load`] to
	/// restore a previous one.
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self { store, state: None }
	}

	/// Restore the stored session. An expired refresh token clears it.
	#[tracing::instrument(skip(self))]
	pub async fn load(&mut self) -> Result<(), SessionError> {
		self.state = match self.store.load().await? {
			Some(state) if state.refresh_expires_at <= Utc::now() => {
				tracing::debug!(user_id = %state.user.id, "stored session expired");
				self.store.clear().await?;
				None
			}
			other => other,
		};
		Ok(())
	}

	pub async fn save(&self) -> Result<(), SessionError> {
		match &self.state {
			Some(state) => self.store.save(state).await,
			None => self.store.clear().await,
		}
	}

	/// Sign out locally.
	#[tracing::instrument(skip(self))]
	pub async fn clear(&mut self) -> Result<(), SessionError> {
		self.state = None;
		self.store.clear().await
	}

	/// Adopt a login or refresh response and persist it.
	#[tracing::instrument(skip_all, fields(user_id = %tokens.user.id))]
	pub async fn apply_tokens(&mut self, tokens: TokenResponse) -> Result<(), SessionError> {
		if tokens.refresh_expires_at < tokens.access_expires_at {
			return Err(SessionError::Invalid(
				"refresh token expires before access token".to_string(),
			));
		}
		let state = SessionState::from(tokens);
		self.store.save(&state).await?;
		self.state = Some(state);
		Ok(())
	}

	pub fn state(&self) -> Option<&SessionState> {
		self.state.as_ref()
	}

	pub fn user(&self) -> Option<&UserResponse> {
		self.state.as_ref().map(|s| &s.user)
	}

	pub fn identity(&self) -> Option<Identity> {
		self.state.as_ref().map(SessionState::identity)
	}

	pub fn role(&self) -> Option<Role> {
		self.user().map(|u| u.role)
	}

	pub fn access_token(&self) -> Option<&SecretString> {
		self.state.as_ref().map(|s| &s.access_token)
	}

	pub fn is_authenticated(&self) -> bool {
		self.is_authenticated_at(Utc::now())
	}

	/// A session counts as authenticated while its refresh token is live.
	pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
		self
			.state
			.as_ref()
			.is_some_and(|s| now < s.refresh_expires_at)
	}

	/// Whether the signed-in role satisfies `required` in the role hierarchy.
	pub fn has_role(&self, required: Role) -> bool {
		authorize(self.identity().as_ref(), Requirement::Role(required)).is_allowed()
	}

	pub fn has_permission(
		&self,
		action: Action,
		subject: Subject,
		resource: Option<&ResourceAttrs>,
	) -> bool {
		let requirement = Requirement::Capability {
			action,
			subject,
			resource,
		};
		authorize(self.identity().as_ref(), requirement).is_allowed()
	}

	/// A freshly compiled ability for the signed-in user.
	pub fn ability(&self) -> AppAbility {
		use_ability(self.identity().as_ref())
	}

	/// True when the access token expires within `skew` of `now`.
	pub fn needs_refresh(&self, now: DateTime<Utc>, skew: Duration) -> bool {
		self
			.state
			.as_ref()
			.is_some_and(|s| s.access_expires_at - skew <= now)
	}

	/// [`ClientSession::needs_refresh`] now, with the default skew.
	pub fn refresh_due(&self) -> bool {
		self.needs_refresh(Utc::now(), Duration::seconds(DEFAULT_REFRESH_SKEW_SECS))
	}

	pub fn refresh_request(&self) -> Option<RefreshRequest> {
		self.state.as_ref().map(|s| RefreshRequest {
			refresh_token: s.refresh_token.expose().clone(),
		})
	}

	pub fn logout_request(&self) -> Option<LogoutRequest> {
		self.state.as_ref().map(|s| LogoutRequest {
			refresh_token: s.refresh_token.expose().clone(),
		})
	}
}
