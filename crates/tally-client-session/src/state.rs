// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The cached session: who is signed in and the tokens that prove it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_common_secret::SecretString;
use tally_server_api::{TokenResponse, UserResponse};
use tally_server_auth::Identity;

/// Tokens and profile held by a signed-in client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
	pub user: UserResponse,
	pub access_token: SecretString,
	pub access_expires_at: DateTime<Utc>,
	pub refresh_token: SecretString,
	pub refresh_expires_at: DateTime<Utc>,
}

impl SessionState {
	/// The identity the permission model evaluates for this session.
	pub fn identity(&self) -> Identity {
		Identity {
			id: self.user.id,
			role: Some(self.user.role),
			department_id: self.user.department_id,
			transaction_limit: self.user.transaction_limit,
		}
	}
}

impl From<TokenResponse> for SessionState {
	fn from(tokens: TokenResponse) -> Self {
		Self {
			user: tokens.user,
			access_token: SecretString::new(tokens.access_token),
			access_expires_at: tokens.access_expires_at,
			refresh_token: SecretString::new(tokens.refresh_token),
			refresh_expires_at: tokens.refresh_expires_at,
		}
	}
}

/// On-disk form of [`SessionState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
	pub user: UserResponse,
	pub access_token: String,
	pub access_expires_at: DateTime<Utc>,
	pub refresh_token: String,
	pub refresh_expires_at: DateTime<Utc>,
}

impl From<&SessionState> for PersistedSession {
	fn from(state: &SessionState) -> Self {
		Self {
			user: state.user.clone(),
			access_token: state.access_token.expose().clone(),
			access_expires_at: state.access_expires_at,
			refresh_token: state.refresh_token.expose().clone(),
			refresh_expires_at: state.refresh_expires_at,
		}
	}
}

impl From<PersistedSession> for SessionState {
	fn from(persisted: PersistedSession) -> Self {
		Self {
			user: persisted.user,
			access_token: SecretString::new(persisted.access_token),
			access_expires_at: persisted.access_expires_at,
			refresh_token: SecretString::new(persisted.refresh_token),
			refresh_expires_at: persisted.refresh_expires_at,
		}
	}
}
