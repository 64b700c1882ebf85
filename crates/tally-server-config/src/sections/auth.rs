// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and token configuration.

use serde::Deserialize;
use tally_common_config::SecretString;

/// HS256 keys shorter than this are rejected.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_ISSUER: &str = "tally";
const DEFAULT_ACCESS_TTL_SECS: u64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	pub environment: String,
	pub issuer: String,
	pub access_token_ttl_secs: u64,
	pub refresh_token_ttl_secs: u64,
	/// Signing key for access and refresh tokens. `None` outside production
	/// means the server generates a per-process key.
	pub jwt_secret: Option<SecretString>,
}

impl AuthConfig {
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		AuthConfigLayer::default().finalize(None)
	}
}

/// Authentication configuration layer (partial, for merging).
///
/// The signing key never comes from a TOML file; it is loaded from
/// `TALLY_SERVER_JWT_SECRET` or `TALLY_SERVER_JWT_SECRET_FILE` during finalize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub issuer: Option<String>,
	#[serde(default)]
	pub access_token_ttl_secs: Option<u64>,
	#[serde(default)]
	pub refresh_token_ttl_secs: Option<u64>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.issuer.is_some() {
			self.issuer = other.issuer;
		}
		if other.access_token_ttl_secs.is_some() {
			self.access_token_ttl_secs = other.access_token_ttl_secs;
		}
		if other.refresh_token_ttl_secs.is_some() {
			self.refresh_token_ttl_secs = other.refresh_token_ttl_secs;
		}
	}

	pub fn finalize(self, jwt_secret: Option<SecretString>) -> AuthConfig {
		AuthConfig {
			environment: self
				.environment
				.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
			issuer: self.issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
			access_token_ttl_secs: self.access_token_ttl_secs.unwrap_or(DEFAULT_ACCESS_TTL_SECS),
			refresh_token_ttl_secs: self
				.refresh_token_ttl_secs
				.unwrap_or(DEFAULT_REFRESH_TTL_SECS),
			jwt_secret,
		}
	}
}
