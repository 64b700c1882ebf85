// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! First-run administrator account.

use serde::Deserialize;
use tally_common_config::SecretString;

#[derive(Debug, Clone, Default)]
pub struct BootstrapConfig {
	pub admin_username: Option<String>,
	pub admin_password: Option<SecretString>,
}

impl BootstrapConfig {
	/// Username and password, when both are configured.
	pub fn admin_credentials(&self) -> Option<(&str, &SecretString)> {
		match (&self.admin_username, &self.admin_password) {
			(Some(username), Some(password)) => Some((username.as_str(), password)),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapConfigLayer {
	#[serde(default)]
	pub admin_username: Option<String>,
}

impl BootstrapConfigLayer {
	pub fn merge(&mut self, other: BootstrapConfigLayer) {
		if other.admin_username.is_some() {
			self.admin_username = other.admin_username;
		}
	}

	pub fn finalize(self, admin_password: Option<SecretString>) -> BootstrapConfig {
		BootstrapConfig {
			admin_username: self.admin_username,
			admin_password,
		}
	}
}
