// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration for the Tally server.
//!
//! Configuration is layered from built-in defaults, an optional TOML file and
//! `TALLY_SERVER_*` environment variables, in increasing precedence. Secrets
//! (`TALLY_SERVER_JWT_SECRET`, `TALLY_SERVER_BOOTSTRAP_ADMIN_PASSWORD`) are
//! only ever read from the environment, with `*_FILE` indirection.
//!
//! ```ignore
//! let config = tally_server_config::load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tally_common_config::{load_secret_env, SecretString};
use tracing::{debug, info};

const JWT_SECRET_ENV: &str = "TALLY_SERVER_JWT_SECRET";
const BOOTSTRAP_PASSWORD_ENV: &str = "TALLY_SERVER_BOOTSTRAP_ADMIN_PASSWORD";

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub auth: AuthConfig,
	pub logging: LoggingConfig,
	pub bootstrap: BootstrapConfig,
}

impl ServerConfig {
	/// Socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from the system config file and environment.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let jwt_secret =
		load_secret_env(JWT_SECRET_ENV).map_err(|e| ConfigError::Secret(e.to_string()))?;
	let admin_password =
		load_secret_env(BOOTSTRAP_PASSWORD_ENV).map_err(|e| ConfigError::Secret(e.to_string()))?;

	finalize(merged, jwt_secret, admin_password)
}

/// Resolve a merged layer plus environment secrets into a validated config.
pub fn finalize(
	layer: ServerConfigLayer,
	jwt_secret: Option<SecretString>,
	admin_password: Option<SecretString>,
) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize(jwt_secret);
	let logging = layer.logging.unwrap_or_default().finalize();
	let bootstrap = layer.bootstrap.unwrap_or_default().finalize(admin_password);

	validate_config(&auth)?;

	info!(
		host = %http.host,
		port = http.port,
		environment = %auth.environment,
		issuer = %auth.issuer,
		jwt_secret_configured = auth.jwt_secret.is_some(),
		bootstrap_admin = bootstrap.admin_credentials().is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		auth,
		logging,
		bootstrap,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	match &auth.jwt_secret {
		None if auth.is_production() => Err(ConfigError::Validation(format!(
			"{JWT_SECRET_ENV} (or {JWT_SECRET_ENV}_FILE) must be set when environment is production"
		))),
		Some(secret) if secret.len() < MIN_JWT_SECRET_BYTES => Err(ConfigError::Validation(format!(
			"{JWT_SECRET_ENV} must be at least {MIN_JWT_SECRET_BYTES} bytes"
		))),
		_ => Ok(()),
	}?;

	if auth.access_token_ttl_secs == 0 || auth.refresh_token_ttl_secs == 0 {
		return Err(ConfigError::Validation(
			"token lifetimes must be greater than zero".to_string(),
		));
	}

	if auth.refresh_token_ttl_secs < auth.access_token_ttl_secs {
		return Err(ConfigError::Validation(
			"refresh token lifetime must not be shorter than access token lifetime".to_string(),
		));
	}

	Ok(())
}
