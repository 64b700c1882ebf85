// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session storage backends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::state::{PersistedSession, SessionState};

/// Where a [`crate::ClientSession`] keeps its state between runs.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
	async fn load(&self) -> Result<Option<SessionState>, SessionError>;

	async fn save(&self, state: &SessionState) -> Result<(), SessionError>;

	/// Remove any stored session. Clearing an empty store succeeds.
	async fn clear(&self) -> Result<(), SessionError>;
}

/// JSON file store, written atomically with 0600 permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
	path: PathBuf,
}

impl FileSessionStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

#[async_trait]
impl SessionStore for FileSessionStore {
	async fn load(&self) -> Result<Option<SessionState>, SessionError> {
		if !fs::try_exists(&self.path).await? {
			return Ok(None);
		}

		let contents = fs::read_to_string(&self.path).await?;
		let persisted: PersistedSession = serde_json::from_str(&contents)?;
		debug!(path = ?self.path, user_id = %persisted.user.id, "session loaded");
		Ok(Some(persisted.into()))
	}

	async fn save(&self, state: &SessionState) -> Result<(), SessionError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let contents = serde_json::to_string_pretty(&PersistedSession::from(state))?;

		let temp_path = self.path.with_extension("tmp");
		let mut file = fs::File::create(&temp_path).await?;
		file.write_all(contents.as_bytes()).await?;
		file.sync_all().await?;
		drop(file);

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			let perms = std::fs::Permissions::from_mode(0o600);
			if let Err(e) = std::fs::set_permissions(&temp_path, perms) {
				warn!(path = ?temp_path, error = %e, "Failed to set file permissions to 0600");
			}
		}

		fs::rename(&temp_path, &self.path).await?;

		debug!(path = ?self.path, "session written");
		Ok(())
	}

	async fn clear(&self) -> Result<(), SessionError> {
		match fs::remove_file(&self.path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}
}

/// In-memory store, for tests and short-lived clients.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
	state: tokio::sync::RwLock<Option<SessionState>>,
}

impl MemorySessionStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SessionStore for MemorySessionStore {
	async fn load(&self) -> Result<Option<SessionState>, SessionError> {
		Ok(self.state.read().await.clone())
	}

	async fn save(&self, state: &SessionState) -> Result<(), SessionError> {
		*self.state.write().await = Some(state.clone());
		Ok(())
	}

	async fn clear(&self) -> Result<(), SessionError> {
		*self.state.write().await = None;
		Ok(())
	}
}
