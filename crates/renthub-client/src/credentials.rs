// Credential persistence
//
// The persisted state of the whole client is one opaque token string in one
// well-known location; clearing it is equivalent to logout. The store trait
// keeps that location swappable: a file under the config directory for the
// CLI, an in-memory slot for tests.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Storage seam for the persisted bearer token
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the persisted token, if any
    async fn load(&self) -> Result<Option<String>>;
    /// Persist a token, replacing any previous one
    async fn save(&self, token: &str) -> Result<()>;
    /// Remove the persisted token; removing an absent token is not an error
    async fn clear(&self) -> Result<()>;
}

/// Token file on disk
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("failed to read {}", self.path.display())),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, token)
            .await
            .context(format!("failed to write {}", self.path.display()))
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("failed to remove {}", self.path.display())),
        }
    }
}

/// In-memory token slot for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already persisted
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Current contents, for assertions
    pub fn snapshot(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
