//! services/client/src/adapters/session_file.rs
//!
//! Persistent session storage: a small JSON file holding the `userRole`,
//! `userName` and `token` keys. Every read goes back to disk.

use async_trait::async_trait;
use protech_core::domain::{Role, Session};
use protech_core::ports::{PortError, PortResult, SessionStore};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "userRole", default, skip_serializing_if = "Option::is_none")]
    user_role: Option<String>,
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl StoredSession {
    fn into_domain(self) -> Option<Session> {
        let token = self.token.filter(|t| !t.trim().is_empty())?;
        let role = match self.user_role.as_deref().map(Role::parse) {
            Some(Some(role)) => role,
            other => {
                if other.is_some() {
                    warn!("Unknown stored role {:?}, treating as Employee", self.user_role);
                }
                Role::Employee
            }
        };
        Some(Session {
            role,
            name: self.user_name.unwrap_or_default(),
            token,
        })
    }
}

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

fn io_error(path: &Path, e: std::io::Error) -> PortError {
    PortError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> PortResult<Option<Session>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let stored: StoredSession = serde_json::from_str(&text)
            .map_err(|e| PortError::Decode(format!("{}: {}", self.path.display(), e)))?;
        Ok(stored.into_domain())
    }

    async fn save(&self, session: &Session) -> PortResult<()> {
        let stored = StoredSession {
            user_role: Some(session.role.as_str().to_string()),
            user_name: Some(session.name.clone()),
            token: Some(session.token.clone()),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| PortError::Decode(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| io_error(&self.path, e))
    }

    async fn clear(&self) -> PortResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("nested").join("session.json"))
    }

    #[tokio::test]
    async fn missing_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_load_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let session = Session {
            role: Role::Manager,
            name: "Nila".to_string(),
            token: "t-123".to_string(),
        };

        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"userRole\""));
        assert!(raw.contains("\"userName\""));
        assert!(raw.contains("\"token\""));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_roles_fall_back_to_employee() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"userRole":"Admin","userName":"X","token":"abc"}"#).unwrap();

        let session = FileSessionStore::new(&path).load().await.unwrap().unwrap();
        assert_eq!(session.role, Role::Employee);
    }

    #[tokio::test]
    async fn empty_token_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"userRole":"Manager","userName":"X","token":""}"#).unwrap();

        assert_eq!(FileSessionStore::new(&path).load().await.unwrap(), None);
    }
}
