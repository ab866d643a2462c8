//! crates/protech_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core logic talks to.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! view-models independent of HTTP, the filesystem and session storage.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::{Project, ProjectDetails, ProjectId, Session};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A classified failure from one of the ports.
///
/// Every non-2xx status and every transport failure ends up as one of these;
/// adapters never swallow them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server responded with status {status}")]
    Server { status: u16 },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The project REST API.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> PortResult<Vec<Project>>;

    /// Fails with `NotFound` for any non-2xx status.
    async fn get_project(&self, id: &ProjectId) -> PortResult<Project>;

    async fn create_project(&self, details: &ProjectDetails) -> PortResult<Project>;

    async fn update_project(&self, id: &ProjectId, details: &ProjectDetails)
        -> PortResult<Project>;

    async fn delete_project(&self, id: &ProjectId) -> PortResult<()>;
}

/// Persistent storage holding the signed-in user's session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the current session. `None` when no token is stored.
    async fn load(&self) -> PortResult<Option<Session>>;

    async fn save(&self, session: &Session) -> PortResult<()>;

    async fn clear(&self) -> PortResult<()>;
}

#[async_trait]
pub trait CoverImageReader: Send + Sync {
    /// Reads a local file and encodes it as a `data:` URI.
    async fn read_as_data_uri(&self, path: &Path) -> PortResult<String>;
}
