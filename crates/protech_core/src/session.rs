//! crates/protech_core/src/session.rs
//!
//! The session provider handed to every component that needs to know who is
//! signed in. It never caches: each call re-reads the underlying store so the
//! view can never drift from persistent storage.

use std::sync::Arc;
use tracing::info;

use crate::domain::Session;
use crate::ports::{PortResult, SessionStore};

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The current session, if a non-empty token is stored.
    pub async fn current(&self) -> PortResult<Option<Session>> {
        let session = self.store.load().await?;
        Ok(session.filter(|s| !s.token.trim().is_empty()))
    }

    pub async fn token(&self) -> PortResult<Option<String>> {
        Ok(self.current().await?.map(|s| s.token))
    }

    pub async fn is_authenticated(&self) -> PortResult<bool> {
        Ok(self.current().await?.is_some())
    }

    /// Records a session obtained from the login flow.
    pub async fn sign_in(&self, session: &Session) -> PortResult<()> {
        info!("Storing session for {} ({})", session.name, session.role);
        self.store.save(session).await
    }

    pub async fn sign_out(&self) -> PortResult<()> {
        info!("Clearing stored session");
        self.store.clear().await
    }
}
