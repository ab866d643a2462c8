//! services/client/src/state.rs
//!
//! The shared application state, built once at startup and handed to every command.

use crate::adapters::{FileSessionStore, FsCoverImageReader, HttpProjectApi};
use crate::config::{Config, ConfigError};
use crate::error::ClientError;
use protech_core::ports::{CoverImageReader, ProjectApi};
use protech_core::routes::RouteGuard;
use protech_core::session::SessionContext;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionContext,
    pub guard: RouteGuard,
    pub api: Arc<dyn ProjectApi>,
    pub covers: Arc<dyn CoverImageReader>,
}

impl AppState {
    /// Wires the file-backed session store, the HTTP adapter and the cover
    /// reader together.
    pub fn from_config(config: Config) -> Result<Self, ClientError> {
        let config = Arc::new(config);
        let session = SessionContext::new(Arc::new(FileSessionStore::new(
            config.session_path.clone(),
        )));
        let client = reqwest::Client::builder()
            .user_agent(concat!("protech/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let api = HttpProjectApi::new(client, &config.api_base_url, session.clone()).map_err(
            |e| ConfigError::InvalidValue("PROTECH_API_BASE_URL".to_string(), e.to_string()),
        )?;

        Ok(Self {
            guard: RouteGuard::new(session.clone()),
            config,
            session,
            api: Arc::new(api),
            covers: Arc::new(FsCoverImageReader),
        })
    }
}
