//! services/client/src/error.rs
//!
//! Defines the primary error type for the client.

use crate::config::ConfigError;
use protech_core::form::FormError;
use protech_core::list_view::ViewError;
use protech_core::ports::PortError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    View(#[from] ViewError),

    /// Represents an error from the underlying HTTP library.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),
}
