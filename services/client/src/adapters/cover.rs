//! services/client/src/adapters/cover.rs
//!
//! Reads a cover image from disk and turns it into an embeddable `data:` URI.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use protech_core::ports::{CoverImageReader, PortError, PortResult};
use std::path::Path;
use tracing::debug;

/// Guesses the media type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[derive(Debug, Clone, Default)]
pub struct FsCoverImageReader;

#[async_trait]
impl CoverImageReader for FsCoverImageReader {
    async fn read_as_data_uri(&self, path: &Path) -> PortResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PortError::Io(format!("{}: {}", path.display(), e)))?;
        debug!("Encoding {} ({} bytes)", path.display(), bytes.len());
        Ok(data_uri(mime_for(path), &bytes))
    }
}
