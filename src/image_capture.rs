use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImageCaptureError {
    #[error("failed to read image {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image type {0:?}")]
    UnsupportedFormat(String),
    #[error("image is empty")]
    Empty,
}

/// Embeddable image reference usable wherever a recipe image URL is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

pub fn capture_bytes(bytes: &[u8], mime: &str) -> Result<ImageRef, ImageCaptureError> {
    if bytes.is_empty() {
        return Err(ImageCaptureError::Empty);
    }
    Ok(ImageRef(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
}

/// Reads a local image into a `data:` URI.
pub async fn capture_file(path: &Path) -> Result<ImageRef, ImageCaptureError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let mime = mime_for_extension(extension)
        .ok_or_else(|| ImageCaptureError::UnsupportedFormat(extension.to_string()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ImageCaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = bytes.len(), mime, "image captured");
    capture_bytes(&bytes, mime)
}
