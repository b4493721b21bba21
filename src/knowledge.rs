//! Knowledge document loading
//!
//! The knowledge file is re-read on every request so edits take effect
//! without a restart.

use crate::error::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Text substituted for the knowledge document when the file does not exist
pub const FALLBACK_KNOWLEDGE: &str = "Knowledge file not found";

/// Reads the knowledge document from a fixed path
#[derive(Debug, Clone)]
pub struct KnowledgeLoader {
    path: PathBuf,
}

impl KnowledgeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full document as UTF-8 text
    ///
    /// A missing file yields [`FALLBACK_KNOWLEDGE`]. Any other I/O failure,
    /// including invalid UTF-8, is returned as [`AppError::KnowledgeRead`].
    pub async fn load(&self) -> AppResult<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Knowledge file not found, answering with fallback text"
                );
                Ok(FALLBACK_KNOWLEDGE.to_string())
            }
            Err(source) => Err(AppError::KnowledgeRead {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}
