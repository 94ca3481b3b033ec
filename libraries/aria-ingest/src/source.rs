//! Byte source boundary
//!
//! Ingestion accepts anything that can produce a chunked byte stream:
//! an uploaded file on disk, or an in-memory buffer in tests. Each call
//! to [`ByteSource::stream`] opens a fresh, independent reader, so the
//! hash-only fallback can make a second pass over the same source.

use crate::error::{IngestError, Result};
use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// File-like byte source with a stream accessor
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Source name (used only for title/format fallbacks, never hashed)
    fn name(&self) -> &str;

    /// Total size in bytes, if known
    fn len(&self) -> Option<u64>;

    /// Whether the source is known to be empty
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Open a fresh reader over the source bytes
    async fn stream(&self) -> Result<Box<dyn AsyncRead + Send + Unpin>>;
}

/// Byte source backed by a file on disk
pub struct FileByteSource {
    path: PathBuf,
    name: String,
}

impl FileByteSource {
    /// Create a source for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Self { path, name }
    }

    /// The underlying path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileByteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    async fn stream(&self) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| IngestError::Source(format!("{}: {}", self.path.display(), e)))?;
        Ok(Box::new(file))
    }
}

/// Byte source over an in-memory buffer
pub struct MemoryByteSource {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryByteSource {
    /// Create a named in-memory source
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[async_trait]
impl ByteSource for MemoryByteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }

    async fn stream(&self) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
        Ok(Box::new(Cursor::new(self.bytes.clone())))
    }
}
