//! Content hashing for deduplication
//!
//! SHA-256 over the raw bytes, encoded as a 64-character lowercase hex
//! string. Hashing is content-only: the file's name never enters the
//! digest, so identical bytes under different names hash identically.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read size for streaming hashing
const HASH_CHUNK_SIZE: usize = 8192;

/// Hash an in-memory buffer
pub fn calculate_buffer_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash a byte stream incrementally, chunk by chunk
///
/// Never buffers the whole stream; used standalone as the hash-only
/// fallback when tag extraction is unavailable.
pub async fn calculate_stream_hash<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hash a file on disk for duplicate detection
pub async fn calculate_file_hash(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    calculate_stream_hash(&mut file).await
}
