//! Dual-consumer ingestion pipeline
//!
//! One pass over the uploaded bytes produces both a content hash (for
//! deduplication) and the embedded metadata/cover art. The source
//! stream is teed into two branches over bounded channels; the hash
//! branch digests chunk by chunk and never buffers, the tag branch
//! materializes its copy because tag parsing needs a seekable source.
//! Both branches run concurrently on the same task and the pipeline
//! completes only when both finish.

use crate::error::Result;
use crate::hash;
use crate::metadata::{self, ExtractedMetadata};
use crate::source::ByteSource;
use crate::CoverArt;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

/// Read size for the tee loop
const CHUNK_SIZE: usize = 64 * 1024;

/// Bounded depth per branch; backpressure instead of unbounded growth
const CHANNEL_DEPTH: usize = 4;

/// Everything one ingestion pass produces
///
/// Immutable; the pipeline holds no state across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionOutcome {
    /// 64-char lowercase hex SHA-256 of the raw bytes
    pub hash: String,

    /// Parsed tag metadata plus technical properties
    pub metadata: ExtractedMetadata,

    /// Embedded cover image, original encoding preserved
    pub cover: Option<CoverArt>,
}

/// Hash and parse a source in a single streaming pass
///
/// Fails if the source cannot be read or its tags cannot be parsed;
/// see [`ingest_with_fallback`] for the degraded path.
pub async fn ingest(source: &dyn ByteSource) -> Result<IngestionOutcome> {
    let mut reader = source.stream().await?;

    let (hash_tx, mut hash_rx) = mpsc::channel::<Vec<u8>>(CHANNEL_DEPTH);
    let (tag_tx, mut tag_rx) = mpsc::channel::<Vec<u8>>(CHANNEL_DEPTH);

    // Tee: every chunk goes to both branches; the senders drop when the
    // source is drained, which ends both receivers
    let feed = async move {
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            let chunk = buffer[..bytes_read].to_vec();
            if hash_tx.send(chunk.clone()).await.is_err() {
                break;
            }
            if tag_tx.send(chunk).await.is_err() {
                break;
            }
        }
        Ok::<(), crate::IngestError>(())
    };

    let hash_branch = async move {
        let mut hasher = Sha256::new();
        while let Some(chunk) = hash_rx.recv().await {
            hasher.update(&chunk);
        }
        hex::encode(hasher.finalize())
    };

    let tag_branch = async move {
        let mut buffer = Vec::new();
        while let Some(chunk) = tag_rx.recv().await {
            buffer.extend_from_slice(&chunk);
        }
        buffer
    };

    let (feed_result, hash, tag_buffer) = tokio::join!(feed, hash_branch, tag_branch);
    feed_result?;

    let (metadata, cover) = metadata::parse_tag_buffer(&tag_buffer, source.name())?;

    Ok(IngestionOutcome {
        hash,
        metadata,
        cover,
    })
}

/// Ingest with the hash-only fallback
///
/// When the streaming pipeline fails for any reason, a second pass
/// hashes the source alone: metadata and cover are sacrificed but the
/// host can still deduplicate. An unreadable source is still an error.
pub async fn ingest_with_fallback(source: &dyn ByteSource) -> Result<IngestionOutcome> {
    match ingest(source).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::debug!("stream ingestion failed ({e}); falling back to hash-only pass");
            let mut reader = source.stream().await?;
            let hash = hash::calculate_stream_hash(&mut reader).await?;
            Ok(IngestionOutcome {
                hash,
                metadata: ExtractedMetadata::sparse_for(source.name()),
                cover: None,
            })
        }
    }
}
