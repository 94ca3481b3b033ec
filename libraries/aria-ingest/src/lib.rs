//! Aria - Content-Addressable Ingestion
//!
//! Streaming ingestion pipeline for uploaded audio files:
//! - SHA-256 content hash (64-char lowercase hex) for deduplication
//! - Embedded tag metadata and cover art via lofty
//! - One pass over the bytes: the stream is teed into a hash branch
//!   and a tag branch that run concurrently
//! - Hash-only fallback when tag extraction is unavailable
//!
//! Hashing is content-only: two byte-identical uploads with different
//! names produce the same hash, which is what makes deduplication and
//! offline-cache decisions safe.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_ingest::{ingest_with_fallback, FileByteSource};
//!
//! # async fn example() -> aria_ingest::Result<()> {
//! let source = FileByteSource::new("/uploads/song.mp3");
//! let outcome = ingest_with_fallback(&source).await?;
//!
//! println!("hash: {}", outcome.hash);
//! println!("title: {:?}", outcome.metadata.title);
//! println!("cover: {}", outcome.cover.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod artwork;
mod error;
mod hash;
mod metadata;
mod pipeline;
mod source;

// Public exports
pub use artwork::CoverArt;
pub use error::{IngestError, Result};
pub use hash::{calculate_buffer_hash, calculate_file_hash, calculate_stream_hash};
pub use metadata::ExtractedMetadata;
pub use pipeline::{ingest, ingest_with_fallback, IngestionOutcome};
pub use source::{ByteSource, FileByteSource, MemoryByteSource};
