//! Ingestion pipeline integration tests
//!
//! Exercises the tee'd hash+tag pass end to end over hand-built
//! RIFF/WAVE bytes: real parseable audio without binary fixtures.

use aria_ingest::{
    calculate_buffer_hash, ingest, ingest_with_fallback, FileByteSource, MemoryByteSource,
};

// ===== WAV Fixture Builder =====

fn push_chunk(out: &mut Vec<u8>, id: &[u8; 4], body: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0); // RIFF chunks are word-aligned
    }
}

/// Minimal PCM WAV: 16-bit mono 8 kHz, `data_len` bytes of silence,
/// optionally carrying a RIFF INFO tag (title + artist)
fn build_wav(data_len: usize, with_info: bool) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let channels: u16 = 1;
    let bits: u16 = 16;
    let block_align: u16 = channels * bits / 8;
    let byte_rate: u32 = sample_rate * u32::from(block_align);

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&channels.to_le_bytes());
    fmt.extend_from_slice(&sample_rate.to_le_bytes());
    fmt.extend_from_slice(&byte_rate.to_le_bytes());
    fmt.extend_from_slice(&block_align.to_le_bytes());
    fmt.extend_from_slice(&bits.to_le_bytes());

    let mut body = Vec::new();
    body.extend_from_slice(b"WAVE");
    push_chunk(&mut body, b"fmt ", &fmt);
    push_chunk(&mut body, b"data", &vec![0u8; data_len]);

    if with_info {
        let mut info = Vec::new();
        info.extend_from_slice(b"INFO");
        push_chunk(&mut info, b"INAM", b"Night Drive\0");
        push_chunk(&mut info, b"IART", b"The Testers\0");
        push_chunk(&mut body, b"LIST", &info);
    }

    let mut out = Vec::new();
    push_chunk(&mut out, b"RIFF", &body);
    out
}

// ===== Streaming Pass =====

#[tokio::test]
async fn test_ingest_produces_hash_and_properties() {
    let bytes = build_wav(16_000, false); // one second of audio
    let source = MemoryByteSource::new("ambient-loop.wav", bytes.clone());

    let outcome = ingest(&source).await.unwrap();

    assert_eq!(outcome.hash, calculate_buffer_hash(&bytes));
    assert_eq!(outcome.hash.len(), 64);

    let metadata = &outcome.metadata;
    assert_eq!(metadata.sample_rate, Some(8000));
    assert_eq!(metadata.channels, Some(1));
    let duration = metadata.duration_seconds.unwrap();
    assert!((0.9..=1.1).contains(&duration), "duration was {duration}");
    assert_eq!(metadata.file_format, "wav");

    // No tags: title falls back to the file stem
    assert_eq!(metadata.title.as_deref(), Some("ambient-loop"));
    assert!(metadata.is_sparse());
    assert!(outcome.cover.is_none());
}

#[tokio::test]
async fn test_ingest_reads_embedded_tags() {
    let bytes = build_wav(16_000, true);
    let source = MemoryByteSource::new("upload.wav", bytes);

    let outcome = ingest(&source).await.unwrap();

    assert_eq!(outcome.metadata.title.as_deref(), Some("Night Drive"));
    assert_eq!(outcome.metadata.artist.as_deref(), Some("The Testers"));
    assert!(!outcome.metadata.is_sparse());
}

#[tokio::test]
async fn test_hash_is_invariant_to_source_name() {
    let bytes = build_wav(16_000, true);
    let first = MemoryByteSource::new("original-name.wav", bytes.clone());
    let second = MemoryByteSource::new("renamed copy (1).wav", bytes);

    let outcome_one = ingest(&first).await.unwrap();
    let outcome_two = ingest(&second).await.unwrap();

    assert_eq!(outcome_one.hash, outcome_two.hash);
    // Titles come from the tag, so the whole metadata matches too
    assert_eq!(outcome_one.metadata, outcome_two.metadata);
}

#[tokio::test]
async fn test_multi_chunk_stream_hashes_correctly() {
    // Data well past one tee chunk, so the hash branch sees many chunks
    let bytes = build_wav(300_000, false);
    let source = MemoryByteSource::new("long.wav", bytes.clone());

    let outcome = ingest(&source).await.unwrap();

    assert_eq!(outcome.hash, calculate_buffer_hash(&bytes));
}

#[tokio::test]
async fn test_file_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.wav");
    let bytes = build_wav(16_000, true);
    std::fs::write(&path, &bytes).unwrap();

    let source = FileByteSource::new(&path);
    let outcome = ingest(&source).await.unwrap();

    assert_eq!(outcome.hash, calculate_buffer_hash(&bytes));
    assert_eq!(outcome.metadata.title.as_deref(), Some("Night Drive"));
}

// ===== Fallback Path =====

#[tokio::test]
async fn test_unparseable_source_is_an_error_without_fallback() {
    let source = MemoryByteSource::new("junk.bin", b"not audio at all".to_vec());
    assert!(ingest(&source).await.is_err());
}

#[tokio::test]
async fn test_fallback_degrades_to_hash_only() {
    let bytes = b"not audio at all".to_vec();
    let source = MemoryByteSource::new("Live Bootleg.bin", bytes.clone());

    let outcome = ingest_with_fallback(&source).await.unwrap();

    assert_eq!(outcome.hash, calculate_buffer_hash(&bytes));
    assert!(outcome.cover.is_none());
    assert!(outcome.metadata.is_sparse());
    assert_eq!(outcome.metadata.title.as_deref(), Some("Live Bootleg"));
}

#[tokio::test]
async fn test_fallback_passes_parseable_sources_through() {
    let bytes = build_wav(16_000, true);
    let source = MemoryByteSource::new("fine.wav", bytes);

    let outcome = ingest_with_fallback(&source).await.unwrap();

    // Full metadata survived; no degradation happened
    assert_eq!(outcome.metadata.title.as_deref(), Some("Night Drive"));
}

#[tokio::test]
async fn test_empty_source_hashes_to_known_vector() {
    let source = MemoryByteSource::new("empty.bin", Vec::new());

    let outcome = ingest_with_fallback(&source).await.unwrap();

    assert_eq!(
        outcome.hash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[tokio::test]
async fn test_unreadable_source_stays_an_error() {
    let source = FileByteSource::new("/nonexistent/upload.mp3");
    assert!(ingest_with_fallback(&source).await.is_err());
}
