//! Metadata extraction from audio tags

use crate::artwork::{self, CoverArt};
use crate::error::{IngestError, Result};
use lofty::{Accessor, AudioFile, Probe, TaggedFileExt};
use std::io::Cursor;
use std::path::Path;

/// Extracted metadata from an audio file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album title
    pub album: Option<String>,

    /// Album artist (may differ from track artist)
    pub album_artist: Option<String>,

    /// Track number
    pub track_number: Option<u32>,

    /// Disc number
    pub disc_number: Option<u32>,

    /// Year
    pub year: Option<i32>,

    /// Genres (can be multiple)
    pub genres: Vec<String>,

    /// Duration in seconds
    pub duration_seconds: Option<f64>,

    /// Bitrate in kbps
    pub bitrate: Option<u32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Number of channels
    pub channels: Option<u8>,

    /// File format (extension)
    pub file_format: String,
}

impl ExtractedMetadata {
    /// Check if metadata is mostly empty (only title or filename)
    pub fn is_sparse(&self) -> bool {
        self.artist.is_none() && self.album.is_none() && self.genres.is_empty()
    }

    /// Degraded metadata for the hash-only fallback
    ///
    /// Only what the source name alone can provide: a title from the
    /// file stem and a format from the extension.
    pub fn sparse_for(source_name: &str) -> Self {
        let path = Path::new(source_name);
        Self {
            title: path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string()),
            file_format: format_from_name(source_name),
            ..Default::default()
        }
    }
}

fn format_from_name(source_name: &str) -> String {
    Path::new(source_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Parse tags and cover art from a fully received byte buffer
///
/// Tag parsing needs a seekable source, which is why the pipeline's tag
/// branch materializes its copy of the stream before calling this.
pub(crate) fn parse_tag_buffer(
    buffer: &[u8],
    source_name: &str,
) -> Result<(ExtractedMetadata, Option<CoverArt>)> {
    let tagged_file = Probe::new(Cursor::new(buffer))
        .guess_file_type()
        .map_err(|e| IngestError::Parse(format!("Failed to probe {}: {}", source_name, e)))?
        .read()
        .map_err(|e| IngestError::Parse(format!("Failed to parse {}: {}", source_name, e)))?;

    // Prefer the primary tag (ID3v2 for MP3, Vorbis for OGG/FLAC)
    let tag = tagged_file.primary_tag().or(tagged_file.first_tag());

    let properties = tagged_file.properties();
    let duration_seconds = properties.duration().as_secs_f64();
    let bitrate = properties.audio_bitrate().map(|b| b as u32);
    let sample_rate = properties.sample_rate();
    let channels = properties.channels().map(|c| c as u8);

    let cover = tag.and_then(artwork::select_cover);

    let (title, artist, album, album_artist, track_number, disc_number, year, genres) =
        if let Some(tag) = tag {
            let title = tag.title().map(|s| s.to_string());
            let artist = tag.artist().map(|s| s.to_string());
            let album = tag.album().map(|s| s.to_string());
            let album_artist = tag
                .get_string(&lofty::ItemKey::AlbumArtist)
                .map(|s| s.to_string());
            let track_number = tag.track().map(|t| t as u32);
            let disc_number = tag.disk().map(|d| d as u32);
            let year = tag.year().map(|y| y as i32);

            // Genres can be multiple, separated by various delimiters
            let genres: Vec<String> = tag
                .genre()
                .map(|g| {
                    g.split(&[',', ';', '/'][..])
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<String>>()
                })
                .unwrap_or_default();

            (
                title,
                artist,
                album,
                album_artist,
                track_number,
                disc_number,
                year,
                genres,
            )
        } else {
            (None, None, None, None, None, None, None, Vec::new())
        };

    // Fallback: use the source name as title if the tags carry none
    let title = title.or_else(|| {
        Path::new(source_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    });

    let metadata = ExtractedMetadata {
        title,
        artist,
        album,
        album_artist,
        track_number,
        disc_number,
        year,
        genres,
        duration_seconds: Some(duration_seconds),
        bitrate,
        sample_rate,
        channels,
        file_format: format_from_name(source_name),
    };

    Ok((metadata, cover))
}
