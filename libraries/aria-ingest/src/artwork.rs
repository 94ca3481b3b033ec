//! Embedded cover art selection

use base64::{engine::general_purpose::STANDARD, Engine as _};
use lofty::PictureType;

/// Maximum cover size (5MB)
const MAX_COVER_SIZE: usize = 5 * 1024 * 1024;

/// Cover image extracted from an audio file
///
/// The bytes keep their original encoding; nothing is re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverArt {
    /// Raw image bytes as they were embedded
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl CoverArt {
    /// Create new cover art
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self { data, mime_type }
    }

    /// Get the data as a base64-encoded string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Get the image as a `data:` URL the host can display directly
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Pick the cover image from a parsed tag
///
/// Prefers the front cover, falls back to the first picture. Oversized
/// images are skipped rather than failing the whole ingestion.
pub(crate) fn select_cover(tag: &lofty::Tag) -> Option<CoverArt> {
    let pictures = tag.pictures();
    if pictures.is_empty() {
        return None;
    }

    let picture = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first())?;

    let data = picture.data();
    if data.len() > MAX_COVER_SIZE {
        tracing::warn!(
            "cover art too large ({} bytes, max {}), skipping",
            data.len(),
            MAX_COVER_SIZE
        );
        return None;
    }

    let mime_type = picture
        .mime_type()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    Some(CoverArt::new(data.to_vec(), mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_encoding() {
        let cover = CoverArt::new(vec![0xff, 0xd8, 0xff], "image/jpeg".to_string());
        assert_eq!(cover.to_base64(), "/9j/");
    }

    #[test]
    fn data_url_carries_mime_type() {
        let cover = CoverArt::new(vec![1, 2, 3], "image/png".to_string());
        let url = cover.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
