use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::error::ValidationError;

//
// ─── FORMAT DETECTION ──────────────────────────────────────────────────────────
//

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Sniff the format from the leading bytes; the file name is not trusted.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            return Some(Self::Png);
        }
        if bytes.starts_with(JPEG_SIGNATURE) {
            return Some(Self::Jpeg);
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        None
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

//
// ─── UPLOADED IMAGE ────────────────────────────────────────────────────────────
//

/// A validated problem photo. Clones share the byte buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct ProblemImage {
    file_name: String,
    format: ImageFormat,
    bytes: Arc<[u8]>,
}

impl ProblemImage {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyImage` for empty input and
    /// `ValidationError::UnsupportedImage` when the bytes are not PNG/JPEG/WEBP.
    pub fn from_upload(
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, ValidationError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        let format = ImageFormat::detect(&bytes).ok_or(ValidationError::UnsupportedImage)?;
        Ok(Self {
            file_name: file_name.into(),
            format,
            bytes: Arc::from(bytes),
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:` URL used for the upload preview.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for ProblemImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemImage")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        bytes
    }

    #[test]
    fn detects_supported_formats() {
        assert_eq!(ImageFormat::detect(&png_bytes()), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::detect(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            Some(ImageFormat::Webp)
        );
        assert_eq!(ImageFormat::detect(b"GIF89a"), None);
        assert_eq!(ImageFormat::detect(b"RIFF"), None);
    }

    #[test]
    fn upload_rejects_empty_and_unknown() {
        assert_eq!(
            ProblemImage::from_upload("a.png", Vec::new()).unwrap_err(),
            ValidationError::EmptyImage
        );
        assert_eq!(
            ProblemImage::from_upload("notes.txt", b"hello".to_vec()).unwrap_err(),
            ValidationError::UnsupportedImage
        );
    }

    #[test]
    fn preview_is_a_base64_data_url() {
        let image = ProblemImage::from_upload("photo.jpg", png_bytes()).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        let url = image.data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        let encoded = url.trim_start_matches("data:image/png;base64,");
        assert_eq!(BASE64_STANDARD.decode(encoded).unwrap(), png_bytes());
    }

    #[test]
    fn debug_does_not_dump_bytes() {
        let image = ProblemImage::from_upload("p.png", png_bytes()).unwrap();
        let rendered = format!("{image:?}");
        assert!(rendered.contains("len: 12"));
        assert!(!rendered.contains("137"));
    }
}
