//! Image ingestion: type detection and decoding to self-contained data URLs.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::StoreError;

/// Image formats the album accepts for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// MIME type string (e.g., "image/jpeg").
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    /// Detect the format from the file's leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            [b'B', b'M', ..] => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Map a file extension to its format, for files whose magic bytes are
    /// inconclusive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// A decoded upload: the image embedded as a base64 data URL.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub data_url: String,
    pub format: ImageFormat,
}

/// Read and decode an image file into its self-contained representation.
///
/// Non-image files are rejected with a `Validation` error; in a batch upload
/// the caller skips the file and continues.
pub async fn decode_image_file(path: &Path) -> Result<DecodedImage, StoreError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(path).await.map_err(|err| {
        StoreError::Validation(format!("Could not read {}: {}", file_name, err))
    })?;

    let format = ImageFormat::sniff(&bytes)
        .or_else(|| {
            path.extension()
                .and_then(|ext| ImageFormat::from_extension(&ext.to_string_lossy()))
        })
        .ok_or_else(|| {
            StoreError::Validation(format!("{} is not a supported image file", file_name))
        })?;

    Ok(DecodedImage {
        data_url: format!("data:{};base64,{}", format.mime(), STANDARD.encode(&bytes)),
        format,
    })
}
