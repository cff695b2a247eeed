//! Image file to `data:` URI encoding.
//!
//! The MIME type comes from the file's magic bytes, falling back to its
//! extension. Files that are neither are rejected, so every encoded URI
//! starts with `data:image/`.

use std::path::Path;

use base64::Engine;
use tracing::debug;

use crate::error::LensError;

/// Leading byte signatures of common image formats
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (b"II*\x00", "image/tiff"),
    (b"MM\x00*", "image/tiff"),
];

/// Guess an image MIME type from content, then from the file extension
pub fn sniff_mime(bytes: &[u8], path: &Path) -> Option<&'static str> {
    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| bytes.starts_with(sig)) {
        return Some(*mime);
    }
    // RIFF....WEBP
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}

/// Encode raw bytes as a base64 data URI
pub fn encode(bytes: &[u8], mime: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Read an image file and encode it as a data URI
pub async fn read_as_data_uri(path: &Path) -> Result<String, LensError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LensError::FileRead(format!("{}: {}", path.display(), e)))?;

    if bytes.is_empty() {
        return Err(LensError::FileRead(format!("{} is empty", path.display())));
    }

    let mime = sniff_mime(&bytes, path).ok_or_else(|| {
        LensError::FileRead(format!("{} is not a recognized image", path.display()))
    })?;

    debug!(path = %path.display(), mime, size_bytes = bytes.len(), "Encoded image");
    Ok(encode(&bytes, mime))
}
