use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;

use crate::error::BoardError;

/// Encode uploaded bytes as a self-contained `data:` URI.
///
/// The MIME type is sniffed from the bytes first; the browser-declared
/// content type is only trusted when sniffing fails and it still claims to be
/// an image (SVG, for instance).
pub fn encode_data_uri(
    bytes: &[u8],
    declared_type: Option<&str>,
    max_bytes: usize,
) -> Result<String, BoardError> {
    if bytes.is_empty() {
        return Err(BoardError::ImageDecode("the file is empty".to_string()));
    }
    if !check_file_size(bytes.len(), max_bytes) {
        return Err(BoardError::ImageTooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    let mime = sniff_mime(bytes, declared_type).ok_or_else(|| {
        BoardError::ImageDecode("the file is not a recognised image".to_string())
    })?;

    debug!("Encoding {} byte upload as {}", bytes.len(), mime);
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn sniff_mime(bytes: &[u8], declared_type: Option<&str>) -> Option<String> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }

    declared_type
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| t.starts_with("image/") && !t.contains(';') && !t.contains(','))
}

/// Check if file size is within the configured limit
pub fn check_file_size(size_bytes: usize, max_bytes: usize) -> bool {
    size_bytes <= max_bytes
}
