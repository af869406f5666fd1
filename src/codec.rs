//! File and blob encoding for inline request parts.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use crate::error::StudioError;
use crate::ports::InlineImage;

/// Base64-encode raw bytes with the standard alphabet and padding.
#[must_use]
pub fn encode_bytes(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Read a file and return its full contents as a base64 payload.
///
/// # Errors
///
/// Returns [`StudioError::Read`] if the file cannot be read.
pub fn encode_file(path: &Path) -> Result<String, StudioError> {
    let data = std::fs::read(path)
        .map_err(|e| StudioError::Read(format!("{}: {e}", path.display())))?;
    Ok(encode_bytes(&data))
}

/// Strip a `data:<mime>;base64,` prefix, returning the MIME type (if the URL
/// declared one) and the bare payload.
///
/// # Errors
///
/// Returns [`StudioError::Read`] if the input is not a base64 data URL.
pub fn split_data_url(input: &str) -> Result<(Option<&str>, &str), StudioError> {
    let rest = input
        .strip_prefix("data:")
        .ok_or_else(|| StudioError::Read("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| StudioError::Read("data URL has no payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| StudioError::Read("data URL is not base64-encoded".into()))?;
    Ok(((!mime.is_empty()).then_some(mime), payload))
}

/// Best-effort sniffing of an image MIME type from base64 data.
///
/// Returns `None` when the payload does not decode or the format is unknown.
#[must_use]
pub fn infer_mime_type(base64: &str) -> Option<&'static str> {
    let bytes = STANDARD.decode(base64.trim()).ok()?;
    image::guess_format(&bytes).ok().map(|f| f.to_mime_type())
}

/// Load a reference image from a file path or a `data:` URL.
///
/// The MIME type comes from the data URL or the file extension; when neither
/// names an image format the content is sniffed.
///
/// # Errors
///
/// Returns [`StudioError::Read`] if the source cannot be read or its type
/// cannot be determined.
pub fn load_reference_image(source: &str) -> Result<InlineImage, StudioError> {
    if source.starts_with("data:") {
        let (mime, payload) = split_data_url(source)?;
        let mime = mime
            .or_else(|| infer_mime_type(payload))
            .ok_or_else(|| StudioError::Read("could not determine the image type".into()))?;
        return Ok(InlineImage::new(mime, payload));
    }

    let path = Path::new(source);
    let data = encode_file(path)?;
    let mime = ImageFormat::from_path(path)
        .ok()
        .map(|f| f.to_mime_type())
        .or_else(|| infer_mime_type(&data))
        .ok_or_else(|| {
            StudioError::Read(format!("could not determine the image type of {}", path.display()))
        })?;
    Ok(InlineImage::new(mime, data))
}
