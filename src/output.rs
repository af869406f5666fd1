//! File naming, image saving, and format conversion.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::StudioError;
use crate::params::format_extension;
use crate::ports::InlineImage;

/// Name of the file the caption is written to.
pub const CAPTION_FILE: &str = "caption.txt";

const FILE_PREFIX: &str = "sparkles-nail-loft";

/// Filename for a generated image, e.g. `sparkles-nail-loft-master-1700000000000-1.jpg`.
#[must_use]
pub fn output_filename(id: &str, format: &str) -> String {
    format!("{FILE_PREFIX}-{id}.{}", format_extension(format))
}

/// Path of a generated image inside the output directory.
#[must_use]
pub fn output_path(dir: &Path, id: &str, format: &str) -> PathBuf {
    dir.join(output_filename(id, format))
}

/// Decode a base64 image and save it, converting format if necessary.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64, the file cannot be
/// written, or format conversion fails.
pub fn save_image(
    image: &InlineImage,
    target_format: &str,
    output_path: &Path,
) -> Result<(), StudioError> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(image.data.as_bytes())
        .map_err(|e| StudioError::ImageConversion(format!("Invalid base64 image data: {e}")))?;

    if mime_matches_format(&image.mime_type, target_format) {
        std::fs::write(output_path, data).map_err(StudioError::Io)
    } else {
        convert_and_save(&data, target_format, output_path)
    }
}

/// Write the caption next to the images and return its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_caption(dir: &Path, caption: &str) -> Result<PathBuf, StudioError> {
    let path = dir.join(CAPTION_FILE);
    std::fs::write(&path, caption)?;
    Ok(path)
}

fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!((mime, format), ("image/jpeg", "jpeg") | ("image/png", "png") | ("image/webp", "webp"))
}

fn convert_and_save(
    data: &[u8],
    target_format: &str,
    output_path: &Path,
) -> Result<(), StudioError> {
    let img = image::load_from_memory(data)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let image_format = match target_format {
        "jpeg" => image::ImageFormat::Jpeg,
        "png" => image::ImageFormat::Png,
        "webp" => image::ImageFormat::WebP,
        other => {
            return Err(StudioError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    // JPEG has no alpha channel
    let img = if image_format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    img.save_with_format(output_path, image_format).map_err(|e| {
        StudioError::ImageConversion(format!("Failed to save as {target_format}: {e}"))
    })
}
