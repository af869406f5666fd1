//! Validation of user-supplied parameters.

use crate::session::MAX_VARIATION_COUNT;

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "jpeg" | "png" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: jpeg, png, webp")),
    }
}

/// Validate the number of variations per batch.
///
/// # Errors
///
/// Returns an error outside `1..=10`.
pub fn validate_variation_count(count: usize) -> Result<(), String> {
    if (1..=MAX_VARIATION_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(format!("Unsupported variation count {count}. Valid: 1 to {MAX_VARIATION_COUNT}"))
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "png" => "png",
        "webp" => "webp",
        // jpeg and any unknown format default to jpg
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_format_valid() {
        assert!(validate_format("jpeg").is_ok());
        assert!(validate_format("png").is_ok());
        assert!(validate_format("webp").is_ok());
    }

    #[test]
    fn validate_format_invalid() {
        assert!(validate_format("gif").is_err());
        assert!(validate_format("jpg").is_err());
    }

    #[test]
    fn variation_count_range() {
        assert!(validate_variation_count(1).is_ok());
        assert!(validate_variation_count(10).is_ok());
        assert!(validate_variation_count(0).is_err());
        assert!(validate_variation_count(11).is_err());
    }

    #[test]
    fn format_extension_mapping() {
        assert_eq!(format_extension("jpeg"), "jpg");
        assert_eq!(format_extension("png"), "png");
        assert_eq!(format_extension("webp"), "webp");
    }
}
