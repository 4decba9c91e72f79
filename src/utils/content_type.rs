//! Content-type utilities for multipart uploads

/// Get the MIME content-type for a file extension
///
/// # Arguments
/// * `format` - The file extension (e.g., "jpg", "png", "webp")
///
/// # Returns
/// The corresponding MIME type string, `application/octet-stream` if unknown
pub fn get_content_type(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "" => "application/octet-stream",
        other => mime_guess::from_ext(other)
            .first_raw()
            .unwrap_or("application/octet-stream"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_types() {
        assert_eq!(get_content_type("jpg"), "image/jpeg");
        assert_eq!(get_content_type("jpeg"), "image/jpeg");
        assert_eq!(get_content_type("png"), "image/png");
        assert_eq!(get_content_type("webp"), "image/webp");
        assert_eq!(get_content_type("heic"), "image/heic");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(get_content_type("JPG"), "image/jpeg");
        assert_eq!(get_content_type("Png"), "image/png");
    }

    #[test]
    fn test_falls_back_to_mime_guess() {
        assert_eq!(get_content_type("gif"), "image/gif");
        assert_eq!(get_content_type("json"), "application/json");
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(get_content_type(""), "application/octet-stream");
        assert_eq!(get_content_type("xyzzy"), "application/octet-stream");
    }
}
