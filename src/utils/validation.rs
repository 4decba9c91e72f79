//! Validation utilities for inventory photo uploads

use crate::error::{ClientError, Result};

/// Photo formats accepted by the analysis backend
pub const IMAGE_UPLOAD: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif", "bmp", "gif"];

pub fn is_supported_image_upload(ext: &str) -> bool {
    IMAGE_UPLOAD.contains(&ext.to_lowercase().as_str())
}

/// Validate that a file extension is an accepted photo format
///
/// # Arguments
/// * `format` - The file extension, without the dot
///
/// # Returns
/// Ok(()) if valid, Err with the list of accepted formats if not
pub fn validate_image_upload(format: &str) -> Result<()> {
    if is_supported_image_upload(format) {
        return Ok(());
    }

    let shown = if format.is_empty() { "(nessuna estensione)" } else { format };
    Err(ClientError::UnsupportedFormat(format!(
        "{} non è una foto valida (ammessi: {})",
        shown,
        IMAGE_UPLOAD.join(", ")
    )))
}
