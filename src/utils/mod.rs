pub mod content_type;
pub mod validation;

pub use content_type::get_content_type;
pub use validation::{is_supported_image_upload, validate_image_upload, IMAGE_UPLOAD};
