pub mod color_error;
pub mod error_location;
pub mod version_error;
