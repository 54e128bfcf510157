use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ColorError {
    #[error("Color Format Error: \"{value}\" does not match any known RGB format {location}")]
    Format {
        value: String,
        location: ErrorLocation,
    },
}
