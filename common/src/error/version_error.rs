use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum VersionError {
    /// The host-supplied text is not `<major>.<minor>`.
    #[error("Version Parse Error: \"{input}\": {reason} {location}")]
    Parse {
        input: String,
        reason: String,
        location: ErrorLocation,
    },
}
