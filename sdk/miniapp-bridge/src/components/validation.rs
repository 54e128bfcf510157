use crate::error::sdk::SdkError;

use common::ErrorLocation;

use std::ops::RangeInclusive;
use std::panic::Location;

/// Check that `value` has a character count within `range`.
#[track_caller]
pub(crate) fn check_length(
    field: &str,
    value: &str,
    range: RangeInclusive<usize>,
) -> Result<(), SdkError> {
    let length = value.chars().count();
    if range.contains(&length) {
        return Ok(());
    }

    Err(SdkError::Validation {
        message: format!(
            "{field} must be {}-{} characters, got {length}",
            range.start(),
            range.end()
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}
