//! RGB colour normalization.
//!
//! The host only understands `#rrggbb`. Callers may hand us any of the common
//! CSS spellings, so everything is funnelled through [`to_rgb`].

use crate::ErrorLocation;
use crate::error::color_error::ColorError;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const RGB_FULL_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";
const RGB_SHORT_PATTERN: &str = r"^#[0-9a-fA-F]{3}$";
const RGB_FUNCTION_PATTERN: &str = r"^rgb\((\d{1,3}),(\d{1,3}),(\d{1,3})\)$";
const RGBA_FUNCTION_PATTERN: &str = r"^rgba\((\d{1,3}),(\d{1,3}),(\d{1,3}),\d{1,3}\)$";

static RGB_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(RGB_FULL_PATTERN).expect("valid regex pattern"));
static RGB_SHORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(RGB_SHORT_PATTERN).expect("valid regex pattern"));
static RGB_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(RGB_FUNCTION_PATTERN).expect("valid regex pattern"));
static RGBA_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(RGBA_FUNCTION_PATTERN).expect("valid regex pattern"));

/// Colour in canonical lowercase `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor(String);

impl RgbColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RgbColor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ColorError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        to_rgb(&value)
    }
}

impl TryFrom<&str> for RgbColor {
    type Error = ColorError;

    #[track_caller]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        to_rgb(value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.0
    }
}

/// True for `#RRGGBB`.
pub fn is_rgb(value: &str) -> bool {
    RGB_FULL.is_match(value)
}

/// True for `#RGB`.
pub fn is_rgb_short(value: &str) -> bool {
    RGB_SHORT.is_match(value)
}

/// Convert `#RGB`, `#RRGGBB`, `rgb(r,g,b)` or `rgba(r,g,b,a)` to `#rrggbb`.
///
/// Whitespace anywhere in the input is ignored.
///
/// # Errors
///
/// Returns [`ColorError::Format`] when no known format matches or an `rgb`
/// component exceeds 255.
#[track_caller]
pub fn to_rgb(value: &str) -> Result<RgbColor, ColorError> {
    let clean: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    if is_rgb(&clean) {
        return Ok(RgbColor(clean.to_ascii_lowercase()));
    }

    if is_rgb_short(&clean) {
        let expanded = clean
            .chars()
            .skip(1)
            .flat_map(|c| [c, c])
            .collect::<String>()
            .to_ascii_lowercase();
        return Ok(RgbColor(format!("#{expanded}")));
    }

    let format_error = || ColorError::Format {
        value: value.to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let captures = RGB_FUNCTION
        .captures(&clean)
        .or_else(|| RGBA_FUNCTION.captures(&clean))
        .ok_or_else(format_error)?;

    let mut color = String::from("#");
    for index in 1..=3 {
        let component: u8 = captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(format_error)?;
        color.push_str(&format!("{component:02x}"));
    }

    Ok(RgbColor(color))
}
