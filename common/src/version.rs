//! Negotiated platform version.
//!
//! The host reports the version of the Mini App platform it implements once per
//! session. Every capability question ("may this command be sent?") is answered
//! by comparing against it.

use crate::ErrorLocation;
use crate::error::version_error::VersionError;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform version as an ordered `(major, minor)` pair.
///
/// Ordering is lexicographic: major first, then minor. The derived `Ord`
/// relies on the field declaration order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u32,
    minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub const fn major(&self) -> u32 {
        self.major
    }

    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Parse `"<major>.<minor>"`.
    ///
    /// Exactly two dot-separated components are accepted, each made of ASCII
    /// digits only. Signs, whitespace, empty components and a third component
    /// are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Parse`] when the text is not a valid version.
    #[track_caller]
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let mut parts = text.split('.');
        let (Some(major), Some(minor), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(VersionError::Parse {
                input: text.to_string(),
                reason: String::from("expected exactly two dot-separated components"),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(Self {
            major: parse_component(text, major)?,
            minor: parse_component(text, minor)?,
        })
    }

    /// True when `self` is equal to or newer than `other`.
    pub fn at_least(&self, other: Version) -> bool {
        *self >= other
    }
}

#[track_caller]
fn parse_component(input: &str, component: &str) -> Result<u32, VersionError> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::Parse {
            input: input.to_string(),
            reason: format!("component \"{component}\" is not a non-negative integer"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    component.parse().map_err(|e| VersionError::Parse {
        input: input.to_string(),
        reason: format!("component \"{component}\" is out of range: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

impl FromStr for Version {
    type Err = VersionError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl Display for Version {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}.{}", self.major, self.minor)
    }
}
