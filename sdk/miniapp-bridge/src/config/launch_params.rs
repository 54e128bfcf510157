//! Launch parameters the host appends to the page URL.
//!
//! The host passes them URL-encoded, usually in the fragment
//! (`#tgWebAppVersion=6.4&tgWebAppPlatform=ios&...`), sometimes in the query.

use crate::components::Platform;
use crate::error::config::ConfigError;
use crate::protocol::incoming::ThemeParamsData;

use common::{ErrorLocation, Version};

use std::panic::Location;

use const_format::concatcp;
use log::debug;
use url::{Url, form_urlencoded};

const KEY_PREFIX: &str = "tgWebApp";
pub const VERSION_KEY: &str = concatcp!(KEY_PREFIX, "Version");
pub const PLATFORM_KEY: &str = concatcp!(KEY_PREFIX, "Platform");
pub const INIT_DATA_KEY: &str = concatcp!(KEY_PREFIX, "Data");
pub const THEME_PARAMS_KEY: &str = concatcp!(KEY_PREFIX, "ThemeParams");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub version: Version,
    pub platform: Platform,
    /// Raw init data. Signature validation happens elsewhere.
    pub init_data: Option<String>,
    pub theme_params: ThemeParamsData,
}

impl LaunchParams {
    /// Parse an encoded parameter string, with or without a leading `#` or `?`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LaunchParams`] if the version or platform is
    /// missing, the version is malformed, or the theme is not a JSON object.
    #[track_caller]
    pub fn parse(encoded: &str) -> Result<Self, ConfigError> {
        let encoded = encoded.trim_start_matches(['#', '?']);

        let mut version = None;
        let mut platform = None;
        let mut init_data = None;
        let mut theme_params = None;

        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            match key.as_ref() {
                VERSION_KEY => version = Some(value.into_owned()),
                PLATFORM_KEY => platform = Some(value.into_owned()),
                INIT_DATA_KEY => init_data = Some(value.into_owned()),
                THEME_PARAMS_KEY => theme_params = Some(value.into_owned()),
                other => debug!("Ignoring launch parameter {}", other),
            }
        }

        let Some(version) = version else {
            return Err(missing(VERSION_KEY));
        };
        let version = Version::parse(&version).map_err(|e| ConfigError::LaunchParams {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        let Some(platform) = platform else {
            return Err(missing(PLATFORM_KEY));
        };
        let Ok(platform) = platform.parse::<Platform>();

        let theme_params = match theme_params {
            Some(json) => serde_json::from_str(&json).map_err(|e| ConfigError::LaunchParams {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{THEME_PARAMS_KEY}: {e}"),
            })?,
            None => ThemeParamsData::default(),
        };

        Ok(Self {
            version,
            platform,
            init_data,
            theme_params,
        })
    }

    /// Parse the parameters out of a full page URL.
    ///
    /// The fragment is preferred; the query is used when the fragment does
    /// not carry a version.
    #[track_caller]
    pub fn from_url(page_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(page_url).map_err(|e| ConfigError::LaunchParams {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("invalid page URL: {e}"),
        })?;

        match url.fragment() {
            Some(fragment) if fragment.contains(VERSION_KEY) => Self::parse(fragment),
            _ => Self::parse(url.query().unwrap_or_default()),
        }
    }

    /// Encode as a fragment-style parameter string.
    pub fn to_encoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair(VERSION_KEY, &self.version.to_string())
            .append_pair(PLATFORM_KEY, self.platform.as_str());
        if let Some(init_data) = &self.init_data {
            serializer.append_pair(INIT_DATA_KEY, init_data);
        }
        if self.theme_params != ThemeParamsData::default()
            && let Ok(json) = serde_json::to_string(&self.theme_params)
        {
            serializer.append_pair(THEME_PARAMS_KEY, &json);
        }
        serializer.finish()
    }
}

#[track_caller]
fn missing(key: &str) -> ConfigError {
    ConfigError::LaunchParams {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("missing {key}"),
    }
}
