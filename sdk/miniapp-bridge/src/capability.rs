//! Capability matrix: the minimum platform version at which the host began
//! accepting each outgoing command.
//!
//! The table blocks *known* unsupported commands on old hosts. It is not an
//! allow-list: a command missing from the table is treated as supported at
//! every version, so protocol additions that have not been catalogued here
//! are never blocked.

use crate::protocol::outgoing::{
    TRY_INSTANT_VIEW_PARAM, WEB_APP_CLOSE_SCAN_QR_POPUP, WEB_APP_OPEN_INVOICE, WEB_APP_OPEN_LINK,
    WEB_APP_OPEN_POPUP, WEB_APP_OPEN_SCAN_QR_POPUP, WEB_APP_OPEN_TG_LINK,
    WEB_APP_READ_TEXT_FROM_CLIPBOARD, WEB_APP_SET_BACKGROUND_COLOR, WEB_APP_SET_HEADER_COLOR,
    WEB_APP_SETUP_BACK_BUTTON, WEB_APP_TRIGGER_HAPTIC_FEEDBACK,
};

use common::Version;

use std::collections::HashMap;

use once_cell::sync::Lazy;

const V6_1: Version = Version::new(6, 1);
const V6_2: Version = Version::new(6, 2);
const V6_4: Version = Version::new(6, 4);

static METHOD_REQUIREMENTS: Lazy<HashMap<&'static str, Version>> = Lazy::new(|| {
    HashMap::from([
        (WEB_APP_OPEN_TG_LINK, V6_1),
        (WEB_APP_OPEN_INVOICE, V6_1),
        (WEB_APP_SETUP_BACK_BUTTON, V6_1),
        (WEB_APP_SET_BACKGROUND_COLOR, V6_1),
        (WEB_APP_SET_HEADER_COLOR, V6_1),
        (WEB_APP_TRIGGER_HAPTIC_FEEDBACK, V6_1),
        (WEB_APP_OPEN_POPUP, V6_2),
        (WEB_APP_OPEN_SCAN_QR_POPUP, V6_4),
        (WEB_APP_CLOSE_SCAN_QR_POPUP, V6_4),
        (WEB_APP_READ_TEXT_FROM_CLIPBOARD, V6_4),
    ])
});

const PARAM_REQUIREMENTS: &[(&str, &str, Version)] =
    &[(WEB_APP_OPEN_LINK, TRY_INSTANT_VIEW_PARAM, V6_4)];

/// Minimum version for `method`, or `None` if the method is not catalogued.
pub fn required_version(method: &str) -> Option<Version> {
    METHOD_REQUIREMENTS.get(method).copied()
}

/// Minimum version for `param` of `method`, or `None` if it is not gated.
pub fn required_param_version(method: &str, param: &str) -> Option<Version> {
    PARAM_REQUIREMENTS
        .iter()
        .find(|(m, p, _)| *m == method && *p == param)
        .map(|(_, _, version)| *version)
}

/// True when the host at `version` accepts `method`.
pub fn is_supported(method: &str, version: Version) -> bool {
    required_version(method).is_none_or(|required| version.at_least(required))
}

/// True when the host at `version` accepts `param` on `method`.
pub fn is_param_supported(method: &str, param: &str, version: Version) -> bool {
    required_param_version(method, param).is_none_or(|required| version.at_least(required))
}

/// Every catalogued method with its minimum version.
pub fn catalogued_methods() -> impl Iterator<Item = (&'static str, Version)> {
    METHOD_REQUIREMENTS.iter().map(|(method, version)| (*method, *version))
}
