//! Shared value types for the Mini App bridge.
//!
//! This crate contains the small, dependency-light types that both the
//! protocol library and the applications built on it need. They carry no
//! protocol logic of their own.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking, platform versions, colours
//! - **miniapp-bridge**: transport, capability checks and UI-proxy components
//! - **host-simulator**: application wiring the bridge to an in-process host
//!
//! Keeping these types here lets the simulator and downstream tests build
//! values without pulling in the bridge itself.

pub mod color;
pub mod error;
pub mod version;

pub use color::{RgbColor, is_rgb, is_rgb_short, to_rgb};
pub use error::color_error::ColorError;
pub use error::error_location::ErrorLocation;
pub use error::version_error::VersionError;
pub use version::Version;
