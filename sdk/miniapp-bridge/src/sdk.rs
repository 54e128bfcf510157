//! Session bootstrap.

use crate::bridge::Bridge;
use crate::channel::HostChannel;
use crate::components::{
    BackButton, Clipboard, ClosingBehavior, Haptics, Layout, MainButton, Popup, QrScanner,
    ThemeParams, Viewport, ViewportState, WebApp,
};
use crate::config::{LaunchParams, SdkConfig};
use crate::error::CoreError;
use crate::protocol::outgoing::OutgoingCommand;
use crate::scoped::BridgeScoped;

use common::{RgbColor, Version, to_rgb};

use std::sync::Arc;

use log::{debug, info};

const DEFAULT_BUTTON_COLOR: &str = "#2481cc";
const DEFAULT_BUTTON_TEXT_COLOR: &str = "#ffffff";
const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Every component of one session, wired to a single bridge.
pub struct Sdk {
    pub web_app: WebApp,
    pub back_button: BackButton,
    pub main_button: MainButton,
    pub closing_behavior: ClosingBehavior,
    pub haptics: Haptics,
    pub layout: Layout,
    pub popup: Popup,
    pub qr_scanner: QrScanner,
    pub clipboard: Clipboard,
    pub viewport: Viewport,
    pub theme_params: ThemeParams,
    scoped: BridgeScoped,
    launch: LaunchParams,
}

impl Sdk {
    /// Build the bridge and every component for one session.
    ///
    /// Web clients are sent `iframe_ready` first. With
    /// [`SdkConfig::request_initial_state`] the host is then asked for its
    /// theme and viewport.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if a bootstrap command cannot be posted or a
    /// fallback colour fails to parse.
    #[track_caller]
    pub fn init(
        launch: LaunchParams,
        config: &SdkConfig,
        channel: Arc<dyn HostChannel>,
    ) -> Result<Self, CoreError> {
        info!(
            "Initializing session: version {}, platform {}",
            launch.version, launch.platform
        );

        let bridge = Arc::new(Bridge::new(channel).with_debug(config.debug));
        let scoped =
            BridgeScoped::new(bridge, launch.version).with_compat_check(config.check_compat);

        if launch.platform.is_web() {
            scoped.send(&OutgoingCommand::IframeReady)?;
        }

        let theme = ThemeParams::new(scoped.clone(), launch.theme_params.clone());
        let button_color = theme_or(theme.button_color(), DEFAULT_BUTTON_COLOR)?;
        let button_text_color = theme_or(theme.button_text_color(), DEFAULT_BUTTON_TEXT_COLOR)?;
        let background_color = theme_or(theme.bg_color(), DEFAULT_BACKGROUND_COLOR)?;

        let sdk = Self {
            web_app: WebApp::new(scoped.clone(), launch.platform.clone()),
            back_button: BackButton::new(scoped.clone()),
            main_button: MainButton::new(scoped.clone(), button_color, button_text_color),
            closing_behavior: ClosingBehavior::new(scoped.clone()),
            haptics: Haptics::new(scoped.clone()),
            layout: Layout::new(scoped.clone(), background_color),
            popup: Popup::new(scoped.clone()),
            qr_scanner: QrScanner::new(scoped.clone()),
            clipboard: Clipboard::new(scoped.clone()),
            viewport: Viewport::new(scoped.clone(), ViewportState::default()),
            theme_params: theme,
            scoped,
            launch,
        };

        if config.request_initial_state {
            sdk.theme_params.request()?;
            sdk.viewport.request()?;
        }

        Ok(sdk)
    }

    pub fn version(&self) -> Version {
        self.scoped.version()
    }

    pub fn launch_params(&self) -> &LaunchParams {
        &self.launch
    }

    /// Shared transport, for feeding host events with [`Bridge::receive`].
    pub fn bridge(&self) -> &Arc<Bridge> {
        self.scoped.bridge()
    }

    pub fn scoped(&self) -> &BridgeScoped {
        &self.scoped
    }
}

#[track_caller]
fn theme_or(color: Option<RgbColor>, fallback: &str) -> Result<RgbColor, CoreError> {
    match color {
        Some(color) => Ok(color),
        None => {
            debug!("Theme colour missing, falling back to {}", fallback);
            Ok(to_rgb(fallback)?)
        }
    }
}
