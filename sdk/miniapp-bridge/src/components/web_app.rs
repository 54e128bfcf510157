//! Session-wide actions that do not belong to a single piece of host UI.

use crate::capability;
use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{
    INVOICE_CLOSED, IncomingEvent, InvoiceClosed, SETTINGS_BUTTON_PRESSED,
};
use crate::protocol::outgoing::{
    DataSendParams, OpenInvoiceParams, OpenLinkParams, OpenTgLinkParams, OutgoingCommand,
    TRY_INSTANT_VIEW_PARAM, WEB_APP_CLOSE, WEB_APP_DATA_SEND, WEB_APP_OPEN_INVOICE,
    WEB_APP_OPEN_LINK, WEB_APP_OPEN_TG_LINK, WEB_APP_READY,
};
use crate::scoped::BridgeScoped;

use common::{ErrorLocation, Version};

use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::panic::Location;
use std::str::FromStr;

use log::{debug, warn};
use url::Url;

const TG_LINK_HOST: &str = "t.me";
const MAX_DATA_BYTES: usize = 4096;

/// Client the session runs in, as reported by the launch parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Macos,
    Tdesktop,
    Web,
    Weba,
    Webk,
    Unigram,
    Unknown(String),
}

impl Platform {
    /// Web clients embed the page in an iframe and wait for `iframe_ready`.
    pub fn is_web(&self) -> bool {
        matches!(self, Platform::Web | Platform::Weba | Platform::Webk)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Macos => "macos",
            Platform::Tdesktop => "tdesktop",
            Platform::Web => "web",
            Platform::Weba => "weba",
            Platform::Webk => "webk",
            Platform::Unigram => "unigram",
            Platform::Unknown(name) => name,
        }
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "android" => Platform::Android,
            "ios" => Platform::Ios,
            "macos" => Platform::Macos,
            "tdesktop" => Platform::Tdesktop,
            "web" => Platform::Web,
            "weba" => Platform::Weba,
            "webk" => Platform::Webk,
            "unigram" => Platform::Unigram,
            other => Platform::Unknown(other.to_string()),
        })
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebAppOperation {
    Ready,
    Close,
    SendData,
    OpenLink,
    OpenTgLink,
    OpenInvoice,
}

impl Operation for WebAppOperation {
    fn methods(self) -> &'static [&'static str] {
        match self {
            WebAppOperation::Ready => &[WEB_APP_READY],
            WebAppOperation::Close => &[WEB_APP_CLOSE],
            WebAppOperation::SendData => &[WEB_APP_DATA_SEND],
            WebAppOperation::OpenLink => &[WEB_APP_OPEN_LINK],
            WebAppOperation::OpenTgLink => &[WEB_APP_OPEN_TG_LINK],
            WebAppOperation::OpenInvoice => &[WEB_APP_OPEN_INVOICE],
        }
    }
}

pub struct WebApp {
    bridge: BridgeScoped,
    platform: Platform,
}

impl WebApp {
    pub fn new(bridge: BridgeScoped, platform: Platform) -> Self {
        Self { bridge, platform }
    }

    pub fn version(&self) -> Version {
        self.bridge.version()
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Tell the host the page is ready to be displayed.
    #[track_caller]
    pub fn ready(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppReady)
    }

    #[track_caller]
    pub fn close(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppClose)
    }

    /// Send `data` to the bot and close the app. Accepts 1-4096 bytes.
    #[track_caller]
    pub fn send_data(&self, data: &str) -> Result<(), SdkError> {
        if data.is_empty() || data.len() > MAX_DATA_BYTES {
            return Err(SdkError::Validation {
                message: format!(
                    "Data must be 1-{MAX_DATA_BYTES} bytes, got {}",
                    data.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.bridge
            .send(&OutgoingCommand::WebAppDataSend(DataSendParams {
                data: data.to_string(),
            }))
    }

    /// Open `url` in the external browser.
    ///
    /// `try_instant_view` is only put on the wire when true; it needs 6.4.
    #[track_caller]
    pub fn open_link(&self, url: &str, try_instant_view: bool) -> Result<(), SdkError> {
        let url = parse_url(url)?;

        self.bridge
            .send(&OutgoingCommand::WebAppOpenLink(OpenLinkParams {
                url: url.to_string(),
                try_instant_view: try_instant_view.then_some(true),
            }))
    }

    pub fn supports_instant_view(&self) -> bool {
        capability::is_param_supported(WEB_APP_OPEN_LINK, TRY_INSTANT_VIEW_PARAM, self.version())
    }

    /// Open a `https://t.me/...` link inside the host.
    #[track_caller]
    pub fn open_tg_link(&self, url: &str) -> Result<(), SdkError> {
        let url = parse_url(url)?;
        if url.host_str() != Some(TG_LINK_HOST) {
            return Err(SdkError::Validation {
                message: format!("Link host must be {TG_LINK_HOST}: {url}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let path_full = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        debug!("Opening tg link {}", path_full);

        self.bridge
            .send(&OutgoingCommand::WebAppOpenTgLink(OpenTgLinkParams {
                path_full,
            }))
    }

    /// Open an invoice by slug or by `https://t.me/invoice/<slug>` URL.
    #[track_caller]
    pub fn open_invoice(&self, slug_or_url: &str) -> Result<(), SdkError> {
        let slug = invoice_slug(slug_or_url)?;

        self.bridge
            .send(&OutgoingCommand::WebAppOpenInvoice(OpenInvoiceParams {
                slug,
            }))
    }

    pub fn on_settings_button_pressed<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        ListenerHandle::Host(
            self.bridge
                .subscribe(SETTINGS_BUTTON_PRESSED, move |_| listener()),
        )
    }

    /// Called with the slug and status of every closed invoice.
    pub fn on_invoice_closed<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(&InvoiceClosed) + Send + Sync + 'static,
    {
        ListenerHandle::Host(self.bridge.subscribe(INVOICE_CLOSED, move |data| {
            match IncomingEvent::decode(INVOICE_CLOSED, data) {
                Ok(Some(IncomingEvent::InvoiceClosed(closed))) => listener(&closed),
                Ok(_) => {}
                Err(e) => warn!("Ignoring malformed invoice_closed: {}", e),
            }
        }))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(_) => false,
        }
    }

    pub fn supports(&self, operation: WebAppOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

#[track_caller]
fn parse_url(value: &str) -> Result<Url, SdkError> {
    let location = ErrorLocation::from(Location::caller());
    Url::parse(value.trim()).map_err(|e| SdkError::Validation {
        message: format!("Invalid URL {value:?}: {e}"),
        location,
    })
}

/// Extract the slug from `t.me/invoice/<slug>` or `t.me/$<slug>`, or accept a bare slug.
#[track_caller]
fn invoice_slug(value: &str) -> Result<String, SdkError> {
    let value = value.trim();

    let slug = match Url::parse(value) {
        Ok(url) if url.host_str() == Some(TG_LINK_HOST) => {
            let path = url.path();
            path.strip_prefix("/invoice/")
                .or_else(|| path.strip_prefix("/$"))
                .unwrap_or_default()
                .to_string()
        }
        Ok(url) => {
            return Err(SdkError::Validation {
                message: format!("Invoice link host must be {TG_LINK_HOST}: {url}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Err(_) => value.to_string(),
    };

    if slug.is_empty() || slug.contains('/') {
        return Err(SdkError::Validation {
            message: format!("Invalid invoice slug: {slug}"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(slug)
}
