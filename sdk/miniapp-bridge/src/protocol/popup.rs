use serde::{Deserialize, Serialize};

/// Payload of `web_app_open_popup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupParams {
    /// 0-64 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 1-256 characters.
    pub message: String,

    /// 1-3 buttons. The host shows a single `close` button when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<PopupButton>,
}

impl PopupParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_button(mut self, button: PopupButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// A popup button. `id` is echoed back in `popup_closed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupButton {
    /// 0-64 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub kind: PopupButtonKind,
}

impl PopupButton {
    pub fn new(id: impl Into<String>, kind: PopupButtonKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
        }
    }
}

/// Button style. Styles with localized host text carry no `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PopupButtonKind {
    Default { text: String },
    Destructive { text: String },
    Ok,
    Close,
    Cancel,
}

impl PopupButtonKind {
    pub fn text(&self) -> Option<&str> {
        match self {
            PopupButtonKind::Default { text } | PopupButtonKind::Destructive { text } => Some(text),
            PopupButtonKind::Ok | PopupButtonKind::Close | PopupButtonKind::Cancel => None,
        }
    }
}
