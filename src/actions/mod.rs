use serde::{Deserialize, Serialize};

pub mod browser;
pub mod clipboard;

/// Icon shown next to every result, relative to the plugin directory.
pub const APP_ICON: &str = "image/app.png";

/// Follow-up action attached to a result. The payload is bound when the
/// result is built so the host only has to hand the variant back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultAction {
    OpenInBrowser { url: String },
    CopyUrl { url: String },
    CopyVideoId { id: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub name: String,
    pub action: ResultAction,
    #[serde(default)]
    pub is_default: bool,
}

/// Opaque context stored alongside a result.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ResultContext {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

impl DisplayResult {
    /// A result without actions, used to report errors and empty states.
    pub fn fallback(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: APP_ICON.into(),
            context: None,
            actions: Vec::new(),
        }
    }

    pub fn default_action(&self) -> Option<&ResultAction> {
        self.actions
            .iter()
            .find(|a| a.is_default)
            .map(|a| &a.action)
    }

    pub fn parsed_context(&self) -> Option<ResultContext> {
        let raw = self.context.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                tracing::warn!("invalid result context: {e}");
                None
            }
        }
    }
}

/// The three actions offered for a video, default first.
pub fn video_actions(url: &str, video_id: &str) -> Vec<ActionEntry> {
    vec![
        ActionEntry {
            name: "Open in browser".into(),
            action: ResultAction::OpenInBrowser { url: url.into() },
            is_default: true,
        },
        ActionEntry {
            name: "Copy URL".into(),
            action: ResultAction::CopyUrl { url: url.into() },
            is_default: false,
        },
        ActionEntry {
            name: "Copy video ID".into(),
            action: ResultAction::CopyVideoId {
                id: video_id.into(),
            },
            is_default: false,
        },
    ]
}
