use serde::{Deserialize, Serialize};

use crate::actions::{browser, clipboard};

/// OS services used by result actions.
pub trait Desktop: Send + Sync {
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()>;
}

/// Uses the `open` and `arboard` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDesktop;

impl Desktop for NativeDesktop {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        browser::open_url(url)
    }

    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        clipboard::set_text(text)
    }
}

/// Shells out to the platform utilities (`open`/`pbcopy`, `xdg-open`/`xclip`
/// or `xsel`, `start`/`clip`).
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandDesktop;

impl Desktop for CommandDesktop {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        browser::open_url_with_command(url)
    }

    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        clipboard::set_text_with_command(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DesktopKind {
    #[default]
    Native,
    Command,
}

impl std::fmt::Display for DesktopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesktopKind::Native => write!(f, "native"),
            DesktopKind::Command => write!(f, "command"),
        }
    }
}

pub fn default_desktop(kind: DesktopKind) -> Box<dyn Desktop> {
    match kind {
        DesktopKind::Native => Box::new(NativeDesktop),
        DesktopKind::Command => Box::new(CommandDesktop),
    }
}
