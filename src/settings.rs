use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::desktop::DesktopKind;
use crate::plugin::PluginHost;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Upper bound accepted by the search endpoint for a single page.
pub const MAX_RESULTS_LIMIT: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Host-side settings file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional path of a log file written in addition to stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub desktop: DesktopKind,
    #[serde(default)]
    pub plugin_settings: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            desktop: DesktopKind::Native,
            plugin_settings: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Look up a string value stored for `plugin`.
    pub fn plugin_value(&self, plugin: &str, key: &str) -> Option<String> {
        match self.plugin_settings.get(plugin)?.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

/// Configuration of the YouTube plugin, fixed once the plugin is initialised.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct YoutubeSettings {
    #[serde(default)]
    pub youtube_api_key: String,
    /// Page size of the search call.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl YoutubeSettings {
    /// Read the plugin settings through the host accessor.
    ///
    /// A missing API key yields an empty string. Unparseable optional values
    /// keep their defaults.
    pub fn from_host(host: &dyn PluginHost) -> Self {
        let mut cfg = Self {
            youtube_api_key: host
                .get_setting("youtube_api_key")
                .map(|k| k.trim().to_string())
                .unwrap_or_default(),
            ..Self::default()
        };
        if let Some(raw) = host.get_setting("max_results") {
            match raw.trim().parse::<u32>() {
                Ok(n) => cfg.max_results = n,
                Err(_) => tracing::warn!("ignoring invalid max_results setting '{raw}'"),
            }
        }
        if let Some(raw) = host.get_setting("request_timeout_secs") {
            match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => cfg.request_timeout_secs = n,
                _ => tracing::warn!("ignoring invalid request_timeout_secs setting '{raw}'"),
            }
        }
        if let Some(url) = host.get_setting("api_base_url") {
            if !url.trim().is_empty() {
                cfg.api_base_url = url.trim().to_string();
            }
        }
        cfg.normalized()
    }

    /// Clamp values into the ranges the API accepts.
    pub fn normalized(mut self) -> Self {
        self.max_results = self.max_results.clamp(1, MAX_RESULTS_LIMIT);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        while self.api_base_url.ends_with('/') {
            self.api_base_url.pop();
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.youtube_api_key.is_empty()
    }
}
