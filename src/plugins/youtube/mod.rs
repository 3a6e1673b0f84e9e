//! YouTube search plugin.
//!
//! A query runs two requests against the Data API: a `search` for the text
//! and one batched `videos` lookup for the statistics and duration of every
//! hit. Every failure is turned into a single fallback result.

use std::sync::Arc;

use crate::actions::{video_actions, DisplayResult, ResultAction, ResultContext, APP_ICON};
use crate::desktop::{Desktop, NativeDesktop};
use crate::plugin::{Plugin, PluginHost};
use crate::settings::YoutubeSettings;

pub mod api;
pub mod error;
pub mod format;
pub mod models;

use api::YoutubeClient;
use error::YoutubeError;
use models::MergedItem;

pub const PLUGIN_NAME: &str = "youtube";

pub struct YoutubePlugin {
    settings: YoutubeSettings,
    client: Option<YoutubeClient>,
    host: Option<Arc<dyn PluginHost>>,
    desktop: Box<dyn Desktop>,
}

impl Default for YoutubePlugin {
    fn default() -> Self {
        Self::new(Box::new(NativeDesktop))
    }
}

impl YoutubePlugin {
    pub fn new(desktop: Box<dyn Desktop>) -> Self {
        Self {
            settings: YoutubeSettings::default(),
            client: None,
            host: None,
            desktop,
        }
    }

    /// Build a plugin configured directly, without going through a host.
    pub fn with_settings(settings: YoutubeSettings, desktop: Box<dyn Desktop>) -> Self {
        let mut plugin = Self::new(desktop);
        plugin.configure(settings);
        plugin
    }

    pub fn settings(&self) -> &YoutubeSettings {
        &self.settings
    }

    fn configure(&mut self, settings: YoutubeSettings) {
        let settings = settings.normalized();
        self.client = match YoutubeClient::new(&settings) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::error!("failed to build youtube http client: {e}");
                None
            }
        };
        self.settings = settings;
    }

    fn run_query(&self, query: &str) -> Result<Vec<DisplayResult>, YoutubeError> {
        if !self.settings.has_api_key() {
            return Err(YoutubeError::MissingApiKey);
        }
        let client = self.client.as_ref().ok_or_else(|| {
            YoutubeError::Decode("YouTube client is not initialised".into())
        })?;

        let page = client.search(query)?;
        if page.total_items == 0 {
            return Ok(vec![no_videos_found(query)]);
        }

        let ids: Vec<String> = page.stubs.iter().map(|s| s.id.clone()).collect();
        let details = client.video_details(&ids)?;

        let results: Vec<DisplayResult> = models::merge(page.stubs, &details)
            .iter()
            .map(build_result)
            .collect();
        if results.is_empty() {
            return Ok(vec![no_videos_found(query)]);
        }
        Ok(results)
    }
}

fn no_videos_found(query: &str) -> DisplayResult {
    DisplayResult::fallback("No videos found", format!("No results for: {query}"))
}

fn build_result(item: &MergedItem) -> DisplayResult {
    let url = item.url();
    let context = ResultContext {
        url: url.clone(),
        video_id: item.id.clone(),
        title: item.title.clone(),
        channel: item.channel_title.clone(),
        description: item.description.clone(),
    };
    DisplayResult {
        title: item.title.clone(),
        subtitle: item.subtitle(),
        icon: APP_ICON.into(),
        context: serde_json::to_string(&context).ok(),
        actions: video_actions(&url, &item.id),
    }
}

impl Plugin for YoutubePlugin {
    fn init(&mut self, host: Arc<dyn PluginHost>) {
        let settings = YoutubeSettings::from_host(host.as_ref());
        if !settings.has_api_key() {
            tracing::info!("youtube api key not configured");
        }
        self.configure(settings);
        self.host = Some(host);
    }

    fn search(&self, query: &str) -> Vec<DisplayResult> {
        let q = query.trim();
        if q.is_empty() {
            return Vec::new();
        }
        match self.run_query(q) {
            Ok(results) => results,
            Err(e) => {
                if !matches!(e, YoutubeError::MissingApiKey) {
                    tracing::warn!("youtube search for '{q}' failed: {e}");
                }
                vec![e.fallback()]
            }
        }
    }

    fn run_action(&self, action: &ResultAction) {
        match &self.host {
            Some(host) => crate::launcher::launch_action(action, self.desktop.as_ref(), host.as_ref()),
            None => tracing::warn!("youtube action ignored: plugin not initialised"),
        }
    }

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn description(&self) -> &str {
        "Search YouTube videos with the Data API (prefix: `yt`)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search"]
    }

    fn query_prefixes(&self) -> &[&str] {
        &["yt"]
    }

    fn default_settings(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.settings).ok()
    }

    fn apply_settings(&mut self, value: &serde_json::Value) {
        match serde_json::from_value::<YoutubeSettings>(value.clone()) {
            Ok(s) => self.configure(s),
            Err(e) => tracing::error!("failed to parse youtube settings: {e}"),
        }
    }
}
