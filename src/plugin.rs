use std::sync::Arc;

use crate::actions::{DisplayResult, ResultAction};

/// Services the launcher offers to its plugins.
pub trait PluginHost: Send + Sync {
    /// Look up a string setting stored for the plugin.
    fn get_setting(&self, key: &str) -> Option<String>;
    /// Show a one-shot notification to the user.
    fn notify(&self, message: &str);
}

pub trait Plugin: Send + Sync {
    /// Called once before the first search.
    fn init(&mut self, _host: Arc<dyn PluginHost>) {}
    /// Return results for the (already prefix-stripped) query string
    fn search(&self, query: &str) -> Vec<DisplayResult>;
    /// Run an action previously attached to one of this plugin's results.
    fn run_action(&self, _action: &ResultAction) {}
    /// Name of the plugin
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn capabilities(&self) -> &[&str];
    /// Keywords that route a query to this plugin. An empty list means the
    /// plugin sees every query.
    fn query_prefixes(&self) -> &[&str] {
        &[]
    }
    fn default_settings(&self) -> Option<serde_json::Value> {
        None
    }
    fn apply_settings(&mut self, _value: &serde_json::Value) {}
}

/// A manager that holds plugins
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn init_all(&mut self, host: Arc<dyn PluginHost>) {
        for p in &mut self.plugins {
            tracing::debug!(plugin = p.name(), "initialising plugin");
            p.init(Arc::clone(&host));
        }
    }

    /// Apply per-plugin JSON settings keyed by plugin name.
    pub fn apply_settings(&mut self, settings: &std::collections::HashMap<String, serde_json::Value>) {
        for p in &mut self.plugins {
            if let Some(value) = settings.get(p.name()) {
                p.apply_settings(value);
            }
        }
    }

    pub fn plugin(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    /// Route a raw launcher query. Results are tagged with the name of the
    /// plugin that produced them so actions can be dispatched back to it.
    pub fn search(&self, query: &str) -> Vec<(String, DisplayResult)> {
        let mut out = Vec::new();
        let trimmed = query.trim();
        for p in &self.plugins {
            let prefixes = p.query_prefixes();
            let routed = if prefixes.is_empty() {
                Some(trimmed)
            } else {
                prefixes
                    .iter()
                    .find_map(|k| crate::common::strip_keyword_ci(trimmed, k))
            };
            if let Some(q) = routed {
                let name = p.name().to_string();
                out.extend(p.search(q).into_iter().map(|r| (name.clone(), r)));
            }
        }
        out
    }

    pub fn run_action(&self, plugin: &str, action: &ResultAction) -> bool {
        match self.plugin(plugin) {
            Some(p) => {
                p.run_action(action);
                true
            }
            None => {
                tracing::warn!("no plugin named {plugin} to run action");
                false
            }
        }
    }
}
