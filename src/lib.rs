pub mod actions;
pub mod common;
pub mod desktop;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod settings;
