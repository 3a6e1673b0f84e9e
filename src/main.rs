use std::path::PathBuf;
use std::sync::Arc;

use youtube_launcher::desktop::default_desktop;
use youtube_launcher::plugin::{PluginHost, PluginManager};
use youtube_launcher::plugins::youtube::{YoutubePlugin, PLUGIN_NAME};
use youtube_launcher::settings::Settings;

/// Host backed by the settings file; notifications go to stdout.
struct ConsoleHost {
    settings: Settings,
}

impl PluginHost for ConsoleHost {
    fn get_setting(&self, key: &str) -> Option<String> {
        if key == "youtube_api_key" {
            if let Ok(k) = std::env::var("YOUTUBE_API_KEY") {
                return Some(k);
            }
        }
        self.settings.plugin_value(PLUGIN_NAME, key)
    }

    fn notify(&self, message: &str) {
        tracing::info!("notify: {message}");
        println!("{message}");
    }
}

enum Selected {
    Open(usize),
    CopyUrl(usize),
    CopyId(usize),
}

struct Args {
    settings_path: String,
    selected: Option<Selected>,
    query: String,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut settings_path = "settings.json".to_string();
    let mut selected = None;
    let mut words = Vec::new();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--settings" => {
                settings_path = it
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--settings needs a path"))?;
            }
            "--open" | "--copy-url" | "--copy-id" => {
                let n: usize = it
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{arg} needs a result number"))?
                    .parse()?;
                if n == 0 {
                    anyhow::bail!("result numbers start at 1");
                }
                selected = Some(match arg.as_str() {
                    "--open" => Selected::Open(n),
                    "--copy-url" => Selected::CopyUrl(n),
                    _ => Selected::CopyId(n),
                });
            }
            _ => words.push(arg),
        }
    }
    Ok(Args {
        settings_path,
        selected,
        query: words.join(" "),
    })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let settings = Settings::load(&args.settings_path)?;
    youtube_launcher::logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let mut plugins = PluginManager::new();
    plugins.register(Box::new(YoutubePlugin::new(default_desktop(settings.desktop))));
    let host: Arc<dyn PluginHost> = Arc::new(ConsoleHost { settings });
    plugins.init_all(host);

    let query = format!("yt {}", args.query);
    let results = plugins.search(&query);
    for (i, (_, r)) in results.iter().enumerate() {
        println!("{:>2}. {}", i + 1, r.title);
        if !r.subtitle.is_empty() {
            println!("    {}", r.subtitle);
        }
    }

    if let Some(sel) = args.selected {
        let (n, wanted) = match sel {
            Selected::Open(n) => (n, "Open in browser"),
            Selected::CopyUrl(n) => (n, "Copy URL"),
            Selected::CopyId(n) => (n, "Copy video ID"),
        };
        let (plugin, result) = results
            .get(n - 1)
            .ok_or_else(|| anyhow::anyhow!("no result number {n}"))?;
        let entry = result
            .actions
            .iter()
            .find(|a| a.name == wanted)
            .ok_or_else(|| anyhow::anyhow!("result {n} has no '{wanted}' action"))?;
        plugins.run_action(plugin, &entry.action);
    }
    Ok(())
}
