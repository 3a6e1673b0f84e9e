use crate::actions::ResultAction;
use crate::desktop::Desktop;
use crate::plugin::PluginHost;

/// Run a result action and report the outcome through a host notification.
///
/// Failures never propagate: an empty payload or an OS error becomes an
/// error notification.
pub fn launch_action(action: &ResultAction, desktop: &dyn Desktop, host: &dyn PluginHost) {
    let message = match action {
        ResultAction::OpenInBrowser { url } => {
            if url.is_empty() {
                "Error: No URL found".to_string()
            } else {
                match desktop.open_url(url) {
                    Ok(()) => format!("Opening: {url}"),
                    Err(e) => {
                        tracing::error!("failed to open {url}: {e}");
                        format!("Error opening URL: {e}")
                    }
                }
            }
        }
        ResultAction::CopyUrl { url } => {
            if url.is_empty() {
                "Error: No URL found".to_string()
            } else {
                match desktop.copy_to_clipboard(url) {
                    Ok(()) => "URL copied to clipboard".to_string(),
                    Err(e) => {
                        tracing::error!("failed to copy url: {e}");
                        format!("Error copying URL: {e}")
                    }
                }
            }
        }
        ResultAction::CopyVideoId { id } => {
            if id.is_empty() {
                "Error: No video ID found".to_string()
            } else {
                match desktop.copy_to_clipboard(id) {
                    Ok(()) => format!("Video ID copied to clipboard: {id}"),
                    Err(e) => {
                        tracing::error!("failed to copy video id: {e}");
                        format!("Error copying video ID: {e}")
                    }
                }
            }
        }
    };
    host.notify(&message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        messages: Mutex<Vec<String>>,
    }

    impl PluginHost for RecordingHost {
        fn get_setting(&self, _key: &str) -> Option<String> {
            None
        }

        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct FakeDesktop {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl Desktop for FakeDesktop {
        fn open_url(&self, url: &str) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("open:{url}"));
            if self.fail {
                anyhow::bail!("xdg-open not found");
            }
            Ok(())
        }

        fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("copy:{text}"));
            if self.fail {
                anyhow::bail!("no clipboard");
            }
            Ok(())
        }
    }

    #[test]
    fn open_reports_success() {
        let host = RecordingHost::default();
        let desktop = FakeDesktop::default();
        let url = "https://www.youtube.com/watch?v=abc".to_string();
        launch_action(&ResultAction::OpenInBrowser { url: url.clone() }, &desktop, &host);
        assert_eq!(*desktop.calls.lock().unwrap(), vec![format!("open:{url}")]);
        assert_eq!(*host.messages.lock().unwrap(), vec![format!("Opening: {url}")]);
    }

    #[test]
    fn empty_payload_skips_os_call() {
        let host = RecordingHost::default();
        let desktop = FakeDesktop::default();
        launch_action(&ResultAction::CopyUrl { url: String::new() }, &desktop, &host);
        launch_action(&ResultAction::CopyVideoId { id: String::new() }, &desktop, &host);
        assert!(desktop.calls.lock().unwrap().is_empty());
        assert_eq!(
            *host.messages.lock().unwrap(),
            vec!["Error: No URL found", "Error: No video ID found"]
        );
    }

    #[test]
    fn failures_become_notifications() {
        let host = RecordingHost::default();
        let desktop = FakeDesktop {
            fail: true,
            ..Default::default()
        };
        launch_action(&ResultAction::OpenInBrowser { url: "u".into() }, &desktop, &host);
        launch_action(&ResultAction::CopyVideoId { id: "abc".into() }, &desktop, &host);
        let messages = host.messages.lock().unwrap();
        assert_eq!(messages[0], "Error opening URL: xdg-open not found");
        assert_eq!(messages[1], "Error copying video ID: no clipboard");
    }

    #[test]
    fn copy_id_reports_the_id() {
        let host = RecordingHost::default();
        let desktop = FakeDesktop::default();
        launch_action(&ResultAction::CopyVideoId { id: "abc".into() }, &desktop, &host);
        assert_eq!(
            *host.messages.lock().unwrap(),
            vec!["Video ID copied to clipboard: abc"]
        );
    }
}
