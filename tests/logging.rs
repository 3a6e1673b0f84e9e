use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

// The global subscriber can only be installed once per test binary, so the
// file layer and the level filter are checked together.
#[test]
#[serial]
fn file_layer_respects_info_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs").join("youtube.log");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    youtube_launcher::logging::init(false, Some(path.clone()));
    tracing::debug!("request parameters hidden");
    tracing::info!("youtube search finished");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("youtube search finished"));
    assert!(!contents.contains("request parameters hidden"));
    assert!(!contents.contains('\u{1b}'), "file output must not contain ANSI escapes");
}
