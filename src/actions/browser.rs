use std::process::Command;

pub fn open_url(url: &str) -> anyhow::Result<()> {
    open::that(url).map_err(|e| e.into())
}

#[cfg(target_os = "macos")]
pub(crate) fn open_command(url: &str) -> Command {
    let mut c = Command::new("open");
    c.arg(url);
    c
}

#[cfg(target_os = "windows")]
pub(crate) fn open_command(url: &str) -> Command {
    // The empty argument is the window title consumed by `start`.
    let mut c = Command::new("cmd");
    c.args(["/C", "start", ""]).arg(url);
    c
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub(crate) fn open_command(url: &str) -> Command {
    let mut c = Command::new("xdg-open");
    c.arg(url);
    c
}

pub fn open_url_with_command(url: &str) -> anyhow::Result<()> {
    open_command(url).spawn().map(|_| ()).map_err(|e| e.into())
}
