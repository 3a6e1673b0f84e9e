use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};

pub fn set_text(text: &str) -> anyhow::Result<()> {
    let mut cb = Clipboard::new()?;
    cb.set_text(text.to_string())?;
    Ok(())
}

/// Clipboard utilities tried in order for the current platform.
#[cfg(target_os = "macos")]
pub(crate) fn copy_commands() -> Vec<Command> {
    vec![Command::new("pbcopy")]
}

#[cfg(target_os = "windows")]
pub(crate) fn copy_commands() -> Vec<Command> {
    vec![Command::new("clip")]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub(crate) fn copy_commands() -> Vec<Command> {
    let mut xclip = Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    let mut xsel = Command::new("xsel");
    xsel.args(["--clipboard", "--input"]);
    vec![xclip, xsel]
}

/// Feed `text` to a clipboard utility on stdin and wait for it to finish.
pub(crate) fn pipe_text(mut command: Command, text: &str) -> anyhow::Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if !status.success() {
        anyhow::bail!("{program} exited with {status}");
    }
    Ok(())
}

/// Copy using the platform utilities, falling through to the next one when a
/// utility is not installed.
pub fn set_text_with_command(text: &str) -> anyhow::Result<()> {
    let mut last_err = None;
    for command in copy_commands() {
        match pipe_text(command, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                let missing = e
                    .downcast_ref::<std::io::Error>()
                    .map(|io| io.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);
                if !missing {
                    return Err(e);
                }
                tracing::debug!("clipboard utility not found: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no clipboard utility available")))
}
