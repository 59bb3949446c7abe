//! Best-effort browser launch.
//!
//! Spawns the platform opener and watches it briefly: an opener that exits
//! non-zero right away is a failure, one that is still running is assumed to
//! have handed the URL to a browser and is reaped in the background.

use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::config::{timing, BrowserOpener};
use crate::error::{DevServeError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Open `url` with the given opener.
pub fn open_browser(url: &str, opener: &BrowserOpener) -> Result<()> {
    let mut cmd = opener_command(opener, url);
    let program = cmd.get_program().to_string_lossy().to_string();
    tracing::debug!(%url, opener = %program, "opening browser");

    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => DevServeError::Browser(format!("{} not found", program)),
            _ => DevServeError::Browser(e.to_string()),
        })?;

    watch(child, Duration::from_millis(timing::OPENER_GRACE_MS))
}

fn watch(mut child: Child, grace: Duration) -> Result<()> {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(()),
            Ok(Some(status)) => {
                return Err(DevServeError::Browser(format!("opener exited with {}", status)))
            }
            Ok(None) if Instant::now() >= deadline => break,
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(DevServeError::Browser(e.to_string())),
        }
    }

    // Some openers block until the browser closes
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

fn opener_command(opener: &BrowserOpener, url: &str) -> Command {
    match opener {
        BrowserOpener::System => system_command(url),
        BrowserOpener::Command { program, args } => {
            let mut cmd = Command::new(program);
            cmd.args(args).arg(url);
            cmd
        }
    }
}

#[cfg(target_os = "macos")]
fn system_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(windows)]
fn system_command(url: &str) -> Command {
    // Empty title so start doesn't treat the URL as the window title
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn system_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
