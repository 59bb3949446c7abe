//! Build step: runs the package script before anything is served.
//!
//! The child inherits stdio, so npm output goes straight to the console.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use crate::config::BuildCommand;
use crate::error::{DevServeError, Result};

/// Run the build command in `root` and wait for it.
///
/// # Returns
/// * `Ok(())` if the command exited with status 0
/// * `Err(BuildFailed)` on a non-zero exit
/// * `Err(BuildTerminated)` if the child died without an exit code
/// * `Err(CommandNotFound)` if the program is not on PATH
pub fn run_build(build: &BuildCommand, root: &Path) -> Result<()> {
    println!("--- Running build script: {} ---", build.display());
    tracing::debug!(command = %build.display(), root = %root.display(), "spawning build");

    let status = command_for(build)
        .current_dir(root)
        .status()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => DevServeError::CommandNotFound(build.program.clone()),
            _ => DevServeError::Spawn {
                program: build.program.clone(),
                source: e,
            },
        })?;

    if status.success() {
        println!("--- Build successful! ---");
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(DevServeError::BuildFailed(code)),
        None => Err(DevServeError::BuildTerminated),
    }
}

/// Print the failure banner and a hint for a failed build.
pub fn report_failure(build: &BuildCommand, err: &DevServeError) {
    eprintln!("\n--- ERROR: {} ---", err);
    match err {
        DevServeError::CommandNotFound(_) => eprintln!(
            "Please make sure '{}' is installed and in your system's PATH.",
            build.program
        ),
        DevServeError::BuildFailed(_) | DevServeError::BuildTerminated => {
            eprintln!("Please fix the build errors before trying again.")
        }
        _ => {}
    }
}

#[cfg(not(windows))]
fn command_for(build: &BuildCommand) -> Command {
    let mut cmd = Command::new(&build.program);
    cmd.args(&build.args);
    cmd
}

// npm ships as npm.cmd on Windows; let the shell resolve it
#[cfg(windows)]
fn command_for(build: &BuildCommand) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(&build.program).args(&build.args);
    cmd
}
