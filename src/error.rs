//! Error types for devserve.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a launch.
#[derive(Error, Debug)]
pub enum DevServeError {
    #[error("Build script failed with exit code {0}")]
    BuildFailed(i32),

    #[error("Build script was terminated before it exited")]
    BuildTerminated,

    #[error("Command '{0}' not found")]
    CommandNotFound(String),

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Serve root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Could not resolve address {0}")]
    Resolve(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start server runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("Failed to spawn server thread: {0}")]
    Thread(#[source] io::Error),

    #[error("Could not automatically open browser: {0}")]
    Browser(String),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Interrupt(#[from] ctrlc::Error),
}

impl DevServeError {
    /// Failures of the build step itself. These are reported with their
    /// own banner and just end the run.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            DevServeError::BuildFailed(_)
                | DevServeError::BuildTerminated
                | DevServeError::CommandNotFound(_)
        )
    }
}

/// Result type alias for devserve
pub type Result<T> = std::result::Result<T, DevServeError>;
