//! Launch configuration: fixed defaults plus the struct that carries them.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use std::path::PathBuf;
use std::time::Duration;

/// HTTP server defaults
pub mod server {
    /// Host the static file server binds to
    pub const HOST: &str = "localhost";

    /// Port the static file server binds to
    pub const PORT: u16 = 8000;

    /// Listen backlog for the server socket
    pub const BACKLOG: u32 = 1024;
}

/// Build step defaults
pub mod build {
    /// Package manager used to run the build script
    pub const PROGRAM: &str = "npm";

    /// Name of the package script that regenerates the mutator manifest
    pub const SCRIPT_NAME: &str = "build-mutators";
}

/// Timing between steps
pub mod timing {
    /// Pause between server start and browser launch
    pub const BROWSER_DELAY_MS: u64 = 500;

    /// Tick of the idle loop that waits for Ctrl+C
    pub const IDLE_TICK_MS: u64 = 1000;

    /// How long to watch the browser opener for an early failure
    pub const OPENER_GRACE_MS: u64 = 2000;
}

/// External command run before serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BuildCommand {
    /// `npm run <script>`
    pub fn npm_script(script: &str) -> Self {
        Self {
            program: build::PROGRAM.to_string(),
            args: vec!["run".to_string(), script.to_string()],
        }
    }

    /// Arbitrary program with arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Human-readable command line, for banners and logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::npm_script(build::SCRIPT_NAME)
    }
}

/// How the browser gets opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowserOpener {
    /// Platform default (`open`, `cmd /C start`, `xdg-open`)
    #[default]
    System,
    /// Custom program; the URL is appended as the last argument
    Command { program: String, args: Vec<String> },
}

/// Everything one launch needs.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the build runs in and the server serves
    pub root: PathBuf,
    /// `None` skips the build step (treated as a successful build)
    pub build: Option<BuildCommand>,
    /// `None` skips opening a browser
    pub browser: Option<BrowserOpener>,
    pub browser_delay: Duration,
}

impl DevServerConfig {
    /// URL the browser is pointed at.
    pub fn url(&self) -> String {
        format_url(&self.host, self.port)
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: server::HOST.to_string(),
            port: server::PORT,
            root: PathBuf::from("."),
            build: Some(BuildCommand::default()),
            browser: Some(BrowserOpener::System),
            browser_delay: Duration::from_millis(timing::BROWSER_DELAY_MS),
        }
    }
}

pub(crate) fn format_url(host: &str, port: u16) -> String {
    if host.contains(':') {
        // Bare IPv6 literal
        format!("http://[{}]:{}/", host, port)
    } else {
        format!("http://{}:{}/", host, port)
    }
}
