//! Machine-readable output for `--json`.
//!
//! CHANGELOG:
//! - 10/18/2026 - Launch summary and JSON errors

use serde::Serialize;
use serde_json::json;

use crate::config::DevServerConfig;
use crate::server::ServerHandle;

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct OutputControls {
    pub json: bool,
}

impl OutputControls {
    /// Serialize `data` as a single JSON line.
    pub fn emit<T: Serialize>(&self, data: &T) -> String {
        serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string())
    }

    /// Print data to stdout when JSON output is on.
    pub fn print<T: Serialize>(&self, data: &T) {
        if self.json {
            println!("{}", self.emit(data));
        }
    }
}

/// What got started, printed once the server is up.
#[derive(Debug, Serialize)]
pub struct LaunchSummary {
    pub url: String,
    pub host: String,
    pub port: u16,
    pub root: String,
    pub built: bool,
    pub browser: bool,
}

impl LaunchSummary {
    pub fn new(config: &DevServerConfig, server: &ServerHandle) -> Self {
        let root = config
            .root
            .canonicalize()
            .unwrap_or_else(|_| config.root.clone());
        Self {
            url: server.url(),
            host: config.host.clone(),
            port: server.local_addr().port(),
            root: root.display().to_string(),
            built: config.build.is_some(),
            browser: config.browser.is_some(),
        }
    }
}

/// Format error as JSON.
pub fn format_error(error: &str) -> String {
    serde_json::to_string(&json!({
        "error": error,
        "success": false
    }))
    .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error))
}
