//! devserve - build the mutator manifest, serve the game, open a browser.
//!
//! With no arguments: runs `npm run build-mutators`, serves the current
//! directory at http://localhost:8000/ and opens it in the default browser.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial CLI

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use devserve::config::{self, BrowserOpener, BuildCommand, DevServerConfig};
use devserve::orchestrator;
use devserve::output::{self, LaunchSummary, OutputControls};
use devserve::DevServeError;

/// Build, serve and open the game in one step.
#[derive(Parser, Debug)]
#[command(name = "devserve")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host to bind the static file server to
    #[arg(long, default_value = config::server::HOST)]
    host: String,

    /// Port to bind the static file server to
    #[arg(long, default_value_t = config::server::PORT)]
    port: u16,

    /// Directory to build in and serve (~ is expanded)
    #[arg(long, default_value = ".")]
    root: String,

    /// Don't open a browser
    #[arg(long)]
    no_browser: bool,

    /// Skip the build step
    #[arg(long)]
    skip_build: bool,

    /// Print a JSON launch summary once the server is up
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_config(&self) -> DevServerConfig {
        DevServerConfig {
            host: self.host.clone(),
            port: self.port,
            root: PathBuf::from(shellexpand::tilde(&self.root).to_string()),
            build: (!self.skip_build).then(BuildCommand::default),
            browser: (!self.no_browser).then_some(BrowserOpener::System),
            ..DevServerConfig::default()
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let output_controls = OutputControls { json: cli.json };

    match run(&cli, &output_controls) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            // Build failures already printed their own banner
            let reported = e
                .downcast_ref::<DevServeError>()
                .is_some_and(DevServeError::is_build_failure);
            if output_controls.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else if !reported {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, output_controls: &OutputControls) -> Result<()> {
    let config = cli.to_config();
    tracing::debug!(?config, "launch configuration");

    let server = orchestrator::launch(&config)?;
    output_controls.print(&LaunchSummary::new(&config, &server));

    orchestrator::serve_until_interrupted(server).context("Failed to wait for Ctrl+C")
}
