//! Top-level sequencing: build, serve, open browser, wait for Ctrl+C.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::browser;
use crate::builder;
use crate::config::{timing, BrowserOpener, DevServerConfig};
use crate::error::{DevServeError, Result};
use crate::server::{self, ServerHandle};

/// Build, then start the server and open the browser.
///
/// A failed build is reported on the console and returned; in that case
/// nothing is bound and no browser is opened. A browser failure is only
/// reported, the server keeps running.
pub fn launch(config: &DevServerConfig) -> Result<ServerHandle> {
    if !config.root.is_dir() {
        return Err(DevServeError::RootNotFound(config.root.clone()));
    }

    if let Some(build) = &config.build {
        if let Err(e) = builder::run_build(build, &config.root) {
            builder::report_failure(build, &e);
            return Err(e);
        }
    } else {
        tracing::info!("build step skipped");
    }

    let server = server::start_server(&config.host, config.port, &config.root)?;
    let url = server.url();
    println!("\n--- Server is running at {} ---", url);
    println!("--- Press Ctrl+C to stop the server. ---");

    if let Some(opener) = &config.browser {
        std::thread::sleep(config.browser_delay);
        open_browser_or_hint(&url, opener);
    }

    Ok(server)
}

/// Open the browser, falling back to a manual instruction.
///
/// Returns whether the opener reported success.
pub fn open_browser_or_hint(url: &str, opener: &BrowserOpener) -> bool {
    println!("--- Opening web browser... ---");
    match browser::open_browser(url, opener) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("browser launch failed: {}", e);
            println!("{}", e);
            println!("Please manually navigate to {}", url);
            false
        }
    }
}

/// Keep the main thread alive until Ctrl+C, then stop the server.
pub fn serve_until_interrupted(server: ServerHandle) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    wait_for_stop(&stop, Duration::from_millis(timing::IDLE_TICK_MS));

    server.shutdown();
    println!("\n--- Server stopped. Goodbye! ---");
    Ok(())
}

/// Sleep in `tick` steps until `stop` is set.
pub fn wait_for_stop(stop: &AtomicBool, tick: Duration) {
    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(tick);
    }
}
