//! devserve library
//!
//! Build, serve and open a local browser game project in one step.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial library structure

pub mod browser;
pub mod builder;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod server;

pub use config::{BrowserOpener, BuildCommand, DevServerConfig};
pub use error::{DevServeError, Result};
pub use server::ServerHandle;
