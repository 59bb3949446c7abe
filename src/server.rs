//! Static file server running on a background thread.
//!
//! Binds with SO_REUSEADDR so quick restarts don't hit "address already in
//! use", then serves the root directory until the process exits or the
//! handle asks it to stop.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::thread::JoinHandle;

use axum::Router;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::oneshot;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{self, format_url};
use crate::error::{DevServeError, Result};

/// Handle to a running server thread.
///
/// Dropping the handle leaves the server running; it only stops on
/// `shutdown()` or process exit.
pub struct ServerHandle {
    host: String,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Address the listener actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL using the configured host and the bound port.
    pub fn url(&self) -> String {
        format_url(&self.host, self.local_addr.port())
    }

    /// Whether the accept loop is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop accepting, finish in-flight requests and join the thread.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("server thread panicked");
            }
        }
    }
}

/// Bind `host:port` and serve `root` on a background thread.
///
/// Returns once the socket is bound, so the server is reachable as soon as
/// this returns `Ok`.
pub fn start_server(host: &str, port: u16, root: &Path) -> Result<ServerHandle> {
    let addr = resolve(host, port)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DevServeError::Runtime)?;

    // TcpSocket::listen registers with the reactor, so it needs the runtime context
    let listener = {
        let _guard = runtime.enter();
        bind_reusable(addr).map_err(|source| DevServeError::Bind {
            addr: addr.to_string(),
            source,
        })?
    };
    let local_addr = listener.local_addr().map_err(|source| DevServeError::Bind {
        addr: addr.to_string(),
        source,
    })?;

    let app = router(root);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let thread = std::thread::Builder::new()
        .name("devserve-http".to_string())
        .spawn(move || {
            let served = runtime.block_on(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal(shutdown_rx))
                    .await
            });
            if let Err(e) = served {
                tracing::error!("server error: {}", e);
            }
        })
        .map_err(DevServeError::Thread)?;

    tracing::info!(%local_addr, root = %root.display(), "static file server listening");

    Ok(ServerHandle {
        host: host.to_string(),
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        thread: Some(thread),
    })
}

/// Plain static file service over `root`; directories serve their index.html.
fn router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root.to_path_buf()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
}

async fn shutdown_signal(rx: oneshot::Receiver<()>) {
    // A dropped handle means fire-and-forget: keep serving
    if rx.await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn bind_reusable(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(config::server::BACKLOG)
}

/// Resolve `host:port`, preferring IPv4 so `localhost` lands on 127.0.0.1.
fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    let target = format!("{}:{}", host, port);
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|_| DevServeError::Resolve(target.clone()))?
        .collect();

    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or(DevServeError::Resolve(target))
}
