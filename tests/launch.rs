//! End-to-end launch behavior: build gating, reachability, browser failures
//! and quick restarts on the same port.

#![cfg(unix)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::time::Duration;

use devserve::orchestrator::launch;
use devserve::server::start_server;
use devserve::{BrowserOpener, BuildCommand, DevServeError, DevServerConfig};

fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    write!(
        stream,
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    )
    .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).unwrap();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let body = raw.split("\r\n\r\n").nth(1).unwrap_or("").to_string();
    (status, body)
}

fn sh(script: &str) -> BuildCommand {
    BuildCommand::new("sh", ["-c", script])
}

/// Opener that leaves a marker file behind instead of starting a browser.
fn marker_opener(marker: &Path) -> BrowserOpener {
    BrowserOpener::Command {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            format!("echo \"$0\" > '{}'", marker.display()),
        ],
    }
}

fn config(root: &Path, build: BuildCommand, browser: BrowserOpener) -> DevServerConfig {
    DevServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        root: root.to_path_buf(),
        build: Some(build),
        browser: Some(browser),
        browser_delay: Duration::from_millis(10),
    }
}

#[test]
fn failed_build_starts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("opened");

    // Reserve a port so we can check nothing else grabs it
    let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = probe.local_addr().unwrap().port();
    drop(probe);

    let cfg = DevServerConfig {
        port,
        ..config(dir.path(), sh("exit 2"), marker_opener(&marker))
    };

    let err = launch(&cfg).err().expect("build failure must abort the launch");
    assert!(matches!(err, DevServeError::BuildFailed(2)));
    assert!(!marker.exists(), "browser opened after a failed build");
    assert!(
        TcpStream::connect(("127.0.0.1", port)).is_err(),
        "server started after a failed build"
    );
}

#[test]
fn missing_build_command_starts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("opened");
    let build = BuildCommand::new("devserve-missing-npm", ["run", "build-mutators"]);

    let err = launch(&config(dir.path(), build, marker_opener(&marker)))
        .err()
        .expect("missing build command must abort the launch");
    assert!(matches!(err, DevServeError::CommandNotFound(ref p) if p == "devserve-missing-npm"));
    assert!(err.is_build_failure());
    assert!(!marker.exists());
}

#[test]
fn successful_build_serves_its_output() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("opened");

    let server = launch(&config(
        dir.path(),
        sh("echo '<title>Neon Asteroids</title>' > index.html"),
        marker_opener(&marker),
    ))
    .unwrap();

    let (status, body) = get(server.local_addr(), "/");
    assert_eq!(status, 200);
    assert!(body.contains("Neon Asteroids"));

    let (status, _) = get(server.local_addr(), "/nope.js");
    assert_eq!(status, 404);

    // The opener got the server URL
    let opened = std::fs::read_to_string(&marker).unwrap();
    assert_eq!(opened.trim(), server.url());

    server.shutdown();
}

#[test]
fn browser_failure_keeps_server_running() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "ok").unwrap();

    let failing = BrowserOpener::Command {
        program: "false".to_string(),
        args: vec![],
    };
    let server = launch(&config(
        dir.path(),
        BuildCommand::new("true", Vec::<String>::new()),
        failing,
    ))
    .expect("browser failure must not abort the launch");

    assert!(server.is_running());
    let (status, body) = get(server.local_addr(), "/index.html");
    assert_eq!(status, 200);
    assert_eq!(body, "ok");

    server.shutdown();
}

#[test]
fn missing_browser_keeps_server_running() {
    let dir = tempfile::tempdir().unwrap();
    let missing = BrowserOpener::Command {
        program: "devserve-no-such-browser".to_string(),
        args: vec![],
    };
    let server = launch(&config(
        dir.path(),
        BuildCommand::new("true", Vec::<String>::new()),
        missing,
    ))
    .unwrap();

    assert!(server.is_running());
    server.shutdown();
}

#[test]
fn restart_on_same_port_reuses_address() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "again").unwrap();

    let first = start_server("127.0.0.1", 0, dir.path()).unwrap();
    let addr = first.local_addr();

    for _ in 0..3 {
        // Server closes first (Connection: close), leaving TIME_WAIT behind
        let (status, _) = get(addr, "/");
        assert_eq!(status, 200);
    }
    first.shutdown();

    for _ in 0..3 {
        let server = start_server("127.0.0.1", addr.port(), dir.path())
            .expect("rebinding a just-released port must succeed");
        let (status, body) = get(server.local_addr(), "/");
        assert_eq!(status, 200);
        assert_eq!(body, "again");
        server.shutdown();
    }
}
