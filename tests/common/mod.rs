//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use trie_router::{Engine, Shutdown};

/// A running engine and the handles needed to stop it.
#[allow(dead_code)]
pub struct RunningEngine {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningEngine {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serve `engine` on an ephemeral local port.
pub async fn spawn_engine(engine: Engine) -> RunningEngine {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let task = tokio::spawn(engine.run(listener, server_shutdown));

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningEngine {
        addr,
        shutdown,
        task,
    }
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
