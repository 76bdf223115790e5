//! Static file server for watch mode.
//!
//! Serves a directory as-is: `index.html` for directory requests, `no-cache`
//! on every response so the browser always picks up the latest bundle, and
//! permissive CORS for local development.

use axum::Router;
use axum::http::{HeaderValue, header};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{Error, Result};

/// Where and what to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    /// Interface to bind, `localhost` by default
    pub host: String,
    /// Port to bind; `0` picks a free port
    pub port: u16,
    /// Directory served at `/`
    pub servedir: PathBuf,
}

impl ServeOptions {
    pub fn new(port: u16, servedir: impl Into<PathBuf>) -> Self {
        Self {
            host: "localhost".to_string(),
            port,
            servedir: servedir.into(),
        }
    }
}

/// Address the server actually bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeResult {
    pub host: String,
    pub port: u16,
}

impl ServeResult {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Router serving `dir`.
pub fn router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// A running server. Dropping the handle without calling
/// [`ServerHandle::shutdown`] leaves the server running until the runtime exits.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(self) -> Result<()> {
        // Err means the server already stopped on its own
        let _ = self.shutdown.send(());
        match self.task.await {
            Ok(result) => result.map_err(|e| Error::Serve(e.to_string())),
            Err(e) => Err(Error::Serve(format!("server task failed: {e}"))),
        }
    }
}

/// Bind and start serving in the background.
pub async fn start(options: &ServeOptions) -> Result<(ServerHandle, ServeResult)> {
    let listener = TcpListener::bind((options.host.as_str(), options.port))
        .await
        .map_err(|e| {
            Error::Serve(format!(
                "Failed to bind to {}:{}: {}",
                options.host, options.port, e
            ))
        })?;
    let addr = listener.local_addr()?;

    let app = router(&options.servedir);
    let (tx, rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
    });

    tracing::debug!(
        addr = %addr,
        servedir = %options.servedir.display(),
        "Static server listening"
    );

    Ok((
        ServerHandle {
            addr,
            shutdown: tx,
            task,
        },
        ServeResult {
            host: options.host.clone(),
            port: addr.port(),
        },
    ))
}
