//! HTTP server lifecycle: two-phase startup and bounded graceful shutdown.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;

/// Window during which a bind/serve failure is reported synchronously to
/// the caller of [`HttpServer::start`]. Failures after the window arrive
/// through [`ServerHandle::serve_error`].
const STARTUP_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server failed to start: {0}")]
    Startup(#[source] io::Error),

    #[error("server exited before startup completed")]
    ExitedEarly,

    #[error("server task panicked: {0}")]
    Panicked(#[source] tokio::task::JoinError),

    #[error("graceful shutdown deadline exceeded")]
    ShutdownTimeout,
}

/// A configured but not yet listening HTTP server.
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

/// Handle to a server that survived the startup grace window.
pub struct ServerHandle {
    errors: mpsc::Receiver<io::Error>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl HttpServer {
    pub fn new(addr: SocketAddr, router: Router) -> Self {
        Self { addr, router }
    }

    /// Begin listening asynchronously.
    ///
    /// Two-phase start: the bind/serve task reports its failure on a
    /// channel; an error arriving within the grace window is returned
    /// synchronously as a startup error. Surviving the window means startup
    /// succeeded and later failures are observed via the returned handle.
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let (err_tx, mut errors) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let addr = self.addr;
        let router = self.router;
        let task = tokio::spawn(async move {
            if let Err(err) = serve(addr, router, shutdown_rx).await {
                let _ = err_tx.send(err).await;
            }
        });

        match time::timeout(STARTUP_GRACE, errors.recv()).await {
            Ok(Some(err)) => Err(ServerError::Startup(err)),
            Ok(None) => Err(ServerError::ExitedEarly),
            Err(_elapsed) => Ok(ServerHandle {
                errors,
                shutdown: shutdown_tx,
                task,
            }),
        }
    }
}

async fn serve(
    addr: SocketAddr,
    router: Router,
    shutdown_rx: oneshot::Receiver<()>,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    })
    .await
}

impl ServerHandle {
    /// Wait for a serve failure that happens after startup. Resolves to
    /// `None` if the server stops without reporting one.
    pub async fn serve_error(&mut self) -> Option<io::Error> {
        self.errors.recv().await
    }

    /// One-shot graceful shutdown: stop accepting new connections and wait
    /// for in-flight requests to finish, up to `deadline`. On timeout the
    /// serve task is abandoned and a timeout error returned.
    pub async fn shutdown(mut self, deadline: Duration) -> Result<(), ServerError> {
        let _ = self.shutdown.send(());

        match time::timeout(deadline, &mut self.task).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(join_err)) => Err(ServerError::Panicked(join_err)),
            Err(_elapsed) => {
                self.task.abort();
                Err(ServerError::ShutdownTimeout)
            }
        }
    }
}
