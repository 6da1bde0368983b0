//! Server loop with a bounded graceful shutdown

use std::time::Duration;

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// Serve `app` until `signal` resolves, then drain in-flight requests
///
/// Connections still open once `grace` has elapsed after the signal are
/// dropped and the function returns.
///
/// # Errors
///
/// Returns an error if the underlying accept loop fails.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (started_tx, started_rx) = oneshot::channel();

    let shutdown = async move {
        signal.await;
        info!("⏳ Waiting up to {:?} for connections to close...", grace);
        let _ = started_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .into_future();

    tokio::select! {
        result = server => result,
        () = drain_deadline(started_rx, grace) => {
            warn!(?grace, "Shutdown grace period elapsed, dropping open connections");
            Ok(())
        }
    }
}

async fn drain_deadline(started: oneshot::Receiver<()>, grace: Duration) {
    if started.await.is_ok() {
        tokio::time::sleep(grace).await;
    } else {
        std::future::pending::<()>().await;
    }
}
