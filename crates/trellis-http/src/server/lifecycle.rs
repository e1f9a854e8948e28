//! Server lifecycle management - binding, serving and signal handling

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, warn};

use crate::errors::{HttpError, HttpResult};

/// Bind a TCP listener on `address`
pub async fn bind(address: &str) -> HttpResult<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|e| HttpError::startup(format!("Failed to bind to {}: {}", address, e)))
}

/// Serve `router` on `listener` until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> HttpResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down gracefully");
        },
    }
}
