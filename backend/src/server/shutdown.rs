//! Graceful shutdown.
//!
//! Actix's own signal handling is disabled so the probes can report
//! `draining` while in-flight requests finish.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tokio::signal;
use tracing::{error, info};

use backend::inbound::http::health::HealthState;

/// Resolve on SIGINT or, on Unix, SIGTERM.
///
/// A handler that cannot be installed never resolves, so a broken signal
/// source does not stop the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}

/// Wait for `signal`, mark the server `draining`, then stop it gracefully.
pub async fn drain_on<F>(signal: F, handle: ServerHandle, health_state: web::Data<HealthState>)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_draining();
    info!("draining in-flight requests");
    handle.stop(true).await;
}
