use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::pricing::TableUpdater;

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections, clean up)
    Graceful,
}

/// Setup signal handlers for the server
///
/// Returns the broadcast sender for shutdown signals, a receiver subscribed
/// before the signal task starts, and a join handle for that task
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Re-fetch runner prices
#[cfg(unix)]
pub fn setup_signal_handlers(
    updater: Arc<TableUpdater>,
) -> (
    broadcast::Sender<ShutdownSignal>,
    broadcast::Receiver<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let (mut sigterm, mut sigint, mut sighup) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                error!("Failed to install signal handlers, falling back to Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
                let _ = tx_clone.send(ShutdownSignal::Graceful);
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading runner prices");
                    updater.run_once().await;
                }
            }
        }
    });

    (shutdown_tx, shutdown_rx, handle)
}

/// Windows fallback: Ctrl+C only, no reload signal
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _updater: Arc<TableUpdater>,
) -> (
    broadcast::Sender<ShutdownSignal>,
    broadcast::Receiver<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, initiating graceful shutdown");
        } else {
            error!("Failed to listen for Ctrl+C");
        }
        let _ = tx_clone.send(ShutdownSignal::Graceful);
    });

    (shutdown_tx, shutdown_rx, handle)
}
