//! OS signal handling.
//!
//! Signal listeners are process-wide, so installation is one-shot and
//! guarded by an atomic flag rather than left to callers.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::lifecycle::Shutdown;

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Spawn a task that triggers `shutdown` on Ctrl-C or SIGTERM.
///
/// Returns `false` without doing anything if listeners were already
/// installed. Must be called from within a tokio runtime.
pub fn install(shutdown: &Shutdown) -> bool {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Termination signal received");
        shutdown.trigger();
    });
    true
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_is_one_shot() {
        let shutdown = Shutdown::new();
        assert!(install(&shutdown));
        assert!(!install(&shutdown));
        assert!(!install(&Shutdown::new()));
    }
}
