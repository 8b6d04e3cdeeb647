//! OS signal handling.
//!
//! # Responsibilities
//! - Translate process-level termination events into [`SignalEvent`]s
//! - Abstract the event source behind [`SignalSource`] so tests can
//!   substitute a fake emitter
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGINT and SIGTERM both request graceful shutdown (exit code 0)
//! - A panic escaping any task is routed to a fault channel (exit code 1),
//!   the process-wide analogue of an uncaught error
//! - Handlers are installed once and live for the whole process; the host
//!   owns the process and there is no uninstall path

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A process-level termination event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Graceful termination request (interrupt or terminate signal).
    Terminate,
    /// Fatal fault (a panic escaped a task).
    Fault,
}

impl SignalEvent {
    /// Exit code the process terminates with for this event.
    pub fn exit_code(&self) -> i32 {
        match self {
            SignalEvent::Terminate => 0,
            SignalEvent::Fault => 1,
        }
    }
}

/// Source of termination events for the host's run loop.
///
/// Production uses [`OsSignals`]; tests inject a channel-backed fake.
#[async_trait]
pub trait SignalSource: Send {
    /// Resolve when the next termination event arrives.
    async fn recv(&mut self) -> SignalEvent;
}

/// Termination events from the operating system and the panic hook.
pub struct OsSignals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    faults: mpsc::UnboundedReceiver<()>,
}

impl OsSignals {
    /// Subscribe to SIGINT/SIGTERM and install the panic-forwarding hook.
    ///
    /// The previously installed panic hook still runs, so default panic
    /// output is preserved.
    pub fn new() -> std::io::Result<Self> {
        let (fault_tx, faults) = mpsc::unbounded_channel();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = fault_tx.send(());
            previous(info);
        }));

        Self::subscribe(faults)
    }

    #[cfg(unix)]
    fn subscribe(faults: mpsc::UnboundedReceiver<()>) -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            faults,
        })
    }

    #[cfg(not(unix))]
    fn subscribe(faults: mpsc::UnboundedReceiver<()>) -> std::io::Result<Self> {
        Ok(Self { faults })
    }
}

#[async_trait]
impl SignalSource for OsSignals {
    #[cfg(unix)]
    async fn recv(&mut self) -> SignalEvent {
        tokio::select! {
            _ = self.interrupt.recv() => {
                tracing::info!(signal = "SIGINT", "termination signal received");
                SignalEvent::Terminate
            }
            _ = self.terminate.recv() => {
                tracing::info!(signal = "SIGTERM", "termination signal received");
                SignalEvent::Terminate
            }
            _ = self.faults.recv() => {
                tracing::error!("task panic received on fault channel");
                SignalEvent::Fault
            }
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> SignalEvent {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(signal = "ctrl-c", "termination signal received");
                SignalEvent::Terminate
            }
            _ = self.faults.recv() => {
                tracing::error!("task panic received on fault channel");
                SignalEvent::Fault
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SignalEvent::Terminate.exit_code(), 0);
        assert_eq!(SignalEvent::Fault.exit_code(), 1);
    }
}
