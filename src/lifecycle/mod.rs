//! Lifecycle plumbing around the orchestrator.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → SignalEvent::Terminate → dispose, exit 0
//!     task panic     → SignalEvent::Fault     → dispose, exit 1
//!
//! Shutdown (shutdown.rs):
//!     dispose sweep → one DisposeOutcome per module → DisposeReport
//! ```
//!
//! # Design Decisions
//! - The signal source is injected into the run loop, never a global hook
//! - Dispose outcomes are collected, never swallowed; the report decides
//!   nothing itself, it only carries what happened

pub mod shutdown;
pub mod signals;

pub use shutdown::{DisposeOutcome, DisposeReport};
pub use signals::{OsSignals, SignalEvent, SignalSource};
