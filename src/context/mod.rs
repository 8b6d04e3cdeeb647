//! The orchestrator subsystem.
//!
//! # Data Flow
//! ```text
//! Context::new(service)
//!     → default config module registered
//!     → caller registers its modules (insertion order = load order)
//!
//! Context::run(signals)
//!     → load(): forward sweep, sequential, fail-fast
//!     → wait for SignalEvent (or load failure)
//!     → dispose(code): reverse sweep, sequential, best-effort
//!     → DisposeReport (caller exits the process with its code)
//! ```
//!
//! # Design Decisions
//! - Registry iteration order is the only ordering source: no dependency
//!   graph, no parallelism within a phase
//! - Dispose always covers the full registry, loaded or not
//! - Dispose is idempotent via a once-gate; a second trigger never starts
//!   a second sweep

pub mod context;
pub mod registry;

pub use context::{Context, LoadError};
pub use registry::ModuleRegistry;
