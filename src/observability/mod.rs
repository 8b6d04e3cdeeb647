//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured tracing events (module names, phases, exit codes)
//!
//! Consumers:
//!     → stdout via tracing-subscriber (logging.rs)
//!     → open-handle dump right before exit (handles.rs)
//! ```
//!
//! # Design Decisions
//! - Structured fields over interpolated strings
//! - The silent flag turns the whole surface off, not individual lines

pub mod handles;
pub mod logging;
