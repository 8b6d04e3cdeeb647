//! Structured logging initialization.
//!
//! # Responsibilities
//! - Install the tracing subscriber for the host process
//! - Honor the `silent` service flag
//!
//! # Design Decisions
//! - Log level configurable via `RUST_LOG`, defaulting to info for this
//!   crate
//! - `silent` suppresses subscriber installation entirely; nothing in the
//!   host logs after that

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::ServiceConfig;

/// Initialize the global tracing subscriber.
///
/// Call once, from the binary, before constructing the context. When the
/// service is silent no subscriber is installed and all diagnostic output
/// is suppressed.
pub fn init(service: &ServiceConfig) {
    if service.silent {
        return;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chassis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
