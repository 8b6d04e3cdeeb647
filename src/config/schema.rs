//! Service configuration schema.
//!
//! This is the host-level configuration the context is constructed with.
//! It is read-only for the context's entire lifetime; application-level
//! configuration is the default config module's business, not this
//! struct's.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host-level configuration for a [`Context`](crate::context::Context).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name, used in log output.
    pub name: String,

    /// Suppress all diagnostic output.
    pub silent: bool,

    /// Dump still-open async handles immediately before process exit.
    pub print_open_handles: bool,

    /// Directory the default config module reads application config from.
    pub config_dir: PathBuf,

    /// Configuration environment name (selects the overlay layer).
    /// The `CHASSIS_ENV` process variable takes precedence.
    pub env: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "chassis".to_string(),
            silent: false,
            print_open_handles: false,
            config_dir: PathBuf::from("config"),
            env: "default".to_string(),
        }
    }
}
