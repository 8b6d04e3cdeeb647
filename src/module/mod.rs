//! Module contract.
//!
//! # Responsibilities
//! - Define the [`Module`] trait every registrable unit implements
//! - Define the error type module hooks return
//!
//! # Design Decisions
//! - Hooks are async; the host awaits each to completion before the next
//! - Modules are shared as `Arc<dyn Module>` and never handed out mutably
//! - `as_any` enables typed lookup through [`Context::provide_as`]
//!
//! [`Context::provide_as`]: crate::context::Context::provide_as

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::Context;

/// Error returned by a module's load or dispose hook.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// I/O failure while acquiring or releasing a resource.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The module's configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other failure, wrapped from the module's own error type.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ModuleError {
    /// Build an ad-hoc module error from a message.
    pub fn other(message: impl Into<String>) -> Self {
        ModuleError::Other(message.into().into())
    }
}

/// A registrable unit with load and dispose lifecycle hooks.
///
/// Modules are identified by a unique name. The host loads them in
/// registration order and disposes them in reverse registration order.
/// A module's `load` may look up earlier-registered modules through the
/// context (configuration is always registered first).
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Unique module name, the registry key.
    fn name(&self) -> &str;

    /// Acquire the module's resources.
    ///
    /// Invoked once, in registration order, with every earlier module
    /// already loaded. A returned error aborts the load phase.
    async fn load(&self, ctx: &Context) -> Result<(), ModuleError>;

    /// Release the module's resources.
    ///
    /// Invoked once during shutdown, in reverse registration order. Errors
    /// are collected and logged but never stop the sweep.
    async fn dispose(&self) -> Result<(), ModuleError>;

    /// Upcast for typed lookup. Implementations return `self`.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_wraps_message() {
        let err = ModuleError::other("listener refused to bind");
        assert_eq!(err.to_string(), "listener refused to bind");
    }

    #[test]
    fn config_variant_display() {
        let err = ModuleError::Config("missing key 'redis.url'".into());
        assert_eq!(err.to_string(), "configuration error: missing key 'redis.url'");
    }
}
