//! Module-lifecycle process host library

pub mod config;
pub mod context;
pub mod lifecycle;
pub mod module;
pub mod observability;

pub use config::module::ConfigModule;
pub use config::schema::ServiceConfig;
pub use context::{Context, LoadError};
pub use lifecycle::shutdown::{DisposeOutcome, DisposeReport};
pub use lifecycle::signals::{OsSignals, SignalEvent, SignalSource};
pub use module::{Module, ModuleError};
