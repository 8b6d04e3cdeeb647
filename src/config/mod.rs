//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! service config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → owned by the Context for its lifetime
//!
//! application config (module.rs, the default registered module):
//!     <config_dir>/default.{toml,json} + <config_dir>/<env>.{toml,json}
//!     → deep merge → dotted-path lookups for every other module
//! ```
//!
//! # Design Decisions
//! - Service config is immutable once the context is constructed
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod module;
pub mod schema;
pub mod validation;

pub use loader::{load_service_config, ConfigError};
pub use module::ConfigModule;
pub use schema::ServiceConfig;
