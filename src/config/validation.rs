//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value shapes (non-empty names, sane environment names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a service configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("service name must not be empty")]
    EmptyName,

    #[error("environment name must not be empty")]
    EmptyEnv,

    /// The environment name becomes a file stem; separators would escape
    /// the config directory.
    #[error("environment name \"{0}\" must not contain path separators")]
    EnvPathSeparator(String),
}

/// Validate a service configuration, collecting every problem.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    if config.env.trim().is_empty() {
        errors.push(ValidationError::EmptyEnv);
    } else if config.env.contains(['/', '\\']) {
        errors.push(ValidationError::EnvPathSeparator(config.env.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
