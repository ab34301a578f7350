//! Error types for clickwork-core
//!
//! Only genuine faults live here. Expected business outcomes (insufficient
//! funds, no active order, ...) are modeled as result variants on the engine
//! operations, never as errors.

use crate::DefId;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Definition not found: {0}")]
    DefinitionNotFound(DefId),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
