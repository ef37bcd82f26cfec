use sim_core::{PoolError, ValidationError};
use thiserror::Error;

/// Errors that abort a tournament run.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
    #[error("random pool undersized: {0}")]
    Pool(#[from] PoolError),
}
