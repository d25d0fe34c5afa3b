//! Error types for the section solver

use thiserror::Error;

/// Main error type for section analysis operations
#[derive(Error, Debug)]
pub enum SectionError {
    #[error(
        "equilibrium iteration failed to converge at step {step} after {iterations} iterations \
         (unbalance = {unbalance:.3e})"
    )]
    NonConvergence {
        /// Analysis step that failed (0 = axial load step)
        step: usize,
        /// Iterations spent before giving up
        iterations: usize,
        /// Last unbalanced axial force
        unbalance: f64,
    },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for section analysis operations
pub type SectionResult<T> = Result<T, SectionError>;
