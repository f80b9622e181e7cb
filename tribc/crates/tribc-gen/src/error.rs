//! Error types for JIT execution.
//!
//! Lowering itself reports through the diagnostic handler and never
//! propagates structured errors; the variants here cover the link and
//! execution taxon, which surfaces as a single diagnostic at the driver.

use thiserror::Error;

/// Error type for JIT creation and execution.
#[derive(Debug, Error)]
pub enum JitError {
    /// Native target initialization failed
    #[error("Failed to initialize native target: {0}")]
    TargetInit(String),

    /// Execution engine creation failed
    #[error("Failed to create JIT execution engine: {0}")]
    EngineCreation(String),

    /// The `main` symbol could not be resolved
    #[error("Symbol lookup failed: {0}")]
    SymbolLookup(String),

    /// The program ran but reported failure
    #[error("main function returned non-zero code: {0}")]
    NonZeroExit(i32),
}

/// Result type alias for JIT operations.
pub type Result<T> = std::result::Result<T, JitError>;
