//! tribc-util - Shared utilities for the Tribhasha compiler.
//!
//! This crate provides the diagnostic infrastructure used by every phase
//! of the pipeline. Errors are reported textually as they are raised; the
//! only thing that crosses phase boundaries is the "any errors?" flag the
//! driver consults to pick its exit code.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Handler, Level};
