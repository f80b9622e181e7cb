//! JIT facade.
//!
//! Takes ownership of a completed module, hands it to an execution
//! engine, and invokes the synthesized `main` as a nullary function
//! returning `i32`. The module must not be referenced after the transfer.

use inkwell::module::Module;
use inkwell::targets::{InitializationConfig, Target};
use inkwell::OptimizationLevel;

use crate::error::{JitError, Result};

/// Compiles the module to native code and runs its `main`.
///
/// A non-zero status from `main` is reported as an execution error;
/// termination is otherwise clean.
pub fn execute(module: Module<'_>) -> Result<()> {
    Target::initialize_native(&InitializationConfig::default()).map_err(JitError::TargetInit)?;

    let engine = module
        .create_jit_execution_engine(OptimizationLevel::None)
        .map_err(|e| JitError::EngineCreation(e.to_string()))?;

    let main = unsafe { engine.get_function::<unsafe extern "C" fn() -> i32>("main") }
        .map_err(|e| JitError::SymbolLookup(e.to_string()))?;

    let status = unsafe { main.call() };
    if status != 0 {
        return Err(JitError::NonZeroExit(status));
    }

    Ok(())
}
