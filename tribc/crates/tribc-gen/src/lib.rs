//! tribc-gen - LLVM IR lowering and JIT execution for Tribhasha.
//!
//! The lowering pass walks the AST and drives the LLVM IR builder through
//! the `inkwell` safe bindings. Every non-string value uses a uniform
//! 64-bit floating-point scalar; strings are pointers into private global
//! byte arrays. The finished module transfers by value into the JIT
//! facade, which looks up and invokes `main`.

pub mod error;
pub mod jit;
pub mod llvm;

pub use error::{JitError, Result};
pub use jit::execute;
pub use llvm::CodeGen;
