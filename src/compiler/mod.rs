//! Code generation module for the compiler.
//!
//! This module lowers a type checked `Program` to C++ source that links
//! against the runtime in `runtime/builtins.hpp`. It handles:
//!
//! - Materializing every intermediate value into a temporary
//! - Dispatching operators and builtins to runtime methods
//! - Function definitions and the `main` wrapper for top-level statements

pub mod compiler;
pub mod expr;
pub mod runtime;
pub mod stmt;

#[cfg(test)]
mod tests;
