//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Diagnostics with source position information for lexing, parsing and
//!   type checking
//! - Internal faults raised by the code generator
//! - Failures of the external C++ toolchain

pub mod errors;

#[cfg(test)]
mod tests;
