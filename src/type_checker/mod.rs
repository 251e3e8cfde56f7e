//! Type checking and semantic analysis module.
//!
//! This module verifies a parsed `Program` and annotates it in place for
//! code generation while:
//!
//! - Inferring the type of every expression
//! - Resolving operators and builtin calls to runtime methods
//! - Checking function signatures, argument counts and argument types
//! - Rejecting redeclared, unknown or out-of-scope identifiers
//!
//! The resulting `Environment` holds every binding and function signature
//! of the unit and is handed to the code generator.

pub mod builtins;
pub mod environment;
pub mod type_checker;
