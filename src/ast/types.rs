//! Type system definitions for the AST.
//!
//! The language only knows a closed set of primitive types, and every
//! operation on them is a builtin method identified by a mnemonic. Both sets
//! are plain enumerations so that lookups over them are checked for
//! exhaustiveness by the Rust compiler.

use std::fmt::Display;

/// The primitive types of the language.
///
/// The names double as the class names of the C++ runtime, so `Display`
/// output is used verbatim in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    String,
    Bool,
    Nothing,
}

impl Type {
    /// Resolves a type annotation written in source code.
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "Int" => Some(Type::Int),
            "String" => Some(Type::String),
            "Bool" => Some(Type::Bool),
            "Nothing" => Some(Type::Nothing),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "Int",
            Type::String => "String",
            Type::Bool => "Bool",
            Type::Nothing => "Nothing",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builtin method mnemonics.
///
/// Operators resolve to one of these, and the runtime exposes a member
/// function with exactly this name on every type that supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Plus,
    Minus,
    Times,
    Lt,
    Gt,
    Equal,
    And,
    Or,
    Print,
}

impl Method {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Method::Plus => "PLUS",
            Method::Minus => "MINUS",
            Method::Times => "TIMES",
            Method::Lt => "LT",
            Method::Gt => "GT",
            Method::Equal => "EQUAL",
            Method::And => "AND",
            Method::Or => "OR",
            Method::Print => "PRINT",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
