//! The builtin method table of the primitive types.
//!
//! Every operator dispatches to a method on its left operand, and the table
//! below is the only place that decides which type supports which method.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::types::{Method, Type};

/// Parameter and return types of a callable.
///
/// Used for both user declared functions and builtin methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: Type,
    pub params: Vec<Type>,
}

impl Signature {
    pub fn new(return_type: Type, params: Vec<Type>) -> Self {
        Signature { return_type, params }
    }
}

lazy_static! {
    /// Builtins callable by name, each lowered to a method on its argument.
    pub static ref BUILTIN_FUNCTIONS: HashMap<&'static str, Method> = {
        let mut map = HashMap::new();
        map.insert("PRINT", Method::Print);
        map
    };
}

pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains_key(name)
}

// Names the generated C++ already uses: the runtime classes, the entry
// point, macros from the included headers and every C++17 keyword.
lazy_static! {
    static ref RESERVED_IDENTIFIERS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.extend(["Nothing", "Bool", "Int", "String", "main"]);
        set.extend(["EOF", "NULL", "errno", "TOYC_BUILTINS_HPP"]);
        set.extend([
            "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool",
            "break", "case", "catch", "char", "char16_t", "char32_t", "char8_t", "class",
            "compl", "concept", "const", "const_cast", "consteval", "constexpr", "constinit",
            "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete",
            "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
            "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
            "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator",
            "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
            "requires", "return", "short", "signed", "sizeof", "static", "static_assert",
            "static_cast", "struct", "switch", "template", "this", "thread_local", "throw",
            "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
            "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
        ]);
        set
    };

    // Generator temporaries, and the spellings C++ keeps for the implementation.
    static ref RESERVED_PATTERN: Regex = Regex::new("^(tmp_[0-9]+|_[A-Z].*|.*__.*)$").unwrap();
}

/// Whether `name` would clash with a name the generated C++ relies on.
pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(name) || RESERVED_PATTERN.is_match(name)
}

/// Looks up the signature of `method` on `receiver`.
pub fn lookup_method(receiver: Type, method: Method) -> Option<Signature> {
    use Method::*;

    let signature = match (receiver, method) {
        (Type::Int, Plus | Minus | Times) => Signature::new(Type::Int, vec![Type::Int]),
        (Type::Int, Lt | Gt | Equal) => Signature::new(Type::Bool, vec![Type::Int]),
        (Type::Int, Print) => Signature::new(Type::Nothing, vec![]),
        (Type::Int, And | Or) => return None,

        (Type::String, Plus) => Signature::new(Type::String, vec![Type::String]),
        (Type::String, Print) => Signature::new(Type::Nothing, vec![]),
        (Type::String, Minus | Times | Lt | Gt | Equal | And | Or) => return None,

        (Type::Bool, And | Or) => Signature::new(Type::Bool, vec![Type::Bool]),
        (Type::Bool, Print) => Signature::new(Type::Nothing, vec![]),
        (Type::Bool, Plus | Minus | Times | Lt | Gt | Equal) => return None,

        (Type::Nothing, _) => return None,
    };

    Some(signature)
}
