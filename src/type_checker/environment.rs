use std::collections::HashMap;

use crate::ast::types::{Method, Type};

use super::builtins::{lookup_method, Signature};

/// Symbol table of one compilation unit.
///
/// Bindings live in a single flat table: a name bound anywhere in the unit
/// stays bound until the unit is done. Which names are *visible* at a given
/// point is tracked separately by the type checker.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    vals: HashMap<String, Type>,
    funcs: HashMap<String, Signature>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn set(&mut self, name: &str, type_: Type) {
        self.vals.insert(name.to_string(), type_);
    }

    pub fn get(&self, name: &str) -> Option<Type> {
        self.vals.get(name).copied()
    }

    pub fn ident_exists(&self, name: &str) -> bool {
        self.vals.contains_key(name)
    }

    pub fn set_function_signature(&mut self, name: &str, signature: Signature) {
        self.funcs.insert(name.to_string(), signature);
    }

    pub fn get_function_signature(&self, name: &str) -> Option<&Signature> {
        self.funcs.get(name)
    }

    pub fn method_exists(&self, type_: Type, method: Method) -> bool {
        lookup_method(type_, method).is_some()
    }

    pub fn get_method(&self, type_: Type, method: Method) -> Option<Signature> {
        lookup_method(type_, method)
    }
}
