//! Main compiler module.
//!
//! This module contains the core Compiler structure and the `generate`
//! entry point that lowers a checked `Program` to C++ source. Every
//! intermediate value is materialized into a numbered temporary and every
//! operation becomes a method call on a runtime class.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{ast::Program, types::Type},
    errors::errors::CodegenFault,
    type_checker::environment::Environment,
};

use super::{runtime::RUNTIME_HEADER, stmt::{gen_function, gen_statement}};

const INDENT: &str = "    ";

/// A lowered expression: the C++ name that holds it and its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub name: String,
    pub type_: Type,
}

/// The state of one code generation run.
///
/// Holds the output buffer, the temporary counter and the indentation level.
/// `locals` maps every name declared in the function being lowered (or in
/// `main`) to its type.
pub struct Compiler<'a> {
    /// Signatures and builtin methods resolved by the type checker
    pub environment: &'a Environment,
    /// Types of the names in the current C++ function
    pub locals: HashMap<String, Type>,

    output: String,
    temp_counter: usize,
    indent: usize,
}

impl<'a> Compiler<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Compiler {
            environment,
            locals: HashMap::new(),
            output: String::new(),
            temp_counter: 0,
            indent: 0,
        }
    }

    /// Returns the next temporary name, starting at `tmp_1`.
    pub fn fresh_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("tmp_{}", self.temp_counter)
    }

    /// Writes one line at the current indentation.
    pub fn emit_line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
        }

        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Declares a fresh temporary initialised with `initialiser`.
    pub fn emit_temp(&mut self, type_: Type, initialiser: &str) -> Value {
        let name = self.fresh_temp();
        trace!("{} holds {}", name, initialiser);
        self.emit_line(&format!("{} {} = {};", type_, name, initialiser));

        Value { name, type_ }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn declare_local(&mut self, name: &str, type_: Type) {
        self.locals.insert(name.to_string(), type_);
    }

    pub fn local(&self, name: &str) -> Result<Type, CodegenFault> {
        self.locals
            .get(name)
            .copied()
            .ok_or_else(|| CodegenFault::MissingBinding { ident: name.to_string() })
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Lowers a checked program to a C++ translation unit.
///
/// The program must have gone through the type checker, which both annotated
/// it and produced `environment`. A fresh compiler is used for every call, so
/// the same input always produces the same output.
pub fn generate(program: &Program, environment: &Environment) -> Result<String, CodegenFault> {
    let mut compiler = Compiler::new(environment);

    compiler.emit_line("#include <string>");
    compiler.emit_line(&format!("#include \"{}\"", RUNTIME_HEADER));
    compiler.emit_line("");

    for function in program.functions.iter() {
        debug!("lowering function `{}`", function.name);
        gen_function(&mut compiler, function)?;
        compiler.emit_line("");
    }

    debug!("lowering {} top-level statements", program.statements.len());
    compiler.locals.clear();
    compiler.emit_line("int main() {");
    compiler.indent();
    for stmt in program.statements.iter() {
        gen_statement(&mut compiler, stmt)?;
    }
    compiler.emit_line("return 0;");
    compiler.dedent();
    compiler.emit_line("}");

    Ok(compiler.finish())
}
