use crate::{
    ast::{
        ast::Expr,
        expressions::{CallExpr, InfixExpr, ResolvedCall},
        types::Type,
    },
    errors::errors::CodegenFault,
};

use super::compiler::{Compiler, Value};

/// Lowers an expression and returns the value holding its result.
///
/// Literals and operation results get a fresh temporary; identifiers are
/// referenced by name.
pub fn gen_expression(compiler: &mut Compiler, expr: &Expr) -> Result<Value, CodegenFault> {
    match expr {
        Expr::Integer(integer) => Ok(compiler.emit_temp(Type::Int, &format!("Int({})", integer.value))),
        Expr::String(string) => Ok(compiler.emit_temp(
            Type::String,
            &format!("String(\"{}\")", escape_string(&string.value)),
        )),
        Expr::Boolean(boolean) => Ok(compiler.emit_temp(Type::Bool, &format!("Bool({})", boolean.value))),
        Expr::Identifier(identifier) => Ok(Value {
            type_: compiler.local(&identifier.value)?,
            name: identifier.value.clone(),
        }),
        Expr::Infix(infix) => gen_infix(compiler, infix),
        Expr::Call(call) => gen_call(compiler, call),
    }
}

fn gen_infix(compiler: &mut Compiler, infix: &InfixExpr) -> Result<Value, CodegenFault> {
    let Some(operand_type) = infix.resolved_type else {
        return Err(CodegenFault::UnresolvedInfix { operator: infix.operator.to_string() });
    };
    let Some(method) = infix.operator.method() else {
        return Err(CodegenFault::UnknownOperator { operator: infix.operator.to_string() });
    };
    let Some(signature) = compiler.environment.get_method(operand_type, method) else {
        return Err(CodegenFault::MissingBuiltin { method: method.to_string(), type_: operand_type });
    };

    let left = gen_expression(compiler, &infix.left)?;
    let right = gen_expression(compiler, &infix.right)?;

    Ok(compiler.emit_temp(
        signature.return_type,
        &format!("{}.{}({})", left.name, method, right.name),
    ))
}

fn gen_call(compiler: &mut Compiler, call: &CallExpr) -> Result<Value, CodegenFault> {
    match call.resolved {
        Some(ResolvedCall::Builtin { method, receiver }) => {
            let Some(signature) = compiler.environment.get_method(receiver, method) else {
                return Err(CodegenFault::MissingBuiltin { method: method.to_string(), type_: receiver });
            };

            // Builtins take their only argument as the receiver.
            let mut arguments = Vec::with_capacity(call.arguments.len());
            for argument in call.arguments.iter() {
                arguments.push(gen_expression(compiler, argument)?.name);
            }
            let Some((receiver_name, rest)) = arguments.split_first() else {
                return Err(CodegenFault::UnresolvedCall { function: call.name.clone() });
            };

            let initialiser = format!("{}.{}({})", receiver_name, method, rest.join(", "));
            Ok(compiler.emit_temp(signature.return_type, &initialiser))
        }
        Some(ResolvedCall::Function) => {
            let Some(signature) = compiler.environment.get_function_signature(&call.name) else {
                return Err(CodegenFault::MissingSignature { function: call.name.clone() });
            };
            let return_type = signature.return_type;

            let mut arguments = Vec::with_capacity(call.arguments.len());
            for argument in call.arguments.iter() {
                arguments.push(gen_expression(compiler, argument)?.name);
            }

            let initialiser = format!("{}({})", call.name, arguments.join(", "));
            Ok(compiler.emit_temp(return_type, &initialiser))
        }
        None => Err(CodegenFault::UnresolvedCall { function: call.name.clone() }),
    }
}

/// Escapes a string for use inside a C++ string literal.
///
/// Control characters use three digit octal escapes so that a following
/// digit can never extend the escape sequence.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '?' => escaped.push_str("\\?"),
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                escaped.push_str(&format!("\\{:03o}", ch as u32));
            }
            ch => escaped.push(ch),
        }
    }

    escaped
}
