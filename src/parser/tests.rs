//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Variable initialisation and assignment
//! - Function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::Operator,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.toy".to_string())).unwrap();
    parse(tokens, Rc::new("test.toy".to_string()))
}

fn first_expression(program: &Program) -> &Expr {
    match &program.statements[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_init_statement() {
    let program = parse_source("let x = 42;").unwrap();

    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Stmt::Init(stmt) => {
            assert_eq!(stmt.identifier, "x");
            assert!(matches!(&stmt.value, Expr::Integer(value) if value.value == 42));
        }
        other => panic!("expected init statement, got {:?}", other),
    }
}

#[test]
fn test_parse_assign_statement() {
    let program = parse_source("let x = 1; x = 2;").unwrap();

    match &program.statements[1] {
        Stmt::Assign(stmt) => {
            assert_eq!(stmt.target, "x");
            assert!(matches!(&stmt.value, Expr::Integer(value) if value.value == 2));
        }
        other => panic!("expected assign statement, got {:?}", other),
    }
}

#[test]
fn test_parse_literals() {
    let program = parse_source("\"hi\"; true; false; name;").unwrap();

    assert!(matches!(first_expression(&program), Expr::String(value) if value.value == "hi"));
    assert!(matches!(&program.statements[1], Stmt::Expression(stmt) if matches!(&stmt.expression, Expr::Boolean(b) if b.value)));
    assert!(matches!(&program.statements[2], Stmt::Expression(stmt) if matches!(&stmt.expression, Expr::Boolean(b) if !b.value)));
    assert!(matches!(&program.statements[3], Stmt::Expression(stmt) if matches!(&stmt.expression, Expr::Identifier(i) if i.value == "name")));
}

#[test]
fn test_parse_precedence() {
    let program = parse_source("5 * 5 + 9;").unwrap();

    let Expr::Infix(sum) = first_expression(&program) else {
        panic!("expected infix expression");
    };
    assert_eq!(sum.operator, Operator::Plus);
    assert!(matches!(sum.left.as_ref(), Expr::Infix(product) if product.operator == Operator::Times));
    assert!(matches!(sum.right.as_ref(), Expr::Integer(value) if value.value == 9));
    assert_eq!(sum.resolved_type, None);
}

#[test]
fn test_parse_left_associative() {
    let program = parse_source("1 - 2 - 3;").unwrap();

    let Expr::Infix(outer) = first_expression(&program) else {
        panic!("expected infix expression");
    };
    assert!(matches!(outer.left.as_ref(), Expr::Infix(inner) if inner.operator == Operator::Minus));
    assert!(matches!(outer.right.as_ref(), Expr::Integer(value) if value.value == 3));
}

#[test]
fn test_parse_logical_binds_loosest() {
    let program = parse_source("1 < 2 and 3 > 2 or false;").unwrap();

    let Expr::Infix(or) = first_expression(&program) else {
        panic!("expected infix expression");
    };
    assert_eq!(or.operator, Operator::Or);
    let Expr::Infix(and) = or.left.as_ref() else {
        panic!("expected infix expression");
    };
    assert_eq!(and.operator, Operator::And);
    assert!(matches!(and.left.as_ref(), Expr::Infix(lt) if lt.operator == Operator::Less));
}

#[test]
fn test_parse_grouping() {
    let program = parse_source("(1 + 2) * 3;").unwrap();

    let Expr::Infix(product) = first_expression(&program) else {
        panic!("expected infix expression");
    };
    assert_eq!(product.operator, Operator::Times);
    assert!(matches!(product.left.as_ref(), Expr::Infix(sum) if sum.operator == Operator::Plus));
}

#[test]
fn test_parse_call_expression() {
    let program = parse_source("add(1, x + 2);").unwrap();

    let Expr::Call(call) = first_expression(&program) else {
        panic!("expected call expression");
    };
    assert_eq!(call.name, "add");
    assert_eq!(call.arguments.len(), 2);
    assert!(matches!(&call.arguments[1], Expr::Infix(_)));
    assert_eq!(call.resolved, None);
}

#[test]
fn test_parse_call_without_arguments() {
    let program = parse_source("one();").unwrap();

    let Expr::Call(call) = first_expression(&program) else {
        panic!("expected call expression");
    };
    assert!(call.arguments.is_empty());
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source("func add(x Int, y Int) Int {\n    return x + y;\n}\nlet a = add(1, 3);").unwrap();

    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.statements.len(), 1);

    let function = &program.functions[0];
    assert_eq!(function.name, "add");
    assert_eq!(function.return_type, Type::Int);
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].name, "x");
    assert_eq!(function.parameters[1].type_, Type::Int);
    assert!(matches!(&function.body.body[0], Stmt::Return(_)));
}

#[test]
fn test_parse_function_defaults_to_nothing() {
    let program = parse_source("func greet(name String) { PRINT(name); };").unwrap();

    assert_eq!(program.functions[0].return_type, Type::Nothing);
    assert!(program.statements.is_empty());
}

#[test]
fn test_parse_if_statement() {
    let program = parse_source("if (x > 0) { PRINT(x); }").unwrap();

    let Stmt::If(stmt) = &program.statements[0] else {
        panic!("expected if statement");
    };
    assert_eq!(stmt.consequent.body.len(), 1);
    assert!(stmt.alternative.body.is_empty());
}

#[test]
fn test_parse_if_else_if_chain() {
    let program = parse_source("if (a) { 1; } else if (b) { 2; } else { 3; }").unwrap();

    let Stmt::If(stmt) = &program.statements[0] else {
        panic!("expected if statement");
    };
    let Stmt::If(nested) = &stmt.alternative.body[0] else {
        panic!("expected nested if statement");
    };
    assert_eq!(nested.alternative.body.len(), 1);
}

#[test]
fn test_parse_nested_block() {
    let program = parse_source("{ let x = 1; { x; } }").unwrap();

    let Stmt::Block(block) = &program.statements[0] else {
        panic!("expected block statement");
    };
    assert_eq!(block.body.len(), 2);
    assert!(matches!(&block.body[1], Stmt::Block(_)));
}

#[test]
fn test_parse_spans() {
    let program = parse_source("let x = 5;\nx = 6;").unwrap();

    let span = program.statements[1].get_span();
    assert_eq!(span.start.0, 11);
    assert_eq!(span.end.0, 17);
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("let x = 5").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnexpectedToken { token: String::from("EOF") });
}

#[test]
fn test_parse_unknown_type() {
    let error = parse_source("func f(x Float) Int { return 1; }").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnknownType { type_: String::from("Float") });
    assert_eq!(error.get_position().0, 9);
}

#[test]
fn test_parse_nested_function_rejected() {
    let error = parse_source("func outer() { func inner() { } }").unwrap_err();

    assert!(matches!(error.kind(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_parse_unclosed_block() {
    let result = parse_source("if (true) { let x = 1;");

    assert!(result.is_err());
}

#[test]
fn test_parse_number_overflow() {
    let error = parse_source("let x = 99999999999999999999;").unwrap_err();

    assert!(matches!(error.kind(), ErrorImpl::NumberParseError { .. }));
}

#[test]
fn test_parse_call_on_literal_rejected() {
    assert!(parse_source("5(1);").is_err());
}

#[test]
fn test_parse_return_requires_value() {
    assert!(parse_source("func f() { return; }").is_err());
}
