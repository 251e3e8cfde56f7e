use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::ResolvedCall,
    },
    errors::errors::CodegenFault,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{environment::Environment, type_checker::type_check},
};

use super::{compiler::generate, expr::escape_string};

fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.toy".to_string())).unwrap();
    parse(tokens, Rc::new("test.toy".to_string())).unwrap()
}

fn compile(source: &str) -> String {
    let mut program = parse_source(source);
    let environment = type_check(&mut program).unwrap();
    generate(&program, &environment).unwrap()
}

#[test]
fn test_infix_temporaries() {
    let expected = r#"#include <string>
#include "builtins.hpp"

int main() {
    Int tmp_1 = Int(5);
    Int tmp_2 = Int(5);
    Int tmp_3 = tmp_1.PLUS(tmp_2);
    tmp_3;
    return 0;
}
"#;

    assert_eq!(compile("5 + 5;"), expected);
}

#[test]
fn test_literals() {
    let expected = r#"#include <string>
#include "builtins.hpp"

int main() {
    String tmp_1 = String("hi");
    String s = tmp_1;
    Bool tmp_2 = Bool(true);
    Bool b = tmp_2;
    Int tmp_3 = Int(42);
    Int i = tmp_3;
    return 0;
}
"#;

    assert_eq!(compile("let s = \"hi\";\nlet b = true;\nlet i = 42;"), expected);
}

#[test]
fn test_function_and_call() {
    let source = "func add(x Int, y Int) Int {\n    return x + y;\n}\nlet a = add(1, 3);\nPRINT(a);";
    let expected = r#"#include <string>
#include "builtins.hpp"

Int add(Int x, Int y) {
    Int tmp_1 = x.PLUS(y);
    return tmp_1;
}

int main() {
    Int tmp_2 = Int(1);
    Int tmp_3 = Int(3);
    Int tmp_4 = add(tmp_2, tmp_3);
    Int a = tmp_4;
    Nothing tmp_5 = a.PRINT();
    tmp_5;
    return 0;
}
"#;

    assert_eq!(compile(source), expected);
}

#[test]
fn test_if_and_nothing_function() {
    let source = "func greet(name String) { PRINT(name); }\nif (1 < 2) { greet(\"hi\"); } else { PRINT(false); }";
    let expected = r#"#include <string>
#include "builtins.hpp"

Nothing greet(String name) {
    Nothing tmp_1 = name.PRINT();
    tmp_1;
    return Nothing();
}

int main() {
    Int tmp_2 = Int(1);
    Int tmp_3 = Int(2);
    Bool tmp_4 = tmp_2.LT(tmp_3);
    if (tmp_4.val == true) {
        String tmp_5 = String("hi");
        Nothing tmp_6 = greet(tmp_5);
        tmp_6;
    } else {
        Bool tmp_7 = Bool(false);
        Nothing tmp_8 = tmp_7.PRINT();
        tmp_8;
    }
    return 0;
}
"#;

    assert_eq!(compile(source), expected);
}

#[test]
fn test_if_without_else_has_empty_alternative() {
    let output = compile("if (true) { PRINT(1); }");

    assert!(output.contains("    if (tmp_1.val == true) {\n"));
    assert!(output.contains("    } else {\n    }\n"));
}

#[test]
fn test_nested_block_and_assignment() {
    let expected = r#"#include <string>
#include "builtins.hpp"

int main() {
    Int tmp_1 = Int(1);
    Int x = tmp_1;
    {
        Int tmp_2 = Int(2);
        x = tmp_2;
    }
    return 0;
}
"#;

    assert_eq!(compile("let x = 1;\n{ x = 2; }"), expected);
}

#[test]
fn test_dead_code_after_return_is_dropped() {
    let output = compile("func one() Int {\n    return 1;\n    PRINT(2);\n}");

    assert!(output.contains("Int one() {\n    Int tmp_1 = Int(1);\n    return tmp_1;\n}\n"));
    assert!(!output.contains("PRINT"));
}

#[test]
fn test_explicit_nothing_return_is_not_duplicated() {
    let output = compile("func quiet() Nothing {\n    return PRINT(1);\n}");

    assert!(!output.contains("return Nothing();"));
    assert!(output.contains("    Nothing tmp_2 = tmp_1.PRINT();\n    return tmp_2;\n"));
}

#[test]
fn test_string_concatenation() {
    let output = compile("let x = \"hello\";\nlet y = \"world!\";\nlet z = x + y;\nPRINT(z);");

    assert!(output.contains("    String tmp_3 = x.PLUS(y);\n    String z = tmp_3;\n"));
    assert!(output.contains("    Nothing tmp_4 = z.PRINT();\n"));
}

#[test]
fn test_locals_follow_the_function_being_lowered() {
    let output = compile("func a() Int { let x = 1; return x; }\nfunc b(x String) String { return x; }");

    assert!(output.contains("Int a() {\n    Int tmp_1 = Int(1);\n    Int x = tmp_1;\n    return x;\n}\n"));
    assert!(output.contains("String b(String x) {\n    return x;\n}\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let source = "func twice(n Int) Int { return n + n; }\nlet x = twice(21);\nPRINT(x);";

    let first = compile(source);
    let second = compile(source);
    assert_eq!(first, second);
    assert!(first.contains("tmp_1"));
}

#[test]
fn test_escape_string() {
    assert_eq!(escape_string("plain"), "plain");
    assert_eq!(escape_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
    assert_eq!(escape_string("back\\slash\ttab"), "back\\\\slash\\ttab");
    assert_eq!(escape_string("bell\x07 1"), "bell\\007 1");
    assert_eq!(escape_string("what??="), "what\\?\\?=");
}

#[test]
fn test_escaped_string_literal() {
    let output = compile("PRINT(\"a\\\"b\\n\");");

    assert!(output.contains("String tmp_1 = String(\"a\\\"b\\n\");"));
}

#[test]
fn test_unannotated_infix_is_a_fault() {
    let program = parse_source("5 + 5;");

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::UnresolvedInfix { operator: String::from("+") })
    );
}

#[test]
fn test_unannotated_call_is_a_fault() {
    let program = parse_source("PRINT(5);");

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::UnresolvedCall { function: String::from("PRINT") })
    );
}

#[test]
fn test_missing_signature_is_a_fault() {
    let mut program = parse_source("f();");
    if let Stmt::Expression(stmt) = &mut program.statements[0] {
        if let Expr::Call(call) = &mut stmt.expression {
            call.resolved = Some(ResolvedCall::Function);
        }
    }

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::MissingSignature { function: String::from("f") })
    );
}

#[test]
fn test_unknown_binding_is_a_fault() {
    let program = parse_source("x;");

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::MissingBinding { ident: String::from("x") })
    );
}

#[test]
fn test_builtin_named_function_is_a_fault() {
    let program = parse_source("func PRINT(x Int) { }");

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::BuiltinRedefinition { function: String::from("PRINT") })
    );
}

#[test]
fn test_operator_without_method_is_a_fault() {
    let mut program = parse_source("1 <= 2;");
    if let Stmt::Expression(stmt) = &mut program.statements[0] {
        if let Expr::Infix(infix) = &mut stmt.expression {
            infix.resolved_type = Some(crate::ast::types::Type::Int);
        }
    }

    assert_eq!(
        generate(&program, &Environment::new()),
        Err(CodegenFault::UnknownOperator { operator: String::from("<=") })
    );
}
