//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::ast::types::Type;
use crate::errors::errors::{CodegenFault, CompileError, Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(error: ErrorImpl, offset: u32) -> Error {
    Error::new(error, Position(offset, Rc::new("test.toy".to_string())))
}

#[test]
fn test_error_creation() {
    let error = at(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        10,
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.category(), ErrorCategory::Lexical);
}

#[test]
fn test_error_position() {
    let error = at(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        42,
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(*error.get_position().1, "test.toy");
}

#[test]
fn test_parse_errors_are_categorised() {
    let error = at(
        ErrorImpl::UnknownType {
            type_: "Float".to_string(),
        },
        0,
    );
    assert_eq!(error.category(), ErrorCategory::Parse);

    let error = at(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        0,
    );
    assert_eq!(error.category(), ErrorCategory::Parse);
}

#[test]
fn test_lexical_errors_are_categorised() {
    let error = at(
        ErrorImpl::InvalidEscape {
            escape: "\\xff".to_string(),
        },
        3,
    );

    assert_eq!(error.category(), ErrorCategory::Lexical);
    assert_eq!(error.get_error_name(), "InvalidEscape");
}

#[test]
fn test_semantic_errors_are_categorised() {
    let errors = vec![
        ErrorImpl::IdentAlreadyExists {
            ident: "x".to_string(),
        },
        ErrorImpl::IdentNotExist {
            ident: "x".to_string(),
        },
        ErrorImpl::IncompatibleTypes {
            left: Type::Int,
            right: Type::String,
        },
        ErrorImpl::ConditionNotBool {
            received: Type::Int,
        },
        ErrorImpl::ReturnOutsideFunction,
        ErrorImpl::ReservedIdentifier {
            ident: "tmp_1".to_string(),
        },
    ];

    for error in errors {
        assert_eq!(at(error, 0).category(), ErrorCategory::Semantic);
    }
}

#[test]
fn test_incompatible_types_error() {
    let error = at(
        ErrorImpl::IncompatibleTypes {
            left: Type::Int,
            right: Type::String,
        },
        3,
    );

    assert_eq!(error.get_error_name(), "IncompatibleTypes");
    assert_eq!(
        error.to_string(),
        "incompatible types for operation: Int and String"
    );
}

#[test]
fn test_method_not_exist_error() {
    let error = at(
        ErrorImpl::MethodNotExist {
            method: "AND".to_string(),
            type_: Type::Int,
        },
        0,
    );

    assert_eq!(error.get_error_name(), "MethodNotExist");
    assert_eq!(error.get_tip().to_string(), "Type `Int` has no method `AND`");
}

#[test]
fn test_incorrect_argument_type_reports_position() {
    let error = at(
        ErrorImpl::IncorrectArgumentType {
            position: 1,
            expected: Type::Int,
            received: Type::String,
        },
        0,
    );

    assert_eq!(error.get_error_name(), "IncorrectArgumentType");
    assert!(error.to_string().contains("argument 1"));
}

#[test]
fn test_error_tip_none() {
    let error = at(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        0,
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = at(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        0,
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_compile_error_wraps_both_sides() {
    let diagnostic: CompileError = at(ErrorImpl::ReturnOutsideFunction, 0).into();
    assert_eq!(
        diagnostic.to_string(),
        "return statement outside of function"
    );

    let internal: CompileError = CodegenFault::MissingBinding {
        ident: "x".to_string(),
    }
    .into();
    assert_eq!(
        internal.to_string(),
        "internal compiler error: no type recorded for binding `x`"
    );
}
