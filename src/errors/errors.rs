use std::{fmt::Display, process::ExitStatus};

use thiserror::Error;

use crate::{ast::types::Type, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::InvalidEscape { .. } => {
                ErrorCategory::Lexical
            }
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::UnknownType { .. } => ErrorCategory::Parse,
            _ => ErrorCategory::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::IdentAlreadyExists { .. } => "IdentAlreadyExists",
            ErrorImpl::IdentNotExist { .. } => "IdentNotExist",
            ErrorImpl::InvalidTypeAssignment { .. } => "InvalidTypeAssignment",
            ErrorImpl::IncompatibleTypes { .. } => "IncompatibleTypes",
            ErrorImpl::MethodNotExist { .. } => "MethodNotExist",
            ErrorImpl::ConditionNotBool { .. } => "ConditionNotBool",
            ErrorImpl::IncorrectReturnType { .. } => "IncorrectReturnType",
            ErrorImpl::FunctionNotExist { .. } => "FunctionNotExist",
            ErrorImpl::IncorrectArgumentCount { .. } => "IncorrectArgumentCount",
            ErrorImpl::IncorrectArgumentType { .. } => "IncorrectArgumentType",
            ErrorImpl::FunctionAlreadyExists { .. } => "FunctionAlreadyExists",
            ErrorImpl::ReservedFunctionName { .. } => "ReservedFunctionName",
            ErrorImpl::ReservedIdentifier { .. } => "ReservedIdentifier",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "`{}` is not a character, hex escapes stop at \\x7f",
                escape
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of Int, String, Bool, Nothing",
                type_
            )),
            ErrorImpl::IdentAlreadyExists { ident } => {
                ErrorTip::Suggestion(format!("Identifier `{}` is already declared", ident))
            }
            ErrorImpl::IdentNotExist { ident } => {
                ErrorTip::Suggestion(format!("Identifier `{}` is not declared here", ident))
            }
            ErrorImpl::InvalidTypeAssignment {
                ident,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` has type `{}`, cannot assign a value of type `{}`",
                ident, expected, received
            )),
            ErrorImpl::IncompatibleTypes { left, right } => ErrorTip::Suggestion(format!(
                "Both operands must have the same type, found `{}` and `{}`",
                left, right
            )),
            ErrorImpl::MethodNotExist { method, type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` has no method `{}`", type_, method))
            }
            ErrorImpl::ConditionNotBool { received } => ErrorTip::Suggestion(format!(
                "Condition must be `Bool`, received `{}`",
                received
            )),
            ErrorImpl::IncorrectReturnType {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` must return `{}`, found `{}`",
                function, expected, received
            )),
            ErrorImpl::FunctionNotExist { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is not declared before this call",
                function
            )),
            ErrorImpl::IncorrectArgumentCount { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::IncorrectArgumentType {
                position,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} should be `{}`, received `{}`",
                position, expected, received
            )),
            ErrorImpl::FunctionAlreadyExists { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::ReservedFunctionName { function } => ErrorTip::Suggestion(format!(
                "`{}` is a builtin and cannot be redefined",
                function
            )),
            ErrorImpl::ReservedIdentifier { ident } => ErrorTip::Suggestion(format!(
                "`{}` is used by the generated code, pick another name",
                ident
            )),
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` is only allowed inside a function"))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Parse,
    Semantic,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid escape in string: {escape:?}")]
    InvalidEscape { escape: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },

    #[error("identifier {ident:?} already exists")]
    IdentAlreadyExists { ident: String },
    #[error("identifier {ident:?} does not exist")]
    IdentNotExist { ident: String },
    #[error("invalid type assignment to {ident:?}: expected {expected}, received {received}")]
    InvalidTypeAssignment {
        ident: String,
        expected: Type,
        received: Type,
    },
    #[error("incompatible types for operation: {left} and {right}")]
    IncompatibleTypes { left: Type, right: Type },
    #[error("method {method} does not exist for type {type_}")]
    MethodNotExist { method: String, type_: Type },
    #[error("condition is not Bool, received {received}")]
    ConditionNotBool { received: Type },
    #[error("incorrect return type in {function:?}: expected {expected}, received {received}")]
    IncorrectReturnType {
        function: String,
        expected: Type,
        received: Type,
    },
    #[error("function {function:?} does not exist")]
    FunctionNotExist { function: String },
    #[error("incorrect argument count: expected {expected}, received {received}")]
    IncorrectArgumentCount { expected: usize, received: usize },
    #[error("incorrect type for argument {position}: expected {expected}, received {received}")]
    IncorrectArgumentType {
        position: usize,
        expected: Type,
        received: Type,
    },
    #[error("function {function:?} already declared")]
    FunctionAlreadyExists { function: String },
    #[error("function name {function:?} is reserved for a builtin")]
    ReservedFunctionName { function: String },
    #[error("identifier {ident:?} is reserved")]
    ReservedIdentifier { ident: String },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
}

/// Internal invariant violations found while lowering a checked program.
///
/// None of these can be produced by input that passed the type checker; seeing
/// one means the checker and the generator disagree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenFault {
    #[error("infix expression `{operator}` reached code generation without a resolved type")]
    UnresolvedInfix { operator: String },
    #[error("call to `{function}` reached code generation without a resolved target")]
    UnresolvedCall { function: String },
    #[error("operator `{operator}` has no builtin method")]
    UnknownOperator { operator: String },
    #[error("builtin method {method} does not exist for type {type_}")]
    MissingBuiltin { method: String, type_: Type },
    #[error("no signature recorded for function `{function}`")]
    MissingSignature { function: String },
    #[error("no type recorded for binding `{ident}`")]
    MissingBinding { ident: String },
    #[error("function `{function}` collides with a builtin name")]
    BuiltinRedefinition { function: String },
}

#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error(transparent)]
    Diagnostic(#[from] Error),
    #[error("internal compiler error: {0}")]
    Internal(#[from] CodegenFault),
}

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("C++ compilation failed ({status}):\n{stderr}")]
    CompilerFailed { status: ExitStatus, stderr: String },
    #[error("compiled program failed ({status}):\n{stderr}")]
    ProgramFailed { status: ExitStatus, stderr: String },
}
