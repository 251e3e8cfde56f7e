use std::fmt::Display;

use crate::Span;

use super::{
    ast::Expr,
    types::{Method, Type},
};

// LITERALS

/// Integer Expression
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i64,
    pub span: Span,
}

/// String Expression
///
/// `value` holds the unescaped contents, without the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// Boolean Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Identifier Expression
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Infix operators accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl Operator {
    /// The builtin method an operator dispatches to.
    ///
    /// `<=`, `>=` and `!=` are part of the grammar but have no runtime method.
    pub fn method(&self) -> Option<Method> {
        match self {
            Operator::Plus => Some(Method::Plus),
            Operator::Minus => Some(Method::Minus),
            Operator::Times => Some(Method::Times),
            Operator::Less => Some(Method::Lt),
            Operator::Greater => Some(Method::Gt),
            Operator::Equals => Some(Method::Equal),
            Operator::And => Some(Method::And),
            Operator::Or => Some(Method::Or),
            Operator::LessEquals | Operator::GreaterEquals | Operator::NotEquals => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Less => "<",
            Operator::LessEquals => "<=",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Infix Expression
///
/// `resolved_type` is the common operand type, filled in by the type checker.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    pub resolved_type: Option<Type>,
    pub span: Span,
}

/// How the type checker resolved a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedCall {
    /// A builtin invoked as a method on its only argument, whose type is
    /// `receiver`.
    Builtin { method: Method, receiver: Type },
    /// A call to a user declared function.
    Function,
}

/// Call Expression
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub resolved: Option<ResolvedCall>,
    pub span: Span,
}
