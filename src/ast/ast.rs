use crate::Span;

use super::{
    expressions::{BooleanExpr, CallExpr, IdentifierExpr, InfixExpr, IntegerExpr, StringExpr},
    statements::{AssignStmt, BlockStmt, ExpressionStmt, FunctionStmt, IfStmt, InitStmt, ReturnStmt},
};

/// Root of a compilation unit.
///
/// Function declarations are kept apart from the top-level statements; both
/// lists preserve source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<FunctionStmt>,
    pub statements: Vec<Stmt>,
}

/// Statements that may appear inside a block or at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Assign(AssignStmt),
    Init(InitStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Init(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Infix(InfixExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(expr) => &expr.span,
            Expr::Integer(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Infix(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}
