use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::Type,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    /// An empty block, used for a missing `else` branch.
    pub fn empty(span: Span) -> Self {
        BlockStmt { body: vec![], span }
    }

    /// Statements up to and including the first direct `return`.
    ///
    /// Anything after it is dead code that the type checker never visits.
    pub fn reachable(&self) -> &[Stmt] {
        match self.body.iter().position(|stmt| matches!(stmt, Stmt::Return(_))) {
            Some(index) => &self.body[..=index],
            None => &self.body,
        }
    }

    pub fn has_direct_return(&self) -> bool {
        self.body.iter().any(|stmt| matches!(stmt, Stmt::Return(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `let identifier = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct InitStmt {
    pub identifier: String,
    pub value: Expr,
    pub span: Span,
}

/// `target = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub consequent: BlockStmt,
    pub alternative: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}
