use crate::{
    ast::{
        ast::Stmt,
        statements::{AssignStmt, BlockStmt, ExpressionStmt, FunctionStmt, IfStmt, InitStmt, Parameter, ReturnStmt},
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    match parser.current_token_kind() {
        TokenKind::Func => {
            return Err(parser.unexpected("functions can only be declared at the top level"));
        }
        TokenKind::Identifier if parser.peek_kind() == TokenKind::Assignment => {
            return parse_assign_stmt(parser);
        }
        _ => {}
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: expr.get_span().clone(),
        expression: expr,
    }))
}

pub fn parse_init_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Init(InitStmt {
        span: Span {
            start,
            end: parser.previous_end()
        },
        identifier,
        value,
    }))
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target_token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assign(AssignStmt {
        span: Span {
            start: target_token.span.start,
            end: parser.previous_end()
        },
        target: target_token.value,
        value,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let consequent = parse_block(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        if parser.current_token_kind() == TokenKind::If {
            // `else if` is sugar for an else block holding the nested if.
            let nested = parse_if_stmt(parser)?;
            BlockStmt {
                span: nested.get_span().clone(),
                body: vec![nested],
            }
        } else {
            parse_block(parser)?
        }
    } else {
        let here = parser.previous_end();
        BlockStmt::empty(Span {
            start: here.clone(),
            end: here
        })
    };

    Ok(Stmt::If(IfStmt {
        condition,
        consequent,
        alternative,
        span: Span {
            start,
            end: parser.previous_end()
        }
    }))
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}` to close the block"));
        }

        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: Span {
            start,
            end: parser.previous_end()
        }
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `func name(a Int, b String) Int { ... }`
///
/// The return type may be left out, in which case it is `Nothing`.
pub fn parse_function_stmt(parser: &mut Parser) -> Result<FunctionStmt, Error> {
    let start = parser.expect(TokenKind::Func)?.span.start;

    let error = parser.unexpected("expected function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name = parser.expect(TokenKind::Identifier)?.value;
        let type_ = parse_type(parser)?;
        parameters.push(Parameter { name, type_ });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in parameter list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::OpenCurly {
        Type::Nothing
    } else {
        parse_type(parser)?
    };

    let body = parse_block(parser)?;

    Ok(FunctionStmt {
        span: Span {
            start,
            end: parser.previous_end()
        },
        name,
        parameters,
        return_type,
        body,
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    if parser.current_token_kind() == TokenKind::Semicolon {
        return Err(parser.unexpected("expected a value after `return`"));
    }

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: parser.previous_end()
        }
    }))
}
