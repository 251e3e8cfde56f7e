use crate::{
    ast::{
        ast::Expr,
        expressions::{BooleanExpr, CallExpr, IdentifierExpr, InfixExpr, IntegerExpr, Operator, StringExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
        };

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let Ok(value) = parser.current_token().value.parse::<i64>() else {
                return Err(Error::new(ErrorImpl::NumberParseError { token: parser.current_token().value.clone() }, parser.get_position()));
            };

            Ok(Expr::Integer(IntegerExpr { value, span: parser.advance().span.clone() }))
        },
        TokenKind::Identifier => {
            Ok(Expr::Identifier(IdentifierExpr { value: parser.current_token().value.clone(), span: parser.advance().span.clone() }))
        },
        TokenKind::String => {
            Ok(Expr::String(StringExpr { value: parser.current_token().value.clone(), span: parser.advance().span.clone() }))
        },
        TokenKind::True | TokenKind::False => {
            let value = parser.current_token_kind() == TokenKind::True;
            Ok(Expr::Boolean(BooleanExpr { value, span: parser.advance().span.clone() }))
        },
        _ => {
            Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()))
        }
    }
}

fn operator_for(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Plus => Some(Operator::Plus),
        TokenKind::Dash => Some(Operator::Minus),
        TokenKind::Star => Some(Operator::Times),
        TokenKind::Less => Some(Operator::Less),
        TokenKind::LessEquals => Some(Operator::LessEquals),
        TokenKind::Greater => Some(Operator::Greater),
        TokenKind::GreaterEquals => Some(Operator::GreaterEquals),
        TokenKind::Equals => Some(Operator::Equals),
        TokenKind::NotEquals => Some(Operator::NotEquals),
        TokenKind::And => Some(Operator::And),
        TokenKind::Or => Some(Operator::Or),
        _ => None,
    }
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let Some(operator) = operator_for(parser.current_token_kind()) else {
        return Err(parser.unexpected("expected an infix operator"));
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone()
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
        resolved_type: None,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let Expr::Identifier(callee) = left else {
        return Err(parser.unexpected("only named functions can be called"));
    };
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in argument list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: parser.previous_end()
        },
        name: callee.value,
        arguments,
        resolved: None,
    }))
}
