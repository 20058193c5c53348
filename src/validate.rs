use log::debug;

use crate::{
    Lexer,
    error::ExprError,
    lex::{Token, TokenKind, is_variable_char},
    stack::Stack,
};

/// Tokenizes `infix` and checks that the token sequence is well formed.
///
/// Checks run token by token from the left, so the reported error is the
/// earliest violation in the text. The validated tokens are returned for
/// the caller to reuse.
pub fn validate(infix: &str) -> Result<Vec<Token<'_>>, ExprError> {
    if infix.is_empty() {
        return Err(ExprError::EmptyExpression);
    }
    let tokens: Vec<Token<'_>> = Lexer::new(infix).collect();
    if tokens.is_empty() {
        return Err(ExprError::NoTokens);
    }

    let mut brackets = Stack::new(tokens.len())?;
    let mut last: Option<&Token<'_>> = None;

    for (position, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Variable && !token.literal.chars().all(is_variable_char) {
            return Err(ExprError::InvalidCharacter {
                name: token.literal.to_string(),
                span: token.span(),
            });
        }

        if token.is_open() {
            brackets.push(position);
        } else if token.is_close() {
            if brackets.is_empty() {
                return Err(ExprError::UnmatchedClosingBracket {
                    position,
                    span: token.span(),
                });
            }
            brackets.pop()?;
        }

        match last {
            Some(prev) => check_pair(prev, token)?,
            None if token.kind == TokenKind::Operator && token.literal != "-" => {
                return Err(ExprError::LeadingOperator {
                    operator: token.literal.to_string(),
                    span: token.span(),
                });
            }
            None => {}
        }
        last = Some(token);
    }

    if let Ok(&open) = brackets.peek() {
        return Err(ExprError::UnmatchedOpeningBracket {
            span: tokens[open].span(),
        });
    }

    if let Some(token) = last.filter(|token| token.kind == TokenKind::Operator) {
        return Err(ExprError::TrailingOperator {
            operator: token.literal.to_string(),
            span: token.span(),
        });
    }

    debug!("validated {} tokens of `{infix}`", tokens.len());
    Ok(tokens)
}

fn check_pair(prev: &Token<'_>, token: &Token<'_>) -> Result<(), ExprError> {
    if prev.kind == TokenKind::Operator
        && token.kind == TokenKind::Operator
        && token.literal != "-"
    {
        return Err(ExprError::ConsecutiveOperators {
            first: prev.literal.to_string(),
            second: token.literal.to_string(),
            span: token.span(),
        });
    }
    if prev.is_operand() && token.is_operand() {
        return Err(ExprError::MissingOperator {
            lhs: prev.literal.to_string(),
            rhs: token.literal.to_string(),
            span: token.span(),
        });
    }
    if prev.is_operand() && token.is_open() {
        return Err(ExprError::MissingOperatorBeforeBracket {
            operand: prev.literal.to_string(),
            span: token.span(),
        });
    }
    if prev.kind == TokenKind::Operator && token.is_close() {
        return Err(ExprError::MissingOperand {
            operator: prev.literal.to_string(),
            span: prev.span(),
        });
    }
    Ok(())
}
