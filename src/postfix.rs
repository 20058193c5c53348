use log::debug;

use crate::{
    error::ExprError,
    lex::{Token, TokenKind},
    op::priority,
    stack::Stack,
};

/// Rewrites a validated infix token sequence into space separated postfix
/// text. Operators of equal priority leave the stack before the incoming
/// one is pushed, which makes them left associative.
pub fn to_postfix(tokens: &[Token<'_>]) -> Result<String, ExprError> {
    let mut stack: Stack<&str> = Stack::new(tokens.len().max(1))?;
    let mut output: Vec<&str> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Variable => output.push(token.literal),
            TokenKind::Bracket if token.is_open() => stack.push(token.literal),
            TokenKind::Bracket => {
                while let Ok(&top) = stack.peek() {
                    if top == "(" {
                        break;
                    }
                    output.push(stack.pop()?);
                }
                // a missing `(` is tolerated here
                let _ = stack.pop();
            }
            TokenKind::Operator => {
                let incoming = operator_priority(token.literal)?;
                while let Ok(&top) = stack.peek() {
                    if top == "(" || operator_priority(top)? < incoming {
                        break;
                    }
                    output.push(stack.pop()?);
                }
                stack.push(token.literal);
            }
        }
    }
    while let Ok(op) = stack.pop() {
        output.push(op);
    }

    let postfix = output.join(" ");
    debug!("postfix form: `{postfix}`");
    Ok(postfix)
}

fn operator_priority(symbol: &str) -> Result<u8, ExprError> {
    priority(symbol).ok_or_else(|| ExprError::UnknownOperator {
        symbol: symbol.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lexer;

    fn postfix(infix: &str) -> String {
        let tokens: Vec<_> = Lexer::new(infix).collect();
        to_postfix(&tokens).unwrap()
    }

    #[test]
    fn simple() {
        assert_eq!(postfix("a + b"), "a b +");
    }

    #[test]
    fn precedence() {
        assert_eq!(postfix("a + b * c"), "a b c * +");
        assert_eq!(postfix("2 * 3 ^ 2"), "2 3 2 ^ *");
    }

    #[test]
    fn left_associative() {
        assert_eq!(postfix("10 - 5 + 3"), "10 5 - 3 +");
        assert_eq!(postfix("12 / 3 * 2"), "12 3 / 2 *");
        assert_eq!(postfix("2 ^ 3 ^ 2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn brackets_override_precedence() {
        assert_eq!(postfix("(a + b) * c"), "a b + c *");
        assert_eq!(postfix("(x + y) * z - w^2"), "x y + z * w 2 ^ -");
        assert_eq!(postfix("((1 + 2))"), "1 2 +");
    }

    #[test]
    fn signed_operands_pass_through() {
        assert_eq!(postfix("(-3 + 5) * 2"), "-3 5 + 2 *");
        assert_eq!(postfix("x ^ -2"), "x -2 ^");
    }

    #[test]
    fn stray_closing_bracket_is_tolerated() {
        assert_eq!(postfix("1 + 2)"), "1 2 +");
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_postfix(&[]).unwrap(), "");
    }

    #[test]
    fn unknown_operator_symbol() {
        let tokens = [
            Token {
                kind: TokenKind::Number,
                literal: "1",
                offset: 0,
            },
            Token {
                kind: TokenKind::Operator,
                literal: "%",
                offset: 1,
            },
        ];
        assert_eq!(
            to_postfix(&tokens),
            Err(ExprError::UnknownOperator {
                symbol: "%".into()
            })
        );
    }
}
