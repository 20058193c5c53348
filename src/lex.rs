use std::fmt::Display;

use miette::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
    /// Byte offset of `literal` in the whole expression.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Variable,
    Operator,
    Bracket,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.offset..self.offset + self.literal.len())
    }

    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Number | TokenKind::Variable)
    }

    pub fn is_open(&self) -> bool {
        self.kind == TokenKind::Bracket && self.literal == "("
    }

    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::Bracket && self.literal == ")"
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::Number => write!(f, "NUMBER {lit}"),
            TokenKind::Variable => write!(f, "VARIABLE {lit}"),
            TokenKind::Operator => write!(f, "OPERATOR {lit}"),
            TokenKind::Bracket => write!(f, "BRACKET {lit}"),
        }
    }
}

pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

pub fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')')
}

pub fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// An optional leading `-` followed by digits with at most one `.`.
pub fn is_number(literal: &str) -> bool {
    let digits = match literal.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => rest,
        _ => literal,
    };
    let mut dotted = false;
    let mut digit = false;
    for c in digits.chars() {
        match c {
            '.' if dotted => return false,
            '.' => dotted = true,
            '0'..='9' => digit = true,
            _ => return false,
        }
    }
    digit
}

/// Splits an infix expression into classified tokens.
///
/// A `-` that opens the expression, or directly follows `(` or another
/// operator, is a sign rather than an operator: it becomes the first
/// character of the adjoining number or variable token.
pub struct Lexer<'de> {
    whole: &'de str,
    rest: &'de str,
    byte: usize,
    last: Option<Token<'de>>,
}

impl<'de> Lexer<'de> {
    pub fn new(input: &'de str) -> Self {
        Lexer {
            whole: input,
            rest: input,
            byte: 0,
            last: None,
        }
    }

    fn sign_position(&self) -> bool {
        match self.last {
            None => true,
            Some(token) => token.is_open() || token.kind == TokenKind::Operator,
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'de> {
        let token = Token {
            kind,
            literal: &self.rest[..len],
            offset: self.byte,
        };
        self.rest = &self.rest[len..];
        self.byte += len;
        self.last = Some(token);
        token
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Token<'de>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start();
        self.byte += self.rest.len() - trimmed.len();
        self.rest = trimmed;

        let c = self.rest.chars().next()?;

        let signed = c == '-' && self.sign_position();
        if !signed && is_bracket(c) {
            return Some(self.emit(TokenKind::Bracket, c.len_utf8()));
        }
        if !signed && is_operator(c) {
            return Some(self.emit(TokenKind::Operator, c.len_utf8()));
        }

        // the first character is always part of the run, even a sign
        let end = self.rest[c.len_utf8()..]
            .find(|c: char| c.is_whitespace() || is_operator(c) || is_bracket(c))
            .map_or(self.rest.len(), |at| at + c.len_utf8());

        let kind = if is_number(&self.rest[..end]) {
            TokenKind::Number
        } else {
            TokenKind::Variable
        };
        Some(self.emit(kind, end))
    }
}
