use std::fmt::Display;

use crate::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
}

/// Higher binds tighter. Brackets sit at 0 and are never compared as
/// operators.
const PRIORITY: &[(&str, u8)] = &[
    ("+", 1),
    ("-", 1),
    ("*", 2),
    ("/", 2),
    ("^", 3),
    ("(", 0),
    (")", 0),
];

pub fn priority(symbol: &str) -> Option<u8> {
    PRIORITY
        .iter()
        .find(|(candidate, _)| *candidate == symbol)
        .map(|&(_, priority)| priority)
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Operator::Plus,
            "-" => Operator::Minus,
            "*" => Operator::Star,
            "/" => Operator::Slash,
            "^" => Operator::Caret,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Caret => "^",
        }
    }

    pub fn priority(self) -> u8 {
        priority(self.symbol()).unwrap_or_default()
    }

    /// `lhs` is the operand that was pushed first.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, ExprError> {
        Ok(match self {
            Operator::Plus => lhs + rhs,
            Operator::Minus => lhs - rhs,
            Operator::Star => lhs * rhs,
            Operator::Slash => {
                if rhs == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                lhs / rhs
            }
            Operator::Caret => lhs.powf(rhs),
        })
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
