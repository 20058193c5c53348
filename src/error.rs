use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Broad class of a failure, independent of which check raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Underflow,
    UndefinedVariable,
    DivisionByZero,
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("Stack capacity must be positive")]
    #[diagnostic(code(stack::invalid_capacity))]
    InvalidCapacity,

    #[error("Cannot {op} an empty stack")]
    #[diagnostic(code(stack::underflow))]
    Underflow { op: &'static str },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ExprError {
    #[error("Expression is empty")]
    #[diagnostic(code(expr::empty), help("type an expression such as `2 + 3 * 4`"))]
    EmptyExpression,

    #[error("No tokens found in expression")]
    #[diagnostic(code(expr::no_tokens))]
    NoTokens,

    #[error("Invalid character in variable name: {name}")]
    #[diagnostic(
        code(expr::invalid_character),
        help("variable names may only contain letters and `_`")
    )]
    InvalidCharacter {
        name: String,
        #[label("this token")]
        span: SourceSpan,
    },

    #[error("Unmatched closing bracket at position {position}")]
    #[diagnostic(code(expr::unmatched_closing_bracket))]
    UnmatchedClosingBracket {
        position: usize,
        #[label("nothing to close here")]
        span: SourceSpan,
    },

    #[error("Unmatched opening bracket")]
    #[diagnostic(code(expr::unmatched_opening_bracket), help("add the missing `)`"))]
    UnmatchedOpeningBracket {
        #[label("never closed")]
        span: SourceSpan,
    },

    #[error("Two operators in a row {first} {second}")]
    #[diagnostic(code(expr::consecutive_operators))]
    ConsecutiveOperators {
        first: String,
        second: String,
        #[label("second operator")]
        span: SourceSpan,
    },

    #[error("Missing operator between: {lhs} and {rhs}")]
    #[diagnostic(code(expr::missing_operator), help("implicit multiplication is not supported"))]
    MissingOperator {
        lhs: String,
        rhs: String,
        #[label("expected an operator before this")]
        span: SourceSpan,
    },

    #[error("Missing operator before opening bracket after: {operand}")]
    #[diagnostic(code(expr::missing_operator), help("implicit multiplication is not supported"))]
    MissingOperatorBeforeBracket {
        operand: String,
        #[label("expected an operator before this")]
        span: SourceSpan,
    },

    #[error("Missing operand before closing bracket after operator: {operator}")]
    #[diagnostic(code(expr::missing_operand))]
    MissingOperand {
        operator: String,
        #[label("operator has no right-hand side")]
        span: SourceSpan,
    },

    #[error("Expression cannot start with operator: {operator}")]
    #[diagnostic(code(expr::leading_operator), help("only `-` may start an expression"))]
    LeadingOperator {
        operator: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Expression cannot end with operator: {operator}")]
    #[diagnostic(code(expr::trailing_operator))]
    TrailingOperator {
        operator: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Unknown operator: {symbol}")]
    #[diagnostic(code(expr::unknown_operator))]
    UnknownOperator { symbol: String },

    #[error("Not enough operands for operator: {operator}")]
    #[diagnostic(code(expr::insufficient_operands))]
    InsufficientOperands { operator: String },

    #[error("Invalid expression")]
    #[diagnostic(
        code(expr::invalid),
        help("the postfix form must reduce to exactly one value")
    )]
    InvalidExpression { remaining: usize },

    #[error("Undefined variable: {name}")]
    #[diagnostic(code(expr::undefined_variable), help("bind a value for the variable first"))]
    UndefinedVariable { name: String },

    #[error("Variable '{name}' not found")]
    #[diagnostic(code(expr::variable_not_found))]
    VariableNotFound { name: String },

    #[error("Division by zero")]
    #[diagnostic(code(expr::division_by_zero))]
    DivisionByZero,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Stack(#[from] StackError),
}

impl ExprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::UndefinedVariable { .. } | ExprError::VariableNotFound { .. } => {
                ErrorKind::UndefinedVariable
            }
            ExprError::DivisionByZero => ErrorKind::DivisionByZero,
            ExprError::Stack(StackError::Underflow { .. }) => ErrorKind::Underflow,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Whether the failure was raised while checking the token sequence,
    /// as opposed to while evaluating it.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExprError::EmptyExpression
                | ExprError::NoTokens
                | ExprError::InvalidCharacter { .. }
                | ExprError::UnmatchedClosingBracket { .. }
                | ExprError::UnmatchedOpeningBracket { .. }
                | ExprError::ConsecutiveOperators { .. }
                | ExprError::MissingOperator { .. }
                | ExprError::MissingOperatorBeforeBracket { .. }
                | ExprError::MissingOperand { .. }
                | ExprError::LeadingOperator { .. }
                | ExprError::TrailingOperator { .. }
        )
    }
}
