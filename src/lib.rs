//! Infix arithmetic with variables, evaluated through a postfix form.
//!
//! The pipeline is tokenizer, validator, shunting-yard converter and
//! postfix evaluator. [`Expression`] drives it and caches the postfix text
//! until the infix text is replaced.

pub mod error;
pub mod eval;
pub mod expression;
pub mod lex;
pub mod op;
pub mod postfix;
pub mod repl;
pub mod stack;
pub mod validate;

pub use error::{ErrorKind, ExprError, StackError};
pub use eval::Environment;
pub use expression::Expression;
pub use lex::{Lexer, Token, TokenKind};
pub use stack::Stack;
