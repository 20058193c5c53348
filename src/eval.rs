use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    error::ExprError,
    lex::{is_number, is_variable_char},
    op::Operator,
    stack::Stack,
};

/// Variable bindings, keyed by case-sensitive name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: HashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Binds `name`, replacing any earlier value.
    pub fn define(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Interprets whitespace separated postfix text against `env`.
pub fn evaluate(postfix: &str, env: &Environment) -> Result<f64, ExprError> {
    let mut operands: Stack<f64> = Stack::new(postfix.split_whitespace().count().max(1))?;

    for token in postfix.split_whitespace() {
        if is_number(token) {
            let value = token
                .parse()
                .map_err(|_| ExprError::InvalidExpression { remaining: operands.size() })?;
            operands.push(value);
        } else if token.starts_with(is_variable_char) {
            let value = env.get(token).ok_or_else(|| ExprError::UndefinedVariable {
                name: token.to_string(),
            })?;
            operands.push(value);
        } else {
            let op = Operator::from_symbol(token).ok_or_else(|| ExprError::UnknownOperator {
                symbol: token.to_string(),
            })?;
            if operands.size() < 2 {
                return Err(ExprError::InsufficientOperands {
                    operator: token.to_string(),
                });
            }
            let rhs = operands.pop()?;
            let lhs = operands.pop()?;
            let result = op.apply(lhs, rhs)?;
            trace!("{lhs} {op} {rhs} = {result}");
            operands.push(result);
        }
    }

    if operands.size() != 1 {
        return Err(ExprError::InvalidExpression {
            remaining: operands.size(),
        });
    }
    let result = operands.pop()?;
    debug!("`{postfix}` evaluates to {result}");
    Ok(result)
}
