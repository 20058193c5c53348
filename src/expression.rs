use log::debug;

use crate::{
    Lexer,
    error::ExprError,
    eval::{Environment, evaluate},
    lex::{Token, TokenKind},
    postfix::to_postfix,
    validate::validate,
};

/// An infix expression together with its cached postfix form and the
/// variable bindings used to evaluate it.
///
/// Replacing the infix text drops the cached postfix form but keeps the
/// bindings, so one instance can evaluate many expressions. A failed call
/// leaves the instance as it was.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    infix: String,
    postfix: Option<String>,
    environment: Environment,
}

impl Expression {
    pub fn new(infix: impl Into<String>) -> Self {
        Expression {
            infix: infix.into(),
            postfix: None,
            environment: Environment::new(),
        }
    }

    pub fn set_expression(&mut self, infix: impl Into<String>) {
        self.infix = infix.into();
        self.postfix = None;
    }

    /// The infix text exactly as it was given.
    pub fn infix(&self) -> &str {
        &self.infix
    }

    pub fn tokenize(&self) -> Vec<Token<'_>> {
        Lexer::new(&self.infix).collect()
    }

    /// Distinct variable tokens, in order of first appearance.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in Lexer::new(&self.infix) {
            if token.kind == TokenKind::Variable && !names.contains(&token.literal) {
                names.push(token.literal);
            }
        }
        names
    }

    pub fn validate(&self) -> Result<bool, ExprError> {
        validate(&self.infix)?;
        Ok(true)
    }

    /// Returns the postfix form, converting and caching it on first use.
    pub fn postfix(&mut self) -> Result<&str, ExprError> {
        if self.postfix.is_none() {
            let tokens = validate(&self.infix)?;
            let postfix = to_postfix(&tokens)?;
            self.postfix = Some(postfix);
        }
        Ok(self.postfix.as_deref().unwrap_or_default())
    }

    pub fn bind_variable(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        debug!("bind {name} = {value}");
        self.environment.define(name, value);
    }

    pub fn variable(&self, name: &str) -> Result<f64, ExprError> {
        self.environment
            .get(name)
            .ok_or_else(|| ExprError::VariableNotFound {
                name: name.to_string(),
            })
    }

    pub fn variables(&self) -> &Environment {
        &self.environment
    }

    pub fn calculate(&mut self) -> Result<f64, ExprError> {
        self.postfix()?;
        let postfix = self.postfix.as_deref().unwrap_or_default();
        evaluate(postfix, &self.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infix_is_kept_verbatim() {
        let expr = Expression::new("  2 +   3 * 4 ");
        assert_eq!(expr.infix(), "  2 +   3 * 4 ");
        assert!(Expression::default().infix().is_empty());
    }

    #[test]
    fn set_expression_replaces_infix() {
        let mut expr = Expression::new("2 + 3");
        expr.set_expression("5 * 4");
        assert_eq!(expr.infix(), "5 * 4");
    }

    #[test]
    fn postfix_is_cached() {
        let mut expr = Expression::new("2 + 3 * 4");
        let first = expr.postfix().unwrap().to_string();
        let second = expr.postfix().unwrap().to_string();
        assert_eq!(first, second);
        assert_eq!(first, "2 3 4 * +");
    }

    #[test]
    fn set_expression_drops_cache() {
        let mut expr = Expression::new("2 + 3");
        assert_eq!(expr.postfix().unwrap(), "2 3 +");
        expr.set_expression("5 * 4");
        assert_eq!(expr.postfix().unwrap(), "5 4 *");
    }

    #[test]
    fn bindings_survive_set_expression() {
        let mut expr = Expression::default();
        expr.set_expression("a + b");
        expr.bind_variable("a", 2.0);
        expr.bind_variable("b", 3.0);
        assert_eq!(expr.calculate(), Ok(5.0));

        expr.set_expression("a * b - c");
        expr.bind_variable("c", 1.0);
        assert_eq!(expr.calculate(), Ok(5.0));
    }

    #[test]
    fn variable_lookup() {
        let mut expr = Expression::default();
        expr.bind_variable("x", 5.5);
        expr.bind_variable("x", 10.2);
        expr.bind_variable("y", 3.2);
        assert_eq!(expr.variable("x"), Ok(10.2));
        assert_eq!(expr.variable("y"), Ok(3.2));
        assert_eq!(
            expr.variable("undefined_var"),
            Err(ExprError::VariableNotFound {
                name: "undefined_var".into()
            })
        );
        assert_eq!(expr.variables().len(), 2);
    }

    #[test]
    fn variable_names_are_distinct() {
        let expr = Expression::new("(x + y) * x - w^2");
        assert_eq!(expr.variable_names(), ["x", "y", "w"]);
    }

    #[test]
    fn failed_postfix_leaves_state_alone() {
        let mut expr = Expression::new("2 + ");
        assert!(matches!(
            expr.postfix(),
            Err(ExprError::TrailingOperator { .. })
        ));
        assert_eq!(expr.infix(), "2 + ");
        expr.set_expression("2 + 1");
        assert_eq!(expr.postfix().unwrap(), "2 1 +");
    }

    #[test]
    fn calculate_reports_missing_binding() {
        let mut expr = Expression::new("x + 1");
        assert_eq!(
            expr.calculate(),
            Err(ExprError::UndefinedVariable { name: "x".into() })
        );
        expr.bind_variable("x", -3.0);
        assert_eq!(expr.calculate(), Ok(-2.0));
    }

    #[test]
    fn validate_reports_success() {
        assert_eq!(Expression::new("2 + 3").validate(), Ok(true));
        assert_eq!(
            Expression::new("").validate(),
            Err(ExprError::EmptyExpression)
        );
    }
}
