use super::{
    environment::Environment,
    error::{RuntimeError, RuntimeErrorKind},
    value::LoxValue,
    SystemContext,
};
use crate::diagnostic::{Diagnostic, ErrorReporter};
use crate::lexer::Token;
use crate::parser::{
    expression::{BinaryOperator, Expression, ExpressionNode, ExpressionNodeRef, UnaryOperator},
    statement::{Declaration, NonDeclaration, Statement},
};
use log::debug;

/// Evaluates statements directly over the AST.
///
/// One interpreter owns one environment for its whole lifetime, so definitions made by
/// one `interpret` call stay visible to the next.
pub struct TreeWalkInterpreter<C: SystemContext> {
    environment: Environment,
    context: C,
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Runs statements in order until one faults.
    ///
    /// The fault is reported once and the remaining statements are skipped. Bindings
    /// made before the fault are kept. Returns whether a fault occurred.
    pub fn interpret<R: ErrorReporter>(
        &mut self,
        statements: &[Statement],
        reporter: &mut R,
    ) -> bool {
        debug!("Interpreting {} statements", statements.len());
        for statement in statements.iter() {
            if let Err(error) = self.execute(statement) {
                debug!("Aborting after runtime error {}", error.code());
                reporter.report(&Diagnostic::from(&error));
                return true;
            }
        }
        false
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Declaration(Declaration::Variable { name, initial }) => {
                let value = match initial {
                    Some(expr) => self.evaluate(expr)?,
                    None => LoxValue::Nil,
                };
                self.environment.define(&name.lexeme, value);
            }
            Statement::NonDeclaration(NonDeclaration::Expression(expr)) => {
                let _ = self.evaluate(expr)?;
            }
            Statement::NonDeclaration(NonDeclaration::Print(expr)) => {
                let value = self.evaluate(expr)?;
                self.context.write(&value.to_string());
            }
            Statement::NonDeclaration(NonDeclaration::Block(body)) => {
                debug!("Skipping block of {} statements", body.len());
            }
        }
        Ok(())
    }

    pub fn evaluate(&mut self, expr: &Expression) -> Result<LoxValue, RuntimeError> {
        self.evaluate_node(expr, &expr.get_root_ref())
    }
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    fn evaluate_node(
        &mut self,
        tree: &Expression,
        node: &ExpressionNodeRef,
    ) -> Result<LoxValue, RuntimeError> {
        let current_node = tree
            .get_node(node)
            .expect("Node ref came from the tree so it must exist.");

        let result = match current_node {
            ExpressionNode::Literal(atom) => LoxValue::from(atom),
            ExpressionNode::Group { inner } => self.evaluate_node(tree, inner)?,
            ExpressionNode::Unary {
                operator,
                token,
                rhs,
            } => {
                let rhs = self.evaluate_node(tree, rhs)?;
                Self::evaluate_unary(operator, &rhs).map_err(|kind| at(kind, token))?
            }
            ExpressionNode::Binary {
                operator,
                token,
                lhs,
                rhs,
            } => {
                let lhs = self.evaluate_node(tree, lhs)?;
                let rhs = self.evaluate_node(tree, rhs)?;
                Self::evaluate_binary(operator, &lhs, &rhs).map_err(|kind| at(kind, token))?
            }
            ExpressionNode::Variable(name) => self.environment.get(name)?,
            ExpressionNode::Assign { name, rhs } => {
                let value = self.evaluate_node(tree, rhs)?;
                self.environment.assign(name, value.clone())?;
                value
            }
        };
        Ok(result)
    }

    fn evaluate_unary(
        operator: &UnaryOperator,
        rhs: &LoxValue,
    ) -> Result<LoxValue, RuntimeErrorKind> {
        match operator {
            UnaryOperator::Bang => Ok(rhs.logical_not()),
            UnaryOperator::Minus => rhs.numeric_negate(),
        }
    }

    fn evaluate_binary(
        operator: &BinaryOperator,
        lhs: &LoxValue,
        rhs: &LoxValue,
    ) -> Result<LoxValue, RuntimeErrorKind> {
        match operator {
            BinaryOperator::Add => lhs.add(rhs),
            BinaryOperator::Subtract => lhs.subtract(rhs),
            BinaryOperator::Multiply => lhs.multiply(rhs),
            BinaryOperator::Divide => lhs.divide(rhs),
            BinaryOperator::LessThan => lhs.less_than(rhs),
            BinaryOperator::LessThanEqual => lhs.less_than_or_equal(rhs),
            BinaryOperator::GreaterThan => lhs.greater_than(rhs),
            BinaryOperator::GreaterThanEqual => lhs.greater_than_or_equal(rhs),
            BinaryOperator::EqualEqual => Ok(LoxValue::Bool(lhs.is_equal(rhs))),
            BinaryOperator::BangEqual => Ok(LoxValue::Bool(lhs.is_not_equal(rhs))),
        }
    }
}

fn at(kind: RuntimeErrorKind, token: &Token) -> RuntimeError {
    RuntimeError {
        kind,
        token: token.clone(),
    }
}
