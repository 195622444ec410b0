use super::value::LoxValue;
use crate::lexer::Token;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("operand must be a number.")]
    NonNumeric(LoxValue),
    #[error("operands must be numbers.")]
    NonNumerics(LoxValue, LoxValue),
    #[error("operands must be numbers.")]
    NonAddable(LoxValue, LoxValue),
    #[error("undefined variable '{0}'.")]
    UndefinedVariable(CompactString),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// Operator or name token the fault is attributed to.
    pub token: Token,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::NonNumeric(_) => "RT001",
            RuntimeErrorKind::NonNumerics(_, _) => "RT002",
            RuntimeErrorKind::NonAddable(_, _) => "RT003",
            RuntimeErrorKind::UndefinedVariable(_) => "RT004",
        }
    }
}
