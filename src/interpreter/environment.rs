use super::{
    error::{RuntimeError, RuntimeErrorKind},
    value::LoxValue,
};
use crate::lexer::Token;
use compact_str::CompactString;
use std::collections::HashMap;

/// The single flat namespace of an interpreter. There is no enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<CompactString, LoxValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, overwriting any previous binding.
    pub fn define(&mut self, name: &str, value: LoxValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<LoxValue, RuntimeError> {
        self.values
            .get(name.lexeme.as_str())
            .cloned()
            .ok_or_else(|| Self::undefined(name))
    }

    pub fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError> {
        match self.values.get_mut(name.lexeme.as_str()) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Self::undefined(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn undefined(name: &Token) -> RuntimeError {
        RuntimeError {
            kind: RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
            token: name.clone(),
        }
    }
}
