use super::error::RuntimeErrorKind;
use crate::parser::expression::ExpressionAtom;
use compact_str::{CompactString, CompactStringExt};

/// A runtime value. Values compare structurally and never coerce between types.
#[derive(Debug, Clone, PartialEq)]
pub enum LoxValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(CompactString),
}

impl std::fmt::Display for LoxValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<&ExpressionAtom> for LoxValue {
    fn from(atom: &ExpressionAtom) -> Self {
        match atom {
            ExpressionAtom::Number(v) => LoxValue::Number(*v),
            ExpressionAtom::String(v) => LoxValue::String(v.clone()),
            ExpressionAtom::Bool(v) => LoxValue::Bool(*v),
            ExpressionAtom::Nil => LoxValue::Nil,
        }
    }
}

// Unary operators
impl LoxValue {
    /// `nil` and `false` are falsy; everything else, including `0` and `""`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, LoxValue::Nil | LoxValue::Bool(false))
    }

    pub fn logical_not(&self) -> LoxValue {
        LoxValue::Bool(!self.is_truthy())
    }

    pub fn numeric_negate(&self) -> Result<LoxValue, RuntimeErrorKind> {
        match self {
            LoxValue::Number(v) => Ok(LoxValue::Number(-v)),
            v => Err(RuntimeErrorKind::NonNumeric(v.clone())),
        }
    }
}

// Binary operators
impl LoxValue {
    fn numeric_operands(&self, other: &LoxValue) -> Result<(f64, f64), RuntimeErrorKind> {
        match (self, other) {
            (LoxValue::Number(lhs), LoxValue::Number(rhs)) => Ok((*lhs, *rhs)),
            (lhs, rhs) => Err(RuntimeErrorKind::NonNumerics(lhs.clone(), rhs.clone())),
        }
    }

    /// Numeric addition or string concatenation. Mixed operands are rejected.
    pub fn add(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        match (self, other) {
            (LoxValue::Number(lhs), LoxValue::Number(rhs)) => Ok(LoxValue::Number(lhs + rhs)),
            (LoxValue::String(lhs), LoxValue::String(rhs)) => {
                Ok(LoxValue::String([lhs, rhs].concat_compact()))
            }
            (lhs, rhs) => Err(RuntimeErrorKind::NonAddable(lhs.clone(), rhs.clone())),
        }
    }

    pub fn subtract(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Number(lhs - rhs))
    }

    pub fn multiply(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Number(lhs * rhs))
    }

    pub fn divide(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Number(lhs / rhs))
    }

    pub fn less_than(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Bool(lhs < rhs))
    }

    pub fn less_than_or_equal(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Bool(lhs <= rhs))
    }

    pub fn greater_than(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Bool(lhs > rhs))
    }

    pub fn greater_than_or_equal(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other)?;
        Ok(LoxValue::Bool(lhs >= rhs))
    }

    // Equality
    pub fn is_equal(&self, other: &LoxValue) -> bool {
        self == other
    }

    pub fn is_not_equal(&self, other: &LoxValue) -> bool {
        !self.is_equal(other)
    }
}
