use super::token::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("unexpected character {0}")]
    Unrecognized(char),
    #[error("unterminated string")]
    UnclosedString,
    #[error("unable to parse number")]
    MalformedNumber,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    /// Line the offending lexeme started on.
    pub line: u32,
    pub span: Span,
}

impl LexicalError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexicalErrorKind::Unrecognized(_) => "LX001",
            LexicalErrorKind::UnclosedString => "LX002",
            LexicalErrorKind::MalformedNumber => "LX003",
        }
    }
}
