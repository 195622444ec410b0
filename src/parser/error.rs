use crate::lexer::Token;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expect variable name.")]
    MissingVariableName,
    #[error("Expect ';' after variable declaration.")]
    UnterminatedDeclaration,
    #[error("Expect ';' after value.")]
    UnterminatedPrint,
    #[error("Expect ';' after expression.")]
    UnterminatedExpression,
    #[error("Expect ')' after expression.")]
    UnclosedGroup,
    #[error("Expect '}}' after block.")]
    UnclosedBlock,
    #[error("Expect expression.")]
    NonExpression,
    #[error("Invalid assignment target.")]
    InvalidLValue,
    #[error("Too much nesting.")]
    TooDeep,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    /// The token the parser was looking at when it gave up.
    pub token: Token,
}

impl ParserError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::MissingVariableName => "PS001",
            ParserErrorKind::UnterminatedDeclaration => "PS002",
            ParserErrorKind::UnterminatedPrint => "PS003",
            ParserErrorKind::UnterminatedExpression => "PS004",
            ParserErrorKind::UnclosedGroup => "PS005",
            ParserErrorKind::UnclosedBlock => "PS006",
            ParserErrorKind::NonExpression => "PS007",
            ParserErrorKind::InvalidLValue => "PS008",
            ParserErrorKind::TooDeep => "PS009",
        }
    }
}
