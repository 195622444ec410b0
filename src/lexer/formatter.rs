use super::{LexicalError, Token};
use crate::diagnostic::Diagnostic;

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

/// `<KIND> <lexeme> <literal>` with `null` standing in for tokens without a literal.
pub struct BasicFormatter;

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        match token.literal {
            Some(ref literal) => format!("{} {} {literal}", token.kind, token.lexeme),
            None => format!("{} {} null", token.kind, token.lexeme),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        Diagnostic::from(error).to_string()
    }
}

pub struct DebugFormatter;

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}
