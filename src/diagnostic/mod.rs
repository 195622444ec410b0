pub mod pretty;

use crate::interpreter::error::RuntimeError;
use crate::lexer::{LexicalError, Span};
use crate::parser::error::ParserError;
use compact_str::CompactString;
use std::fmt::Display;

/// Where on the reported line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Unspecified,
    End,
    Lexeme(CompactString),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Unspecified => Ok(()),
            Location::End => write!(f, " at end"),
            Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    General,
    Lexical,
    Parse,
    Runtime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub line: u32,
    pub location: Location,
    pub message: String,
    pub span: Option<Span>,
    pub code: Option<&'static str>,
}

impl Diagnostic {
    pub fn general(line: u32, message: impl Into<String>) -> Self {
        Self {
            phase: Phase::General,
            line,
            location: Location::Unspecified,
            message: message.into(),
            span: None,
            code: None,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Phase::Runtime => write!(f, "{}\n[line {}]", self.message, self.line),
            Phase::General | Phase::Lexical | Phase::Parse => write!(
                f,
                "[line {}] Error{}: {}",
                self.line, self.location, self.message
            ),
        }
    }
}

impl From<&LexicalError> for Diagnostic {
    fn from(error: &LexicalError) -> Self {
        Self {
            phase: Phase::Lexical,
            line: error.line,
            location: Location::Unspecified,
            message: error.kind.to_string(),
            span: Some(error.span),
            code: Some(error.code()),
        }
    }
}

impl From<&ParserError> for Diagnostic {
    fn from(error: &ParserError) -> Self {
        let location = if error.token.is_eof() {
            Location::End
        } else {
            Location::Lexeme(error.token.lexeme.clone())
        };
        Self {
            phase: Phase::Parse,
            line: error.token.line,
            location,
            message: error.kind.to_string(),
            span: Some(error.token.span),
            code: Some(error.code()),
        }
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(error: &RuntimeError) -> Self {
        Self {
            phase: Phase::Runtime,
            line: error.token.line,
            location: Location::Lexeme(error.token.lexeme.clone()),
            message: error.kind.to_string(),
            span: Some(error.token.span),
            code: Some(error.code()),
        }
    }
}

/// Sink for diagnostics produced by every phase of the pipeline.
pub trait ErrorReporter {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic)
    }
}

pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        eprintln!("{diagnostic}");
    }
}

/// Keeps every diagnostic in memory; each one renders as a newline-terminated entry.
#[derive(Debug, Default)]
pub struct BufferedReporter {
    diagnostics: Vec<Diagnostic>,
}

impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_data(self) -> String {
        let mut buffer = String::new();
        for diagnostic in self.diagnostics.iter() {
            buffer.push_str(&diagnostic.to_string());
            buffer.push('\n');
        }
        buffer
    }
}

impl ErrorReporter for BufferedReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}
