use crate::diagnostic::ErrorReporter;
use crate::interpreter::{SystemContext, TreeWalkInterpreter};
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("encountered errors while scanning")]
    Scan,
    #[error("encountered errors while parsing")]
    Parse,
    #[error("encountered runtime errors")]
    Runtime,
}

/// Runs source text through every phase against one long-lived interpreter.
///
/// Globals defined by one `run` are visible to later runs on the same session.
pub struct Session<C: SystemContext, R: ErrorReporter> {
    interpreter: TreeWalkInterpreter<C>,
    reporter: R,
}

impl<C, R> Session<C, R>
where
    C: SystemContext,
    R: ErrorReporter,
{
    pub fn new(context: C, reporter: R) -> Self {
        Self {
            interpreter: TreeWalkInterpreter::new(context),
            reporter,
        }
    }

    /// Scans, parses and interprets `source`.
    ///
    /// A phase that reports any error stops the pipeline before the next phase starts.
    pub fn run(&mut self, source: &str) -> Result<(), SessionError> {
        let (tokens, had_errors) = Lexer::new(source).scan(&mut self.reporter);
        if had_errors {
            debug!("Stopping after lexical errors");
            return Err(SessionError::Scan);
        }

        let (statements, had_errors) = Parser::new(tokens).parse(&mut self.reporter);
        if had_errors {
            debug!("Stopping after parse errors");
            return Err(SessionError::Parse);
        }

        if self.interpreter.interpret(&statements, &mut self.reporter) {
            return Err(SessionError::Runtime);
        }
        Ok(())
    }

    pub fn interpreter(&self) -> &TreeWalkInterpreter<C> {
        &self.interpreter
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn finish(self) -> (C, R) {
        (self.interpreter.into_context(), self.reporter)
    }
}
