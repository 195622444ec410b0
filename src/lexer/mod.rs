mod error;
pub mod formatter;
mod token;

use crate::diagnostic::{Diagnostic, ErrorReporter};
pub use error::{LexicalError, LexicalErrorKind};
use log::{debug, trace};
pub use token::{Literal, Span, SpanIndex, SpanLength, Token, TokenKind, KEYWORD_HASHMAP};

/// Single-pass scanner over a source string.
///
/// `start` marks the beginning of the lexeme being scanned and `current` the next
/// unread byte. Lines are counted from 1 and advance on every newline, including
/// newlines inside string literals.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, reporting each lexical error as it is found.
    ///
    /// Returns every token that could be produced, terminated by exactly one EOF token,
    /// and whether any lexical error was reported.
    pub fn scan<R: ErrorReporter>(mut self, reporter: &mut R) -> (Vec<Token>, bool) {
        let mut tokens = Vec::new();
        let mut had_errors = false;
        loop {
            match self.next_token() {
                Ok(token) => {
                    let is_eof = token.is_eof();
                    tokens.push(token);
                    if is_eof {
                        break;
                    }
                }
                Err(error) => {
                    reporter.report(&Diagnostic::from(&error));
                    had_errors = true;
                }
            }
        }
        debug!(
            "Scanned {} tokens over {} lines (errors: {had_errors})",
            tokens.len(),
            self.line
        );
        (tokens, had_errors)
    }

    /// Produces the next token. Once the source is exhausted every call yields EOF.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            self.start = self.current;
            let Some(c) = self.advance() else {
                return Ok(self.make_token(TokenKind::Eof, None));
            };

            let kind = match c {
                '(' => TokenKind::LeftParenthesis,
                ')' => TokenKind::RightParenthesis,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                '-' => TokenKind::Minus,
                '+' => TokenKind::Plus,
                ';' => TokenKind::Semicolon,
                '*' => TokenKind::Star,
                '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
                '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
                '<' => self.either('=', TokenKind::LessThanEqual, TokenKind::LessThan),
                '>' => self.either('=', TokenKind::GreaterThanEqual, TokenKind::GreaterThan),
                '/' => {
                    if self.eat('/') {
                        while self.peek().is_some_and(|c| c != '\n') {
                            self.advance();
                        }
                        continue;
                    }
                    TokenKind::Slash
                }
                '\n' => {
                    self.line += 1;
                    continue;
                }
                ' ' | '\r' | '\t' => continue,
                '"' => return self.lex_string(),
                '0'..='9' => return self.lex_number(),
                'a'..='z' | 'A'..='Z' | '_' => return Ok(self.lex_ident_or_keyword()),
                c => {
                    return Err(LexicalError {
                        kind: LexicalErrorKind::Unrecognized(c),
                        line: self.line,
                        span: self.current_span(),
                    })
                }
            };
            return Ok(self.make_token(kind, None));
        }
    }
}

impl<'src> Lexer<'src> {
    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn either(&mut self, next: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.eat(next) {
            matched
        } else {
            otherwise
        }
    }

    fn current_span(&self) -> Span {
        Span::new(self.start, self.current)
    }

    fn make_token(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        let token = Token {
            kind,
            lexeme: self.source[self.start..self.current].into(),
            literal,
            line: self.line,
            span: self.current_span(),
        };
        trace!("{} {:?} on line {}", token.kind, token.lexeme, token.line);
        token
    }

    fn lex_string(&mut self) -> Result<Token, LexicalError> {
        let start_line = self.line;
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if !self.eat('"') {
            return Err(LexicalError {
                kind: LexicalErrorKind::UnclosedString,
                line: start_line,
                span: self.current_span(),
            });
        }

        let value = &self.source[self.start + 1..self.current - 1];
        let mut token =
            self.make_token(TokenKind::StringLiteral, Some(Literal::String(value.into())));
        // Multi-line strings belong to the line they started on.
        token.line = start_line;
        Ok(token)
    }

    fn lex_number(&mut self) -> Result<Token, LexicalError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = &self.source[self.start..self.current];
        let value: f64 = lexeme.parse().map_err(|_| LexicalError {
            kind: LexicalErrorKind::MalformedNumber,
            line: self.line,
            span: self.current_span(),
        })?;
        Ok(self.make_token(TokenKind::NumericLiteral, Some(Literal::Number(value))))
    }

    fn lex_ident_or_keyword(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let lexeme = &self.source[self.start..self.current];
        let kind = KEYWORD_HASHMAP
            .get(lexeme)
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.make_token(kind, None)
    }
}
