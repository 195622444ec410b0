pub mod error;
pub mod expression;
pub mod formatter;
pub mod statement;

use crate::diagnostic::{Diagnostic, ErrorReporter};
use crate::lexer::{Literal, Span, Token, TokenKind};
use error::{ParserError, ParserErrorKind};
use expression::{
    BinaryOperator, Expression, ExpressionAtom, ExpressionNode, ExpressionNodeRef,
    IncompleteExpression, UnaryOperator,
};
use log::debug;
use statement::{Declaration, NonDeclaration, Statement};

/// Deepest run of nested groups, unary operators, assignments and blocks.
const MAX_NESTING: usize = 128;
/// Tallest expression tree the parser will hand to the interpreter.
const MAX_EXPRESSION_DEPTH: u32 = 512;

type OperandParser =
    fn(&mut Parser, &mut IncompleteExpression) -> Result<ExpressionNodeRef, ParserError>;

/// Recursive descent parser over a scanned token sequence.
///
/// The cursor only moves forward and never steps past the trailing EOF token.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParserError>,
    nesting: usize,
    open_blocks: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (line, end) = tokens
                .last()
                .map(|t| (t.line, t.span.end().to_usize()))
                .unwrap_or((1, 0));
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: "".into(),
                literal: None,
                line,
                span: Span::new(end, end),
            });
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            nesting: 0,
            open_blocks: 0,
        }
    }

    /// Parses every declaration, reporting errors as they are found.
    ///
    /// A malformed declaration is dropped after its error is reported and parsing
    /// resumes at the next statement boundary, so the returned statements are every
    /// declaration that parsed cleanly.
    pub fn parse<R: ErrorReporter>(mut self, reporter: &mut R) -> (Vec<Statement>, bool) {
        let mut statements = Vec::new();
        let mut had_errors = false;

        while !self.is_at_end() {
            if let Some(statement) = self.parse_declaration_or_recover() {
                statements.push(statement);
            }
            for error in self.errors.drain(..) {
                reporter.report(&Diagnostic::from(&error));
                had_errors = true;
            }
        }

        debug!(
            "Parsed {} statements (errors: {had_errors})",
            statements.len()
        );
        (statements, had_errors)
    }
}

// Token cursor
impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat_if(&mut self, kind: TokenKind) -> Option<Token> {
        if !self.is_at_end() && self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(
        &mut self,
        expected: TokenKind,
        kind: ParserErrorKind,
    ) -> Result<Token, ParserError> {
        match self.eat_if(expected) {
            Some(token) => Ok(token),
            None => Err(ParserError {
                kind,
                token: self.peek().clone(),
            }),
        }
    }

    /// Discards tokens until just after a `;` or just before a statement keyword.
    /// Inside a block the closing `}` is never discarded.
    fn synchronize(&mut self) {
        let in_block = self.open_blocks > 0;
        if !(in_block && self.check(TokenKind::RightBrace)) {
            self.advance();
        }

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                break;
            }
            if self.peek().kind.starts_statement() {
                break;
            }
            if in_block && self.check(TokenKind::RightBrace) {
                break;
            }
            self.advance();
        }
        debug!("Resynchronized at line {}", self.peek().line);
    }

    /// Runs `parse` one nesting level deeper, failing at the current token past the limit.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParserError {
                kind: ParserErrorKind::TooDeep,
                token: self.peek().clone(),
            });
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    fn push_node(
        tree: &mut IncompleteExpression,
        node: ExpressionNode,
        token: &Token,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let node = tree.push(node);
        if tree.depth(&node).is_some_and(|depth| depth > MAX_EXPRESSION_DEPTH) {
            return Err(ParserError {
                kind: ParserErrorKind::TooDeep,
                token: token.clone(),
            });
        }
        Ok(node)
    }
}

// Statements
impl Parser {
    fn parse_declaration_or_recover(&mut self) -> Option<Statement> {
        match self.parse_declaration() {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            }
        }
    }

    fn parse_declaration(&mut self) -> Result<Statement, ParserError> {
        if self.eat_if(TokenKind::KeywordVar).is_some() {
            return self.parse_variable_declaration();
        }
        self.parse_statement()
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, ParserError> {
        let name = self.expect(TokenKind::Ident, ParserErrorKind::MissingVariableName)?;

        let initial = match self.eat_if(TokenKind::Equal) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };

        self.expect(
            TokenKind::Semicolon,
            ParserErrorKind::UnterminatedDeclaration,
        )?;
        Ok(Statement::Declaration(Declaration::Variable { name, initial }))
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        if self.eat_if(TokenKind::KeywordPrint).is_some() {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, ParserErrorKind::UnterminatedPrint)?;
            return Ok(Statement::NonDeclaration(NonDeclaration::Print(expr)));
        }

        if self.check(TokenKind::LeftBrace) {
            return self.nested(|parser| {
                parser.advance();
                parser.parse_block()
            });
        }

        let expr = self.parse_expression()?;
        self.expect(
            TokenKind::Semicolon,
            ParserErrorKind::UnterminatedExpression,
        )?;
        Ok(Statement::NonDeclaration(NonDeclaration::Expression(expr)))
    }

    fn parse_block(&mut self) -> Result<Statement, ParserError> {
        let mut body = Vec::new();
        self.open_blocks += 1;
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.parse_declaration_or_recover() {
                body.push(statement);
            }
        }
        self.open_blocks -= 1;
        self.expect(TokenKind::RightBrace, ParserErrorKind::UnclosedBlock)?;
        Ok(Statement::NonDeclaration(NonDeclaration::Block(body)))
    }
}

// Expressions, lowest precedence first
impl Parser {
    fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_assignment(&mut tree)?;
        Ok(Expression::new(tree, root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn parse_assignment(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let lhs = self.parse_equality(tree)?;

        if let Some(equals) = self.eat_if(TokenKind::Equal) {
            let rhs = self.nested(|parser| parser.parse_assignment(tree))?;

            let name = tree
                .get_node(&lhs)
                .and_then(ExpressionNode::get_l_value)
                .cloned();
            match name {
                Some(name) => {
                    let _ = tree.replace(&lhs, ExpressionNode::Assign { name, rhs });
                    if tree
                        .depth(&lhs)
                        .is_some_and(|depth| depth > MAX_EXPRESSION_DEPTH)
                    {
                        return Err(ParserError {
                            kind: ParserErrorKind::TooDeep,
                            token: equals,
                        });
                    }
                }
                // Reported, but the statement still parses with the left side alone.
                None => self.errors.push(ParserError {
                    kind: ParserErrorKind::InvalidLValue,
                    token: equals,
                }),
            }
        }

        Ok(lhs)
    }

    fn parse_binary_level(
        &mut self,
        tree: &mut IncompleteExpression,
        operators: &[TokenKind],
        operand: OperandParser,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = operand(self, tree)?;

        loop {
            let kind = self.peek().kind;
            if !operators.contains(&kind) {
                break;
            }
            let Some(operator) = BinaryOperator::from_token_kind(kind) else {
                break;
            };
            let token = self.advance();
            let rhs = operand(self, tree)?;
            let node = ExpressionNode::Binary {
                operator,
                token: token.clone(),
                lhs,
                rhs,
            };
            lhs = Self::push_node(tree, node, &token)?;
        }

        Ok(lhs)
    }

    fn parse_equality(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        self.parse_binary_level(
            tree,
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        self.parse_binary_level(
            tree,
            &[
                TokenKind::GreaterThan,
                TokenKind::GreaterThanEqual,
                TokenKind::LessThan,
                TokenKind::LessThanEqual,
            ],
            Self::parse_term,
        )
    }

    fn parse_term(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        self.parse_binary_level(
            tree,
            &[TokenKind::Minus, TokenKind::Plus],
            Self::parse_factor,
        )
    }

    fn parse_factor(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        self.parse_binary_level(
            tree,
            &[TokenKind::Slash, TokenKind::Star],
            Self::parse_unary,
        )
    }

    fn parse_unary(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        if let Some(operator) = UnaryOperator::from_token_kind(self.peek().kind) {
            let token = self.peek().clone();
            let rhs = self.nested(|parser| {
                parser.advance();
                parser.parse_unary(tree)
            })?;
            let node = ExpressionNode::Unary {
                operator,
                token: token.clone(),
                rhs,
            };
            return Self::push_node(tree, node, &token);
        }
        self.parse_primary(tree)
    }

    fn parse_primary(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.peek().clone();
        let atom = match token.kind {
            TokenKind::KeywordFalse => ExpressionAtom::Bool(false),
            TokenKind::KeywordTrue => ExpressionAtom::Bool(true),
            TokenKind::KeywordNil => ExpressionAtom::Nil,
            TokenKind::NumericLiteral | TokenKind::StringLiteral => match token.literal.clone() {
                Some(Literal::Number(v)) => ExpressionAtom::Number(v),
                Some(Literal::String(v)) => ExpressionAtom::String(v),
                None => {
                    return Err(ParserError {
                        kind: ParserErrorKind::NonExpression,
                        token,
                    })
                }
            },
            TokenKind::Ident => {
                self.advance();
                return Ok(tree.push(ExpressionNode::Variable(token)));
            }
            TokenKind::LeftParenthesis => {
                let inner = self.nested(|parser| {
                    parser.advance();
                    parser.parse_assignment(tree)
                })?;
                self.expect(TokenKind::RightParenthesis, ParserErrorKind::UnclosedGroup)?;
                return Self::push_node(tree, ExpressionNode::Group { inner }, &token);
            }
            _ => {
                return Err(ParserError {
                    kind: ParserErrorKind::NonExpression,
                    token,
                })
            }
        };
        self.advance();
        Ok(tree.push(ExpressionNode::Literal(atom)))
    }
}
