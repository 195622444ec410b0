use super::expression::Expression;
use crate::lexer::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    NonDeclaration(NonDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable {
        name: Token,
        initial: Option<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NonDeclaration {
    Expression(Expression),
    Print(Expression),
    Block(Vec<Statement>),
}
