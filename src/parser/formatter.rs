use super::expression::{Expression, ExpressionAtom, ExpressionNode, ExpressionNodeRef};
use super::statement::{Declaration, NonDeclaration, Statement};

pub trait ExpressionFormatter {
    fn format(&self, tree: &Expression) -> String;
    fn format_statement(&self, statement: &Statement) -> String;
}

pub struct DebugExpressionFormatter;

impl ExpressionFormatter for DebugExpressionFormatter {
    fn format(&self, tree: &Expression) -> String {
        format!("{tree:?}")
    }

    fn format_statement(&self, statement: &Statement) -> String {
        format!("{statement:?}")
    }
}

/// Prints the AST as fully parenthesized prefix expressions, e.g. `(+ 1.0 (* 2.0 3.0))`.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_atom(atom: &ExpressionAtom) -> String {
        match atom {
            ExpressionAtom::Number(v) => format!("{v:?}"),
            ExpressionAtom::String(v) => format!("{v}"),
            ExpressionAtom::Bool(v) => format!("{v}"),
            ExpressionAtom::Nil => "nil".into(),
        }
    }

    fn format_node(tree: &Expression, node: &ExpressionNodeRef) -> String {
        let Some(current_node) = tree.get_node(node) else {
            return "<dangling>".into();
        };

        match current_node {
            ExpressionNode::Literal(atom) => Self::format_atom(atom),
            ExpressionNode::Group { inner } => {
                format!("(group {})", Self::format_node(tree, inner))
            }
            ExpressionNode::Unary { operator, rhs, .. } => {
                format!("({} {})", operator.symbol(), Self::format_node(tree, rhs))
            }
            ExpressionNode::Binary {
                operator, lhs, rhs, ..
            } => format!(
                "({} {} {})",
                operator.symbol(),
                Self::format_node(tree, lhs),
                Self::format_node(tree, rhs),
            ),
            ExpressionNode::Variable(name) => format!("{}", name.lexeme),
            ExpressionNode::Assign { name, rhs } => {
                format!("(= {} {})", name.lexeme, Self::format_node(tree, rhs))
            }
        }
    }
}

impl ExpressionFormatter for SExpressionFormatter {
    fn format(&self, tree: &Expression) -> String {
        Self::format_node(tree, &tree.get_root_ref())
    }

    fn format_statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Declaration(Declaration::Variable { name, initial }) => match initial {
                Some(expr) => format!("(var {} {})", name.lexeme, self.format(expr)),
                None => format!("(var {})", name.lexeme),
            },
            Statement::NonDeclaration(NonDeclaration::Expression(expr)) => self.format(expr),
            Statement::NonDeclaration(NonDeclaration::Print(expr)) => {
                format!("(print {})", self.format(expr))
            }
            Statement::NonDeclaration(NonDeclaration::Block(body)) => {
                let mut buffer = String::from("(block");
                for statement in body.iter() {
                    buffer.push(' ');
                    buffer.push_str(&self.format_statement(statement));
                }
                buffer.push(')');
                buffer
            }
        }
    }
}
