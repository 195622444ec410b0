use crate::lexer::{Token, TokenKind};
use compact_str::CompactString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Bang,
    Minus,
}

impl UnaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(Self::Bang),
            TokenKind::Minus => Some(Self::Minus),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Bang => "!",
            Self::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Add,
    Subtract,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    EqualEqual,
    BangEqual,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(Self::Multiply),
            TokenKind::Slash => Some(Self::Divide),
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Subtract),
            TokenKind::LessThan => Some(Self::LessThan),
            TokenKind::LessThanEqual => Some(Self::LessThanEqual),
            TokenKind::GreaterThan => Some(Self::GreaterThan),
            TokenKind::GreaterThanEqual => Some(Self::GreaterThanEqual),
            TokenKind::EqualEqual => Some(Self::EqualEqual),
            TokenKind::BangEqual => Some(Self::BangEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionAtom {
    Number(f64),
    String(CompactString),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Literal(ExpressionAtom),
    Group {
        inner: ExpressionNodeRef,
    },
    Unary {
        operator: UnaryOperator,
        token: Token,
        rhs: ExpressionNodeRef,
    },
    Binary {
        operator: BinaryOperator,
        token: Token,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    Variable(Token),
    Assign {
        name: Token,
        rhs: ExpressionNodeRef,
    },
}

impl ExpressionNode {
    /// The assignable name, if this node is a bare variable reference.
    pub fn get_l_value(&self) -> Option<&Token> {
        match self {
            ExpressionNode::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = ExpressionNodeRef> {
        let (first, second) = match self {
            ExpressionNode::Literal(_) | ExpressionNode::Variable(_) => (None, None),
            ExpressionNode::Group { inner } => (Some(*inner), None),
            ExpressionNode::Unary { rhs, .. } | ExpressionNode::Assign { rhs, .. } => {
                (Some(*rhs), None)
            }
            ExpressionNode::Binary { lhs, rhs, .. } => (Some(*lhs), Some(*rhs)),
        };
        first.into_iter().chain(second)
    }
}

/// An expression arena still being built by the parser.
#[derive(Debug, Clone, Default)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
    /// Height of the subtree rooted at each node, leaves being 1.
    depths: Vec<u32>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        self.depths.push(self.subtree_depth(&node));
        self.nodes.push(node);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    pub fn depth(&self, node: &ExpressionNodeRef) -> Option<u32> {
        self.depths.get(node.0 as usize).copied()
    }

    fn subtree_depth(&self, node: &ExpressionNode) -> u32 {
        1 + node
            .children()
            .filter_map(|child| self.depth(&child))
            .max()
            .unwrap_or(0)
    }

    pub fn get_node(&self, node: &ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }

    /// Swaps the node stored at `at`, keeping every reference to it valid.
    pub fn replace(
        &mut self,
        at: &ExpressionNodeRef,
        node: ExpressionNode,
    ) -> Option<ExpressionNode> {
        let depth = self.subtree_depth(&node);
        let slot = self.nodes.get_mut(at.0 as usize)?;
        self.depths[at.0 as usize] = depth;
        Some(std::mem::replace(slot, node))
    }
}

/// A finished expression. Every node reference inside it points back into `nodes`,
/// and each node is referenced by at most one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn new(tree: IncompleteExpression, root: ExpressionNodeRef) -> Option<Self> {
        if !(0..tree.nodes.len()).contains(&(root.0 as usize)) {
            None
        } else {
            Some(Self {
                nodes: tree.nodes,
                root,
            })
        }
    }

    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_node(&self, node: &ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }
}
