use std::fmt;
use std::ops::Range;

use text_size::{TextRange, TextSize};

use crate::{SyntaxKind, SyntaxNode};

/// Index of a node inside its tree. The root is always `NodeId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// Index of a token inside its tree, in source order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub(crate) u32);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Node(NodeId),
    Token(TokenId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
}

impl NodeData {
    pub(crate) fn children(&self) -> Range<usize> {
        let start = self.children_start as usize;
        start..start + self.children_len as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
}

/// A recovered failure, attached to the node that was open when it was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxError {
    message: Box<str>,
    range: TextRange,
    node: NodeId,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<Box<str>>, range: TextRange, node: NodeId) -> Self {
        Self { message: message.into(), range, node }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Owned syntax tree for one parse invocation.
///
/// Offsets are absolute: a tree built for a sub-range of a larger document
/// keeps that document's coordinates, and `text` holds only the covered slice.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) offset: TextSize,
    pub(crate) nodes: Box<[NodeData]>,
    pub(crate) children: Box<[Child]>,
    pub(crate) tokens: Box<[TokenData]>,
    pub(crate) errors: Box<[SyntaxError]>,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self, NodeId::ROOT)
    }

    /// Returns the source text covered by this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute range covered by this tree.
    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(&*self.text))
    }

    /// Every error recorded while building, in source order of discovery.
    #[inline]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode::new(self, id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn slice(&self, range: TextRange) -> &str {
        let range = range - self.offset;
        &self.text[range]
    }

    /// Renders the tree as an indented `KIND@start..end` listing followed by
    /// its errors.
    pub fn debug_dump(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let mut depth = 0usize;

        for event in self.root().preorder_with_tokens() {
            match event {
                crate::WalkEventWithTokens::EnterNode(node) => {
                    let range = node.range();
                    _ = writeln!(
                        out,
                        "{:indent$}{:?}@{}..{}",
                        "",
                        node.kind(),
                        u32::from(range.start()),
                        u32::from(range.end()),
                        indent = depth * 2
                    );
                    depth += 1;
                }
                crate::WalkEventWithTokens::LeaveNode(_) => depth -= 1,
                crate::WalkEventWithTokens::Token(token) => {
                    let range = token.range();
                    _ = writeln!(
                        out,
                        "{:indent$}{:?}@{}..{} {:?}",
                        "",
                        token.kind(),
                        u32::from(range.start()),
                        u32::from(range.end()),
                        token.text(),
                        indent = depth * 2
                    );
                }
            }
        }

        for error in self.errors() {
            let range = error.range();
            _ = writeln!(
                out,
                "error@{}..{} in {:?}: {}",
                u32::from(range.start()),
                u32::from(range.end()),
                self.node(error.node()).kind(),
                error.message()
            );
        }

        out
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("range", &self.range())
            .field("nodes", &self.nodes.len())
            .field("tokens", &self.tokens.len())
            .field("errors", &self.errors.len())
            .finish()
    }
}
