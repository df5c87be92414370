//! Incremental builder for the immutable syntax tree.

use text_size::{TextRange, TextSize};

use crate::tree::{Child, NodeData, TokenData};
use crate::{NodeId, SyntaxError, SyntaxKind, SyntaxTree, TokenId};

/// Which open node an error is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorAnchor {
    /// The most recently started node that is still open.
    Innermost,
    /// The innermost open statement, declaration or directive, falling back to
    /// the innermost node.
    Statement,
}

/// Builds a `SyntaxTree` from a depth-first stream of start/token/finish calls.
pub struct Builder {
    text: Box<str>,
    offset: TextSize,
    nodes: Vec<NodeData>,
    children: Vec<Child>,
    tokens: Vec<TokenData>,
    errors: Vec<SyntaxError>,

    children_pool: Vec<Vec<Child>>,
    opened: Vec<(NodeId, Vec<Child>)>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 64;
const DEFAULT_TREE_SIZE: usize = 256;
const DEFAULT_CHILDREN_LEN: usize = 8;

impl Builder {
    /// Creates a builder for `text`, whose first byte sits at `offset` in the
    /// enclosing document.
    pub fn new(text: &str, offset: TextSize) -> Self {
        Self {
            text: text.into(),
            offset,
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens: Vec::with_capacity(DEFAULT_TREE_SIZE),
            errors: Vec::new(),

            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    fn position(&self) -> TextSize {
        self.offset + self.text_len
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let id = NodeId(self.nodes.len() as u32);
        let position = self.position();
        self.nodes.push(NodeData {
            kind,
            range: TextRange::empty(position),
            children_start: 0,
            children_len: 0,
        });

        match self.opened.last_mut() {
            Some((_, children)) => children.push(Child::Node(id)),
            None => assert!(id == NodeId::ROOT, "a tree has exactly one root"),
        }

        let children =
            self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN));
        self.opened.push((id, children));
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let (id, mut children) = self.opened.pop().expect("no opened nodes?");
        let end = self.position();
        let node = &mut self.nodes[id.index()];

        node.range = TextRange::new(node.range.start(), end);
        node.children_start = self.children.len() as u32;
        node.children_len = children.len() as u32;

        self.children.append(&mut children);
        self.children_pool.push(children);
    }

    /// Adds a token under the current node. Tokens must arrive contiguously.
    pub fn token(&mut self, kind: SyntaxKind, range: TextRange) {
        assert_eq!(range.start(), self.position(), "tokens must tile the text");

        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(TokenData { kind, range });
        self.text_len += range.len();
        assert!(self.text.is_char_boundary(usize::from(self.text_len)));

        let (_, children) = self.opened.last_mut().expect("token outside of a node");
        children.push(Child::Token(id));
    }

    /// Records an error against one of the currently open nodes.
    pub fn error(&mut self, message: impl Into<Box<str>>, range: TextRange, anchor: ErrorAnchor) {
        let innermost = self.opened.last().map_or(NodeId::ROOT, |(id, _)| *id);
        let node = match anchor {
            ErrorAnchor::Innermost => innermost,
            ErrorAnchor::Statement => self
                .opened
                .iter()
                .rev()
                .map(|(id, _)| *id)
                .find(|id| {
                    let kind = self.nodes[id.index()].kind;
                    kind.is_statement() || kind.is_declaration() || kind.is_template_action()
                })
                .unwrap_or(innermost),
        };

        self.errors.push(SyntaxError::new(message, range, node));
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty());
        assert!(!self.nodes.is_empty());
        assert_eq!(usize::from(self.text_len), self.text.len(), "tokens must cover the text");

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            offset: self.offset,
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            children: std::mem::take(&mut self.children).into_boxed_slice(),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            errors: std::mem::take(&mut self.errors).into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn node_ranges_follow_children() {
        let mut builder = Builder::new("a + b", 0.into());
        builder.start_node(SOURCE_FILE);
        builder.start_node(BINARY_EXPR);
        builder.start_node(NAME_REF);
        builder.token(IDENT, range(0, 1));
        builder.finish_node();
        builder.token(WHITESPACE, range(1, 2));
        builder.token(PLUS, range(2, 3));
        builder.token(WHITESPACE, range(3, 4));
        builder.start_node(NAME_REF);
        builder.token(IDENT, range(4, 5));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let root = tree.root();
        assert_eq!(root.range(), range(0, 5));
        let binary = root.children().next().unwrap();
        assert_eq!(binary.kind(), BINARY_EXPR);
        assert_eq!(binary.range(), range(0, 5));
        assert_eq!(binary.children().count(), 2);
        assert_eq!(binary.children().nth(1).unwrap().text(), "b");
    }

    #[test]
    fn offsets_are_absolute() {
        let mut builder = Builder::new("{{.X}}", 10.into());
        builder.start_node(TEMPLATE);
        builder.token(LEFT_DELIM, range(10, 12));
        builder.token(FIELD, range(12, 14));
        builder.token(RIGHT_DELIM, range(14, 16));
        builder.finish_node();
        let tree = builder.finish();

        assert_eq!(tree.range(), range(10, 16));
        let field = tree.root().children_with_tokens().nth(1).unwrap().into_token().unwrap();
        assert_eq!(field.text(), ".X");
    }

    #[test]
    fn errors_attach_to_statement() {
        let mut builder = Builder::new("\"a", 0.into());
        builder.start_node(SOURCE_FILE);
        builder.start_node(EXPR_STMT);
        builder.start_node(LITERAL);
        builder.error("unterminated string literal", range(0, 2), ErrorAnchor::Statement);
        builder.error("inner", range(0, 2), ErrorAnchor::Innermost);
        builder.token(UNTERMINATED_STRING, range(0, 2));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        assert_eq!(tree.node(tree.errors()[0].node()).kind(), EXPR_STMT);
        assert_eq!(tree.node(tree.errors()[1].node()).kind(), LITERAL);
    }

    #[test]
    fn empty_node_sits_between_tokens() {
        let mut builder = Builder::new("ab", 0.into());
        builder.start_node(SOURCE_FILE);
        builder.token(IDENT, range(0, 1));
        builder.start_node(ERROR);
        builder.finish_node();
        builder.token(IDENT, range(1, 2));
        builder.finish_node();
        let tree = builder.finish();

        let error = tree.root().children().next().unwrap();
        assert_eq!(error.range(), TextRange::empty(1.into()));
    }
}
