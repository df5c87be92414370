//! Public syntax tree API: lightweight handles borrowed from a `SyntaxTree`.

use std::fmt;

use text_size::{TextRange, TextSize};

use crate::tree::{Child, NodeData, TokenData};
use crate::{NodeId, SyntaxError, SyntaxKind, SyntaxTree, TokenId};

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    id: TokenId,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> &'a TokenData {
        &self.tree.tokens[self.id.index()]
    }

    #[inline]
    pub fn id(self) -> TokenId {
        self.id
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    #[inline]
    pub fn range(self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn text(self) -> &'a str {
        self.tree.slice(self.range())
    }

    /// Returns the previous token in source order, if any.
    #[inline]
    pub fn prev_token(self) -> Option<Self> {
        let index = self.id.0.checked_sub(1)?;
        Some(Self { tree: self.tree, id: TokenId(index) })
    }

    /// Returns the next token in source order, if any.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        let index = self.id.0 + 1;
        ((index as usize) < self.tree.tokens.len())
            .then_some(Self { tree: self.tree, id: TokenId(index) })
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.range(), self.text())
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub(crate) fn new(tree: &'a SyntaxTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn data(self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()]
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the range covered by this node, trivia included.
    #[inline]
    pub fn range(self) -> TextRange {
        self.data().range
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        self.tree.slice(self.range())
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn trimmed_range(self) -> TextRange {
        let mut tokens = self.descendant_tokens().filter(|token| !token.is_trivia());
        match tokens.next() {
            Some(first) => {
                let last = tokens.last().unwrap_or(first);
                TextRange::new(first.range().start(), last.range().end())
            }
            None => TextRange::empty(self.range().start()),
        }
    }

    /// Returns the text slice excluding leading/trailing trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        self.tree.slice(self.trimmed_range())
    }

    /// Iterates direct children, tokens included.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        let children = self.tree.children[self.data().children()].iter();
        ChildrenWithTokens { tree: self.tree, children }
    }

    /// Iterates direct child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> impl DoubleEndedIterator<Item = SyntaxNode<'a>> + Clone + 'a {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    /// Iterates direct child tokens, skipping nodes.
    #[inline]
    pub fn child_tokens(self) -> impl DoubleEndedIterator<Item = SyntaxToken<'a>> + Clone + 'a {
        self.children_with_tokens().filter_map(NodeOrToken::into_token)
    }

    /// Direct children of `kind`.
    pub fn children_of_kind(
        self,
        kind: SyntaxKind,
    ) -> impl DoubleEndedIterator<Item = SyntaxNode<'a>> + Clone + 'a {
        self.children().filter(move |child| child.kind() == kind)
    }

    pub fn first_child_of_kind(self, kind: SyntaxKind) -> Option<SyntaxNode<'a>> {
        self.children_of_kind(kind).next()
    }

    pub fn first_token_of_kind(self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    /// All nodes below this one (itself included) in preorder.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    /// All tokens below this node in source order.
    pub fn descendant_tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEventWithTokens::Token(token) => Some(token),
            _ => None,
        })
    }

    /// Errors attached directly to this node.
    pub fn errors(self) -> impl Iterator<Item = &'a SyntaxError> + 'a {
        let id = self.id;
        self.tree.errors().iter().filter(move |error| error.node() == id)
    }

    /// Errors attached to this node or any node below it.
    pub fn subtree_errors(self) -> impl Iterator<Item = &'a SyntaxError> + 'a {
        let ids = self.descendants().map(SyntaxNode::id).collect::<Vec<_>>();
        self.tree.errors().iter().filter(move |error| ids.contains(&error.node()))
    }

    pub fn has_errors(self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns the token at the given offset, if any.
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a>> {
        let range = self.range();
        if !range.contains_inclusive(offset) {
            return TokenAtOffset::None;
        }

        let mut left = None;
        for token in self.descendant_tokens() {
            let token_range = token.range();
            if token_range.is_empty() {
                continue;
            }
            if token_range.contains(offset) {
                return match left {
                    Some(left) if token_range.start() == offset => {
                        TokenAtOffset::Between(left, token)
                    }
                    _ => TokenAtOffset::Single(token),
                };
            }
            if token_range.end() == offset {
                left = Some(token);
            } else if token_range.start() > offset {
                break;
            }
        }

        match left {
            Some(token) => TokenAtOffset::Single(token),
            None => TokenAtOffset::None,
        }
    }

    /// Returns the smallest element that fully covers `range`.
    pub fn covering_element(self, range: TextRange) -> SyntaxElement<'a> {
        let mut node = self;
        'descend: loop {
            for child in node.children_with_tokens() {
                let child_range = child.range();
                let skips_empty = child_range.is_empty() && !range.is_empty();
                if child_range.contains_range(range) && !skips_empty {
                    match child {
                        NodeOrToken::Node(child) => {
                            node = child;
                            continue 'descend;
                        }
                        NodeOrToken::Token(token) => return NodeOrToken::Token(token),
                    }
                }
            }
            return NodeOrToken::Node(node);
        }
    }

    /// Returns a preorder iterator over nodes.
    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    /// Returns a preorder iterator over nodes and tokens.
    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens::new(self)
    }

    /// Visits every node below this one in preorder, letting the callback
    /// prune subtrees or stop the walk.
    pub fn walk(self, mut visit: impl FnMut(SyntaxNode<'a>) -> Walk) {
        let mut preorder = self.preorder();
        while let Some(event) = preorder.next() {
            let WalkEvent::Enter(node) = event else { continue };
            match visit(node) {
                Walk::Continue => {}
                Walk::SkipChildren => preorder.skip_subtree(),
                Walk::Stop => return,
            }
        }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

/// What a [`SyntaxNode::walk`] callback wants to happen next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    Continue,
    SkipChildren,
    Stop,
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.range(),
            NodeOrToken::Token(token) => token.range(),
        }
    }
}

/// Iterator over direct children including tokens.
#[derive(Clone)]
pub struct ChildrenWithTokens<'a> {
    tree: &'a SyntaxTree,
    children: std::slice::Iter<'a, Child>,
}

impl<'a> ChildrenWithTokens<'a> {
    #[inline]
    fn map_child(&self, child: &Child) -> SyntaxElement<'a> {
        match *child {
            Child::Node(id) => NodeOrToken::Node(SyntaxNode { tree: self.tree, id }),
            Child::Token(id) => NodeOrToken::Token(SyntaxToken { tree: self.tree, id }),
        }
    }
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next()?;
        Some(self.map_child(child))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl DoubleEndedIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let child = self.children.next_back()?;
        Some(self.map_child(child))
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl<'a> Preorder<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }

    /// Skips the subtree of the most recently entered node.
    #[inline]
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Copy, Debug)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

/// Preorder traversal over nodes and tokens, driven by an explicit stack.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl<'a> PreorderWithTokens<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }

    /// Skips the subtree of the most recently entered node.
    #[inline]
    pub fn skip_subtree(&mut self) {
        if let Some((node, children)) = self.stack.last_mut() {
            let empty: &'a [Child] = &[];
            *children = ChildrenWithTokens { tree: node.tree, children: empty.iter() };
        }
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy, Debug)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    /// Maps tokens to a different type.
    pub fn map<F: Fn(T) -> U, U>(self, f: F) -> TokenAtOffset<U> {
        match self {
            TokenAtOffset::None => TokenAtOffset::None,
            TokenAtOffset::Single(it) => TokenAtOffset::Single(f(it)),
            TokenAtOffset::Between(l, r) => TokenAtOffset::Between(f(l), f(r)),
        }
    }

    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, _) => Some(left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builder;
    use crate::SyntaxKind::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    // SOURCE_FILE(CALL_EXPR(NAME_REF(f) ARG_LIST('(' NAME_REF(x) ')')) ' ')
    fn call_tree() -> SyntaxTree {
        let mut builder = Builder::new("f(x) ", 0.into());
        builder.start_node(SOURCE_FILE);
        builder.start_node(CALL_EXPR);
        builder.start_node(NAME_REF);
        builder.token(IDENT, range(0, 1));
        builder.finish_node();
        builder.start_node(ARG_LIST);
        builder.token(LEFT_PAREN, range(1, 2));
        builder.start_node(NAME_REF);
        builder.token(IDENT, range(2, 3));
        builder.finish_node();
        builder.token(RIGHT_PAREN, range(3, 4));
        builder.finish_node();
        builder.finish_node();
        builder.token(WHITESPACE, range(4, 5));
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn preorder_visits_every_node_once() {
        let tree = call_tree();
        let kinds = tree.root().descendants().map(SyntaxNode::kind).collect::<Vec<_>>();
        assert_eq!(kinds, [SOURCE_FILE, CALL_EXPR, NAME_REF, ARG_LIST, NAME_REF]);
    }

    #[test]
    fn walk_can_skip_subtrees() {
        let tree = call_tree();
        let mut seen = Vec::new();
        tree.root().walk(|node| {
            seen.push(node.kind());
            if node.kind() == ARG_LIST { Walk::SkipChildren } else { Walk::Continue }
        });
        assert_eq!(seen, [SOURCE_FILE, CALL_EXPR, NAME_REF, ARG_LIST]);
    }

    #[test]
    fn trimmed_range_drops_trivia() {
        let tree = call_tree();
        assert_eq!(tree.root().range(), range(0, 5));
        assert_eq!(tree.root().trimmed_range(), range(0, 4));
        assert_eq!(tree.root().text_trimmed(), "f(x)");
    }

    #[test]
    fn token_at_offset_between_tokens() {
        let tree = call_tree();
        match tree.root().token_at_offset(1.into()) {
            TokenAtOffset::Between(left, right) => {
                assert_eq!(left.text(), "f");
                assert_eq!(right.text(), "(");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tree.root().token_at_offset(2.into()).right_biased().unwrap().text(), "x");
    }

    #[test]
    fn covering_element_finds_smallest() {
        let tree = call_tree();
        let element = tree.root().covering_element(range(1, 4));
        assert_eq!(element.kind(), ARG_LIST);
        let element = tree.root().covering_element(range(2, 3));
        assert_eq!(element.kind(), IDENT);
    }

    #[test]
    fn dump_lists_tokens() {
        let tree = call_tree();
        let dump = tree.debug_dump();
        assert!(dump.starts_with("SOURCE_FILE@0..5\n  CALL_EXPR@0..4\n"));
        assert!(dump.contains("      IDENT@2..3 \"x\"\n"));
    }
}
