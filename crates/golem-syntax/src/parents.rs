use crate::{NodeId, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree, TokenId};

/// Parent links for every node and token of one tree, computed in a single
/// preorder pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentMap {
    nodes: Box<[Option<NodeId>]>,
    tokens: Box<[NodeId]>,
}

impl ParentMap {
    pub fn new(tree: &SyntaxTree) -> Self {
        let mut nodes = vec![None; tree.node_count()];
        let mut tokens = vec![NodeId::ROOT; tree.token_count()];

        for node in tree.root().descendants() {
            for child in node.children_with_tokens() {
                match child {
                    crate::NodeOrToken::Node(child) => nodes[child.id().index()] = Some(node.id()),
                    crate::NodeOrToken::Token(token) => tokens[token.id().index()] = node.id(),
                }
            }
        }

        Self { nodes: nodes.into_boxed_slice(), tokens: tokens.into_boxed_slice() }
    }

    /// Parent of `node`, or `None` for the root.
    pub fn parent<'a>(&self, node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        let parent = self.nodes[node.id().index()]?;
        Some(node.tree().node(parent))
    }

    pub fn parent_id(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()]
    }

    /// Node that directly owns `token`.
    pub fn token_parent<'a>(&self, tree: &'a SyntaxTree, token: SyntaxToken<'_>) -> SyntaxNode<'a> {
        tree.node(self.token_parent_id(token.id()))
    }

    pub fn token_parent_id(&self, token: TokenId) -> NodeId {
        self.tokens[token.index()]
    }

    /// Walks from `node` (inclusive) up to the root.
    pub fn ancestors<'a, 'm>(
        &'m self,
        node: SyntaxNode<'a>,
    ) -> impl Iterator<Item = SyntaxNode<'a>> {
        std::iter::successors(Some(node), move |&node| self.parent(node))
    }

    /// Closest ancestor (inclusive) of the given kind.
    pub fn ancestor_of_kind<'a>(
        &self,
        node: SyntaxNode<'a>,
        kind: SyntaxKind,
    ) -> Option<SyntaxNode<'a>> {
        self.ancestors(node).find(|ancestor| ancestor.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Builder, TextRange};

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn ancestors_reach_the_root() {
        let mut builder = Builder::new("-x", 0.into());
        builder.start_node(SOURCE_FILE);
        builder.start_node(UNARY_EXPR);
        builder.token(MINUS, range(0, 1));
        builder.start_node(NAME_REF);
        builder.token(IDENT, range(1, 2));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();
        let parents = ParentMap::new(&tree);

        let name = tree.root().descendants().last().unwrap();
        assert_eq!(name.kind(), NAME_REF);
        let kinds = parents.ancestors(name).map(SyntaxNode::kind).collect::<Vec<_>>();
        assert_eq!(kinds, [NAME_REF, UNARY_EXPR, SOURCE_FILE]);
        assert_eq!(parents.parent(tree.root()), None);
        let unary = parents.ancestor_of_kind(name, UNARY_EXPR);
        assert_eq!(unary.map(SyntaxNode::kind), Some(UNARY_EXPR));

        let minus = tree.root().descendant_tokens().next().unwrap();
        assert_eq!(parents.token_parent(&tree, minus).kind(), UNARY_EXPR);
    }
}
