//! Immutable, lossless syntax tree shared by the Go and template grammars.
//!
//! A tree is stored as flat arenas of nodes and tokens. Nodes never point back
//! at their parents; ancestry is answered by a [`ParentMap`] computed from the
//! root when a consumer needs it.

/// Typed wrappers around raw syntax nodes.
pub mod ast;
mod builder;
mod parents;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod tree;

/// Event sink used by the parsers to assemble a `SyntaxTree`.
pub use builder::{Builder, ErrorAnchor};
/// Ancestry queries over a finished tree.
pub use parents::ParentMap;
/// Node and token handles borrowed from a tree.
pub use syntax::{
    NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement, SyntaxNode, SyntaxToken,
    TokenAtOffset, Walk, WalkEvent, WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextLen, TextRange, TextSize};
/// Owned tree storage.
pub use tree::{NodeId, SyntaxError, SyntaxTree, TokenId};
