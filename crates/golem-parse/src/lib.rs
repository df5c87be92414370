//! Error-tolerant parsers for Go source files and Go template directives.
//!
//! Both entry points always return a tree covering the whole input. Problems
//! are recorded as errors on the tree rather than reported as failures.

use golem_syntax::{SyntaxError, SyntaxNode, SyntaxTree, TextRange, TextSize};
use golem_tokenizer::{Delimiters, HostLanguage, TemplateTokenizer};

mod grammar;
mod parser;

/// Outcome of one parse: the tree and the errors recorded on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    tree: SyntaxTree,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        self.tree.errors()
    }

    pub fn has_errors(&self) -> bool {
        !self.tree.errors().is_empty()
    }

    /// Length of the parsed text.
    pub fn text_len(&self) -> TextSize {
        self.tree.range().len()
    }

    pub fn debug_dump(&self) -> String {
        self.tree.debug_dump()
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }
}

/// Parses a complete Go source file.
pub fn parse_source(text: &str) -> Parse {
    tracing::debug!(len = text.len(), "parsing Go source");

    let range = TextRange::up_to(TextSize::of(text));
    let tokens = golem_tokenizer::tokenize(text);
    let mut p = parser::Parser::new(text, range, tokens, golem_syntax::SyntaxKind::is_trivia);
    grammar::go::items::source_file(&mut p);

    let tree = p.build_tree();
    tracing::debug!(errors = tree.errors().len(), "parsed Go source");
    Parse { tree }
}

/// Parses the template text in `range` of `text`.
///
/// Offsets in the resulting tree are relative to `text`, so a directive
/// region cut out of a larger document keeps that document's coordinates.
pub fn parse_template(
    text: &str,
    range: TextRange,
    delimiters: &Delimiters,
    host: HostLanguage,
) -> Parse {
    tracing::debug!(?range, %host, "parsing template");

    let tokens = TemplateTokenizer::with_range(text, range, delimiters, host).collect();
    let mut p = parser::Parser::new(text, range, tokens, grammar::template::is_trivia);
    grammar::template::template(&mut p, delimiters);

    Parse { tree: p.build_tree() }
}
