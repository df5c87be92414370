use super::{AstNode, child, children, token};
use crate::SyntaxKind::*;
use crate::{SyntaxNode, SyntaxToken};

ast_node! {
    Template => TEMPLATE,
    TmplList => TMPL_LIST,
    Action => TMPL_ACTION,
    TmplIf => TMPL_IF,
    TmplRange => TMPL_RANGE,
    TmplWith => TMPL_WITH,
    TmplDefine => TMPL_DEFINE,
    TmplBlock => TMPL_BLOCK,
    TmplTemplate => TMPL_TEMPLATE,
    TmplElse => TMPL_ELSE,
    TmplEnd => TMPL_END,
    Pipeline => TMPL_PIPELINE,
    Declaration => TMPL_DECLARATION,
    Command => TMPL_COMMAND,
    FieldChain => TMPL_FIELD_CHAIN,
    Variable => TMPL_VARIABLE,
}

impl<'a> Template<'a> {
    /// Top-level directive nodes, skipping text.
    pub fn directives(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children()
    }
}

impl<'a> TmplList<'a> {
    pub fn directives(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children()
    }

    /// Literal text between the directives of this list.
    pub fn texts(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.0.child_tokens().filter(|token| token.kind() == TEXT)
    }
}

impl<'a> Action<'a> {
    pub fn pipeline(self) -> Option<Pipeline<'a>> {
        child(self.0)
    }
}

macro_rules! block_directive {
    ($($name:ident),*) => {$(
        impl<'a> $name<'a> {
            pub fn pipeline(self) -> Option<Pipeline<'a>> {
                child(self.0)
            }

            pub fn body(self) -> Option<TmplList<'a>> {
                child(self.0)
            }

            pub fn end(self) -> Option<TmplEnd<'a>> {
                child(self.0)
            }
        }
    )*};
}

block_directive!(TmplIf, TmplRange, TmplWith, TmplDefine, TmplBlock);

macro_rules! else_chain {
    ($($name:ident),*) => {$(
        impl<'a> $name<'a> {
            /// `else`, `else if` and `else with` branches in order.
            pub fn else_clauses(self) -> impl Iterator<Item = TmplElse<'a>> + 'a {
                children(self.0)
            }
        }
    )*};
}

else_chain!(TmplIf, TmplRange, TmplWith);

macro_rules! named_directive {
    ($($name:ident),*) => {$(
        impl<'a> $name<'a> {
            /// Template name as written, quotes included.
            pub fn name(self) -> Option<SyntaxToken<'a>> {
                token(self.0, STRING).or_else(|| token(self.0, RAW_STRING))
            }
        }
    )*};
}

named_directive!(TmplDefine, TmplBlock, TmplTemplate);

impl<'a> TmplTemplate<'a> {
    pub fn pipeline(self) -> Option<Pipeline<'a>> {
        child(self.0)
    }
}

impl<'a> TmplElse<'a> {
    /// `if` or `with` for chained branches.
    pub fn chained_keyword(self) -> Option<SyntaxToken<'a>> {
        token(self.0, IF_KW).or_else(|| token(self.0, WITH_KW))
    }

    pub fn pipeline(self) -> Option<Pipeline<'a>> {
        child(self.0)
    }

    pub fn body(self) -> Option<TmplList<'a>> {
        child(self.0)
    }
}

impl<'a> Pipeline<'a> {
    pub fn declaration(self) -> Option<Declaration<'a>> {
        child(self.0)
    }

    pub fn commands(self) -> impl Iterator<Item = Command<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Declaration<'a> {
    pub fn variables(self) -> impl Iterator<Item = Variable<'a>> + 'a {
        children(self.0)
    }

    /// `=` rather than `:=`.
    pub fn is_assignment(self) -> bool {
        token(self.0, EQ).is_some()
    }
}

impl<'a> Command<'a> {
    pub fn operands(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children()
    }
}

impl<'a> FieldChain<'a> {
    /// Field names without their leading dots.
    pub fn fields(self) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .child_tokens()
            .filter(|token| token.kind() == FIELD)
            .map(|token| token.text().trim_start_matches('.'))
    }
}

impl<'a> Variable<'a> {
    pub fn name(self) -> &'a str {
        token(self.0, VARIABLE).map_or("", SyntaxToken::text)
    }
}
