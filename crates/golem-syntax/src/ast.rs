use crate::{SyntaxKind, SyntaxNode, SyntaxToken};

pub trait AstNode<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($(#[$attr:meta])* $name:ident => $kind:ident,)*) => {$(
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $crate::SyntaxKind::$kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

mod go;
mod template;

pub use go::*;
pub use template::*;

fn child<'a, N: AstNode<'a>>(parent: SyntaxNode<'a>) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<'a, N: AstNode<'a> + 'a>(parent: SyntaxNode<'a>) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

fn token<'a>(parent: SyntaxNode<'a>, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
    parent.first_token_of_kind(kind)
}
