use golem_syntax::SyntaxKind::*;
use golem_syntax::SyntaxSet;

use super::expected;
use crate::parser::{CompletedMarker, Parser};

mod exprs;
pub(crate) mod items;
mod stmts;
mod types;

/// Tokens that close a construct; error recovery never swallows them.
pub(crate) const RECOVERY: SyntaxSet =
    SyntaxSet::new([RIGHT_BRACE, RIGHT_PAREN, RIGHT_BRACKET, SEMICOLON, COMMA]);

/// Tokens a type can start with.
pub(crate) const TYPE_START: SyntaxSet = SyntaxSet::new([
    IDENT,
    STAR,
    LEFT_BRACKET,
    LEFT_PAREN,
    MAP_KW,
    CHAN_KW,
    FUNC_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ARROW,
]);

pub(crate) fn name(p: &mut Parser<'_>, what: &str) {
    if p.at(IDENT) {
        let m = p.start();
        p.advance();
        m.complete(p, NAME);
    } else {
        let message = expected(p, what);
        p.error(message);
    }
}

/// A line-start token that begins a new top-level declaration.
pub(crate) fn at_decl_start(p: &Parser<'_>) -> bool {
    nth_at_decl_start(p, 0)
}

pub(crate) fn nth_at_decl_start(p: &Parser<'_>, n: usize) -> bool {
    if !p.nth_at_line_start(n) {
        return false;
    }
    match p.nth(n) {
        IMPORT_KW | TYPE_KW | VAR_KW | CONST_KW | PACKAGE_KW => true,
        FUNC_KW => matches!(p.nth(n + 1), IDENT | LEFT_PAREN),
        _ => false,
    }
}

/// A line-start token that cannot continue a function body.
pub(crate) fn at_block_break(p: &Parser<'_>) -> bool {
    p.at_line_start()
        && match p.peek_kind() {
            IMPORT_KW | PACKAGE_KW => true,
            FUNC_KW => p.nth(1) == IDENT,
            _ => false,
        }
}

/// Skips the rest of a construct nested too deeply to parse, up to the
/// closer or separator of the enclosing group.
pub(crate) fn too_deep(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.error("nesting too deep");

    let mut depth = 0u32;
    while !p.at(EOF) {
        match p.peek_kind() {
            LEFT_PAREN | LEFT_BRACKET | LEFT_BRACE => depth += 1,
            RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE if depth == 0 => break,
            RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE => depth -= 1,
            SEMICOLON | COMMA if depth == 0 => break,
            _ => {}
        }
        p.advance();
    }

    m.complete(p, ERROR)
}
