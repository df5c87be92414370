use golem_syntax::SyntaxKind::*;

use super::{RECOVERY, TYPE_START, exprs, items, name, too_deep};
use crate::grammar::expected;
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn type_or_error(p: &mut Parser<'_>) {
    if type_(p).is_none() {
        let message = expected(p, "type");
        p.error_recover(message, &RECOVERY);
    }
}

pub(crate) fn type_(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at_set(&TYPE_START) {
        return None;
    }
    match p.nest(type_inner) {
        Some(ty) => ty,
        None => Some(too_deep(p)),
    }
}

fn type_inner(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if p.at(IDENT) {
        return Some(type_name(p));
    }

    let m = p.start();
    let kind = match p.peek_kind() {
        STAR => {
            p.advance();
            type_or_error(p);
            POINTER_TYPE
        }
        LEFT_BRACKET => {
            p.advance();
            if p.eat(RIGHT_BRACKET) {
                type_or_error(p);
                SLICE_TYPE
            } else {
                if !p.eat(ELLIPSIS) {
                    exprs::expr(p);
                }
                p.expect(RIGHT_BRACKET);
                type_or_error(p);
                ARRAY_TYPE
            }
        }
        LEFT_PAREN => {
            p.advance();
            type_or_error(p);
            p.expect(RIGHT_PAREN);
            PAREN_TYPE
        }
        MAP_KW => {
            p.advance();
            p.expect(LEFT_BRACKET);
            type_or_error(p);
            p.expect(RIGHT_BRACKET);
            type_or_error(p);
            MAP_TYPE
        }
        CHAN_KW => {
            p.advance();
            p.eat(ARROW);
            type_or_error(p);
            CHAN_TYPE
        }
        ARROW => {
            p.advance();
            p.expect(CHAN_KW);
            type_or_error(p);
            CHAN_TYPE
        }
        FUNC_KW => {
            p.advance();
            items::signature(p);
            FUNC_TYPE
        }
        STRUCT_KW => {
            p.advance();
            struct_body(p);
            STRUCT_TYPE
        }
        INTERFACE_KW => {
            p.advance();
            interface_body(p);
            INTERFACE_TYPE
        }
        _ => {
            m.abandon(p);
            return None;
        }
    };

    Some(m.complete(p, kind))
}

/// `T`, `pkg.T` or `T[A, B]`.
fn type_name(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    if p.at(DOT) && p.nth(1) == IDENT {
        p.advance();
        p.advance();
    }

    if p.at(LEFT_BRACKET) && p.nth(1) != RIGHT_BRACKET {
        let args = p.start();
        p.advance();
        loop {
            type_or_error(p);
            if !p.eat(COMMA) || p.at(RIGHT_BRACKET) {
                break;
            }
        }
        p.expect(RIGHT_BRACKET);
        args.complete(p, TYPE_ARGS);
    }

    m.complete(p, TYPE_NAME)
}

/// Union of type terms, possibly approximate: `~int | string`. A single
/// plain term is left as is.
pub(crate) fn type_elem(p: &mut Parser<'_>) {
    let m = p.start();
    let mut union = false;

    loop {
        union |= p.eat(TILDE);
        type_or_error(p);
        if !p.eat(PIPE) {
            break;
        }
        union = true;
    }

    if union {
        m.complete(p, TYPE_ELEM);
    } else {
        m.abandon(p);
    }
}

/// Braced member list shared by struct and interface types.
fn members(p: &mut Parser<'_>, member: fn(&mut Parser<'_>), what: &str) {
    if !p.eat(LEFT_BRACE) {
        let message = expected(p, "'{'");
        p.error(message);
        return;
    }

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        if p.eat(SEMICOLON) {
            continue;
        }

        let start = p.pos();
        member(p);
        if p.pos() == start {
            let message = expected(p, what);
            p.error_and_bump(message);
            continue;
        }

        if !p.at(RIGHT_BRACE) && !p.eat(SEMICOLON) {
            let message = expected(p, "';' or newline");
            p.error(message);
        }
    }

    p.expect(RIGHT_BRACE);
}

fn struct_body(p: &mut Parser<'_>) {
    members(p, field_decl, "field declaration");
}

fn field_decl(p: &mut Parser<'_>) {
    let m = p.start();

    match (p.peek_kind(), p.nth(1)) {
        (STAR, _) => {
            type_(p);
        }
        (IDENT, DOT | SEMICOLON | RIGHT_BRACE | STRING | RAW_STRING) => {
            type_name(p);
        }
        (IDENT, _) => {
            name(p, "field name");
            while p.eat(COMMA) {
                name(p, "field name");
            }
            type_or_error(p);
        }
        _ => {
            m.abandon(p);
            return;
        }
    }

    if p.at(STRING) || p.at(RAW_STRING) {
        p.advance();
    }

    m.complete(p, FIELD_DECL);
}

fn interface_body(p: &mut Parser<'_>) {
    members(p, interface_elem, "method or type element");
}

fn interface_elem(p: &mut Parser<'_>) {
    if p.at(IDENT) && p.nth(1) == LEFT_PAREN {
        let m = p.start();
        name(p, "method name");
        items::signature(p);
        m.complete(p, METHOD_SPEC);
    } else if p.at_set(&TYPE_START) || p.at(TILDE) {
        type_elem(p);
    }
}
