use golem_syntax::SyntaxKind::{self, *};

use super::{TYPE_START, at_decl_start, exprs, name, nth_at_decl_start, stmts, types};
use crate::grammar::expected;
use crate::parser::Parser;

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();

    package_clause(p);
    while !p.at(EOF) {
        top_level_decl(p);
    }

    m.complete(p, SOURCE_FILE);
}

fn package_clause(p: &mut Parser<'_>) {
    if !p.at(PACKAGE_KW) {
        let message = expected(p, "package clause");
        p.error(message);
        return;
    }

    let m = p.start();
    p.advance();
    name(p, "package name");
    m.complete(p, PACKAGE_CLAUSE);
    p.eat(SEMICOLON);
}

fn top_level_decl(p: &mut Parser<'_>) {
    match p.peek_kind() {
        IMPORT_KW => import_decl(p),
        FUNC_KW => func_decl(p),
        TYPE_KW | VAR_KW | CONST_KW => decl(p),
        SEMICOLON => p.advance(),
        PACKAGE_KW => {
            let m = p.start();
            p.error("unexpected package clause");
            p.advance();
            p.eat(IDENT);
            m.complete(p, ERROR);
        }
        _ => {
            let m = p.start();
            let message = expected(p, "declaration");
            p.error(message);
            p.advance();
            // The line break before the next declaration stays outside.
            while !p.at(EOF) && !at_decl_start(p) && !(p.at(SEMICOLON) && nth_at_decl_start(p, 1)) {
                p.advance();
            }
            m.complete(p, ERROR);
        }
    }

    p.eat(SEMICOLON);
}

/// `var`, `const` or `type` declaration, at top level or inside a block.
pub(crate) fn decl(p: &mut Parser<'_>) {
    let (spec, kind): (fn(&mut Parser<'_>), SyntaxKind) = match p.peek_kind() {
        VAR_KW => (var_spec, VAR_DECL),
        CONST_KW => (const_spec, CONST_DECL),
        TYPE_KW => (type_spec, TYPE_DECL),
        _ => unreachable!(),
    };

    let m = p.start();
    p.advance();
    if p.at(LEFT_PAREN) {
        group(p, spec);
    } else {
        spec(p);
    }
    m.complete(p, kind);
}

fn import_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if p.at(LEFT_PAREN) {
        group(p, import_spec);
    } else {
        import_spec(p);
    }
    m.complete(p, IMPORT_DECL);
}

/// `( spec; spec; ... )`
fn group(p: &mut Parser<'_>, spec: fn(&mut Parser<'_>)) {
    p.advance();

    while !p.at(RIGHT_PAREN) && !p.at(EOF) && !at_decl_start(p) {
        if p.eat(SEMICOLON) {
            continue;
        }

        let start = p.pos();
        spec(p);
        if p.pos() == start {
            let message = expected(p, "specification");
            p.error_and_bump(message);
            continue;
        }

        if !p.at(RIGHT_PAREN) && !p.eat(SEMICOLON) {
            let message = expected(p, "';' or newline");
            p.error(message);
        }
    }

    p.expect(RIGHT_PAREN);
}

fn import_spec(p: &mut Parser<'_>) {
    let m = p.start();

    if p.at(IDENT) {
        name(p, "package name");
    } else {
        p.eat(DOT);
    }

    if matches!(
        p.peek_kind(),
        STRING | RAW_STRING | UNTERMINATED_STRING | UNTERMINATED_RAW_STRING
    ) {
        p.advance();
    } else {
        let message = expected(p, "import path");
        p.error(message);
    }

    m.complete(p, IMPORT_SPEC);
}

fn var_spec(p: &mut Parser<'_>) {
    let m = p.start();
    name_list(p);

    let has_type = p.at_set(&TYPE_START);
    if has_type {
        types::type_(p);
    }
    if p.eat(EQ) {
        exprs::expr_list(p);
    } else if !has_type {
        let message = expected(p, "type or '='");
        p.error(message);
    }

    m.complete(p, VAR_SPEC);
}

fn const_spec(p: &mut Parser<'_>) {
    let m = p.start();
    name_list(p);

    if p.at_set(&TYPE_START) {
        types::type_(p);
    }
    if p.eat(EQ) {
        exprs::expr_list(p);
    }

    m.complete(p, CONST_SPEC);
}

fn name_list(p: &mut Parser<'_>) {
    name(p, "identifier");
    while p.at(COMMA) && p.nth(1) == IDENT {
        p.advance();
        name(p, "identifier");
    }
}

fn type_spec(p: &mut Parser<'_>) {
    let m = p.start();
    name(p, "type name");

    // `type A[T any] ...` rather than the array type `type A [N]T`.
    if p.at(LEFT_BRACKET) && p.nth(1) == IDENT && p.nth(2) != RIGHT_BRACKET {
        type_params(p);
    }

    p.eat(EQ);
    types::type_or_error(p);
    m.complete(p, TYPE_SPEC);
}

fn func_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    if p.at(LEFT_PAREN) {
        param_list(p, RECEIVER);
    }

    name(p, "function name");

    if p.at(LEFT_BRACKET) {
        type_params(p);
    }

    signature(p);

    if p.at(LEFT_BRACE) {
        stmts::block(p);
    }

    m.complete(p, FUNC_DECL);
}

fn type_params(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    while p.at(IDENT) {
        let param = p.start();
        name(p, "type parameter");
        if p.at_set(&TYPE_START) || p.at(TILDE) {
            types::type_elem(p);
        }
        param.complete(p, TYPE_PARAM);

        if !p.eat(COMMA) {
            break;
        }
    }

    p.expect(RIGHT_BRACKET);
    m.complete(p, TYPE_PARAM_LIST);
}

/// Parameters and optional result of a function or function type.
pub(crate) fn signature(p: &mut Parser<'_>) {
    if p.at(LEFT_PAREN) {
        param_list(p, PARAM_LIST);
    } else {
        let message = expected(p, "'('");
        p.error(message);
    }

    if p.at(LEFT_PAREN) {
        let m = p.start();
        param_list(p, PARAM_LIST);
        m.complete(p, RESULT);
    } else if p.at_set(&TYPE_START) {
        let m = p.start();
        types::type_(p);
        m.complete(p, RESULT);
    }
}

fn param_list(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_PAREN) && !p.at(EOF) {
        if !param(p) || !p.eat(COMMA) {
            break;
        }
    }

    p.expect(RIGHT_PAREN);
    m.complete(p, kind);
}

fn param(p: &mut Parser<'_>) -> bool {
    if !p.at_set(&TYPE_START) && !p.at(ELLIPSIS) {
        return false;
    }

    let m = p.start();
    if p.at(IDENT) && param_name_follows(p) {
        name(p, "parameter name");
    }
    p.eat(ELLIPSIS);
    types::type_or_error(p);
    m.complete(p, PARAM);
    true
}

/// Whether the identifier at the cursor names a parameter, judging by the
/// token after it.
fn param_name_follows(p: &Parser<'_>) -> bool {
    match p.nth(1) {
        IDENT | STAR | MAP_KW | CHAN_KW | FUNC_KW | STRUCT_KW | INTERFACE_KW | ELLIPSIS
        | LEFT_PAREN | ARROW => true,
        LEFT_BRACKET => matches!(p.nth(2), RIGHT_BRACKET | INT_NUMBER | ELLIPSIS),
        _ => false,
    }
}
