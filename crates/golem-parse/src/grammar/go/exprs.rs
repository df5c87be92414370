use golem_syntax::SyntaxKind::{self, *};
use golem_syntax::SyntaxSet;

use super::{items, stmts, too_deep, types};
use crate::grammar::expected;
use crate::parser::{CompletedMarker, Parser};

const EXPR_START: SyntaxSet = SyntaxSet::new([
    IDENT,
    INT_NUMBER,
    FLOAT_NUMBER,
    IMAGINARY_NUMBER,
    RUNE,
    STRING,
    RAW_STRING,
    UNTERMINATED_STRING,
    UNTERMINATED_RAW_STRING,
    UNTERMINATED_RUNE,
    LEFT_PAREN,
    LEFT_BRACKET,
    FUNC_KW,
    MAP_KW,
    CHAN_KW,
    STRUCT_KW,
    INTERFACE_KW,
    PLUS,
    MINUS,
    BANG,
    CARET,
    STAR,
    AMP,
    ARROW,
]);

const EXPR_RECOVERY: SyntaxSet = SyntaxSet::new([
    RIGHT_BRACE,
    RIGHT_PAREN,
    RIGHT_BRACKET,
    LEFT_BRACE,
    SEMICOLON,
    COMMA,
    COLON,
]);

pub(crate) fn at_expr_start(p: &Parser<'_>) -> bool {
    p.at_set(&EXPR_START)
}

/// One or more comma-separated expressions. A single expression is not
/// wrapped in a list node.
pub(crate) fn expr_list(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let first = expr(p)?;
    if !p.at(COMMA) {
        return Some(first);
    }

    let m = first.precede(p);
    while p.eat(COMMA) {
        expr(p);
    }
    Some(m.complete(p, EXPR_LIST))
}

pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let expr = binary_expr(p, 1);
    if expr.is_none() {
        let message = expected(p, "expression");
        p.error_recover(message, &EXPR_RECOVERY);
    }
    expr
}

fn precedence(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        PIPE_PIPE => 1,
        AMP_AMP => 2,
        EQ_EQ | NEQ | LT | LTEQ | GT | GTEQ => 3,
        PLUS | MINUS | PIPE | CARET => 4,
        STAR | SLASH | PERCENT | SHL | SHR | AMP | AMP_CARET => 5,
        _ => return None,
    })
}

fn binary_expr(p: &mut Parser<'_>, min_precedence: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        let op = p.peek_kind();
        let Some(precedence) = precedence(op) else { break };
        if precedence < min_precedence {
            break;
        }

        let m = lhs.precede(p);
        p.advance();
        if binary_expr(p, precedence + 1).is_none() {
            p.error(format!("missing operand after {}", op.describe()));
        }
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn unary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !at_expr_start(p) {
        return None;
    }
    match p.nest(unary_or_primary) {
        Some(expr) => expr,
        None => Some(too_deep(p)),
    }
}

fn unary_or_primary(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        PLUS | MINUS | BANG | CARET | STAR | AMP => {}
        ARROW if p.nth(1) != CHAN_KW => {}
        _ => return primary_expr(p),
    }

    let op = p.peek_kind();
    let m = p.start();
    p.advance();
    if unary_expr(p).is_none() {
        p.error(format!("missing operand after {}", op.describe()));
    }
    Some(m.complete(p, UNARY_EXPR))
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = operand(p)?;

    loop {
        lhs = match p.peek_kind() {
            DOT => selector(p, lhs),
            LEFT_PAREN => {
                let m = lhs.precede(p);
                arg_list(p);
                m.complete(p, CALL_EXPR)
            }
            LEFT_BRACKET => index(p, lhs),
            LEFT_BRACE if composite_allowed(p, &lhs) => {
                let m = lhs.precede(p);
                literal_value(p);
                m.complete(p, COMPOSITE_LIT)
            }
            _ => break,
        };
    }

    Some(lhs)
}

/// `T{` opens a composite literal, except for a plain type name inside an
/// `if`, `for` or `switch` header where the brace starts the block.
fn composite_allowed(p: &Parser<'_>, lhs: &CompletedMarker) -> bool {
    match lhs.kind() {
        ARRAY_TYPE | SLICE_TYPE | MAP_TYPE | STRUCT_TYPE => true,
        NAME_REF | SELECTOR_EXPR | INDEX_EXPR => p.expr_level() >= 0,
        _ => false,
    }
}

fn operand(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let m = p.start();

    let kind = match p.peek_kind() {
        INT_NUMBER | FLOAT_NUMBER | IMAGINARY_NUMBER | RUNE | STRING | RAW_STRING
        | UNTERMINATED_STRING | UNTERMINATED_RAW_STRING | UNTERMINATED_RUNE => {
            p.advance();
            LITERAL
        }
        IDENT => {
            p.advance();
            NAME_REF
        }
        LEFT_PAREN => {
            p.advance();
            nested(p, |p| {
                expr(p);
            });
            p.expect(RIGHT_PAREN);
            PAREN_EXPR
        }
        FUNC_KW => {
            p.advance();
            items::signature(p);
            if !p.at(LEFT_BRACE) {
                return Some(m.complete(p, FUNC_TYPE));
            }
            stmts::block(p);
            FUNC_LIT
        }
        LEFT_BRACKET | MAP_KW | CHAN_KW | STRUCT_KW | INTERFACE_KW | ARROW => {
            m.abandon(p);
            return types::type_(p);
        }
        _ => {
            m.abandon(p);
            return None;
        }
    };

    Some(m.complete(p, kind))
}

/// Runs `f` one nesting level deeper, where composite literals are always
/// allowed.
fn nested(p: &mut Parser<'_>, f: impl FnOnce(&mut Parser<'_>)) {
    let level = p.expr_level();
    p.set_expr_level(level.max(0) + 1);
    f(p);
    p.set_expr_level(level);
}

fn selector(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();

    if p.eat(LEFT_PAREN) {
        if !p.eat(TYPE_KW) {
            types::type_or_error(p);
        }
        p.expect(RIGHT_PAREN);
        return m.complete(p, TYPE_ASSERT_EXPR);
    }

    if p.at(IDENT) {
        let name = p.start();
        p.advance();
        name.complete(p, NAME_REF);
    } else {
        let message = expected(p, "field or method name");
        p.error(message);
    }
    m.complete(p, SELECTOR_EXPR)
}

fn arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    nested(p, |p| {
        while !p.at(RIGHT_PAREN) && !p.at(EOF) {
            if expr(p).is_none() {
                break;
            }
            p.eat(ELLIPSIS);
            if !p.eat(COMMA) {
                break;
            }
        }
    });

    p.expect(RIGHT_PAREN);
    m.complete(p, ARG_LIST);
}

/// `x[i]`, `f[T1, T2]` or `s[lo:hi:max]`.
fn index(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();

    let mut kind = INDEX_EXPR;
    nested(p, |p| {
        if !p.at(COLON) {
            expr(p);
            while p.eat(COMMA) && !p.at(RIGHT_BRACKET) {
                expr(p);
            }
        }
        while p.eat(COLON) {
            kind = SLICE_EXPR;
            if !p.at(COLON) && !p.at(RIGHT_BRACKET) {
                expr(p);
            }
        }
    });

    p.expect(RIGHT_BRACKET);
    m.complete(p, kind)
}

fn literal_value(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    nested(p, |p| {
        while !p.at(RIGHT_BRACE) && !p.at(EOF) {
            if !element(p) || !p.eat(COMMA) {
                break;
            }
        }
    });

    p.expect(RIGHT_BRACE);
    m.complete(p, LITERAL_VALUE)
}

fn element(p: &mut Parser<'_>) -> bool {
    let Some(key) = element_value(p) else { return false };

    if p.at(COLON) {
        let m = key.precede(p);
        p.advance();
        element_value(p);
        m.complete(p, KEYED_ELEMENT);
    }
    true
}

fn element_value(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at(LEFT_BRACE) {
        return expr(p);
    }
    Some(p.nest(literal_value).unwrap_or_else(|| too_deep(p)))
}
