use golem_syntax::SyntaxKind::{self, *};

use super::{at_block_break, exprs, items, name, too_deep};
use crate::grammar::expected;
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn block(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(LEFT_BRACE);

    let level = p.set_expr_level(0);
    stmt_list(p);
    p.set_expr_level(level);

    p.expect(RIGHT_BRACE);
    m.complete(p, BLOCK);
}

fn block_or_error(p: &mut Parser<'_>) {
    if p.at(LEFT_BRACE) {
        block(p);
    } else {
        let message = expected(p, "'{'");
        p.error(message);
    }
}

fn stmt_list(p: &mut Parser<'_>) {
    loop {
        match p.peek_kind() {
            RIGHT_BRACE | EOF | CASE_KW | DEFAULT_KW => break,
            SEMICOLON => {
                p.advance();
                continue;
            }
            kind if kind.is_lex_error() => {
                // Already reported by the tokenizer.
                let m = p.start();
                p.advance();
                m.complete(p, ERROR);
                continue;
            }
            _ if at_block_break(p) => break,
            _ => {}
        }

        let start = p.pos();
        statement(p);
        if p.pos() == start {
            let message = expected(p, "statement");
            p.error_and_bump(message);
            continue;
        }

        if !p.at(RIGHT_BRACE) && !p.peek_kind().is_lex_error() && !p.eat(SEMICOLON) {
            let message = expected(p, "';' or newline after statement");
            p.error(message);
        }
    }
}

fn statement(p: &mut Parser<'_>) {
    if p.nest(statement_inner).is_none() {
        too_deep(p);
    }
}

fn statement_inner(p: &mut Parser<'_>) {
    match p.peek_kind() {
        VAR_KW | CONST_KW | TYPE_KW => {
            let m = p.start();
            items::decl(p);
            m.complete(p, DECL_STMT);
        }
        RETURN_KW => {
            let m = p.start();
            p.advance();
            if exprs::at_expr_start(p) {
                exprs::expr_list(p);
            }
            m.complete(p, RETURN_STMT);
        }
        BREAK_KW => branch(p, BREAK_STMT),
        CONTINUE_KW => branch(p, CONTINUE_STMT),
        GOTO_KW => {
            let m = p.start();
            p.advance();
            label_ref(p);
            m.complete(p, GOTO_STMT);
        }
        FALLTHROUGH_KW => {
            let m = p.start();
            p.advance();
            m.complete(p, FALLTHROUGH_STMT);
        }
        GO_KW => spawn(p, GO_STMT),
        DEFER_KW => spawn(p, DEFER_STMT),
        IF_KW => if_stmt(p),
        FOR_KW => for_stmt(p),
        SWITCH_KW => switch_stmt(p),
        SELECT_KW => select_stmt(p),
        LEFT_BRACE => block(p),
        IDENT if p.nth(1) == COLON => {
            let m = p.start();
            name(p, "label");
            p.advance();
            if !p.at(RIGHT_BRACE) && !p.at(EOF) {
                statement(p);
            }
            m.complete(p, LABELED_STMT);
        }
        _ if exprs::at_expr_start(p) => {
            if let Some(stmt) = simple_stmt(p, false) {
                expr_stmt(p, stmt);
            }
        }
        _ => {}
    }
}

/// Wraps a bare expression so it can stand as a statement.
fn expr_stmt(p: &mut Parser<'_>, stmt: CompletedMarker) -> CompletedMarker {
    if stmt.kind().is_statement() {
        return stmt;
    }
    let m = stmt.precede(p);
    m.complete(p, EXPR_STMT)
}

fn branch(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();
    if p.at(IDENT) {
        label_ref(p);
    }
    m.complete(p, kind);
}

fn label_ref(p: &mut Parser<'_>) {
    if p.at(IDENT) {
        let m = p.start();
        p.advance();
        m.complete(p, NAME_REF);
    } else {
        let message = expected(p, "label");
        p.error(message);
    }
}

fn spawn(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();
    exprs::expr(p);
    m.complete(p, kind);
}

/// Parses a simple statement. Bare expressions are returned unwrapped, so
/// headers can use them as conditions.
fn simple_stmt(p: &mut Parser<'_>, allow_range: bool) -> Option<CompletedMarker> {
    if allow_range && p.at(RANGE_KW) {
        let m = p.start();
        p.advance();
        exprs::expr(p);
        return Some(m.complete(p, RANGE_CLAUSE));
    }

    let lhs = exprs::expr_list(p)?;

    let kind = match p.peek_kind() {
        COLON_EQ => SHORT_VAR_DECL,
        EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ | AMP_EQ | PIPE_EQ
        | CARET_EQ | SHL_EQ | SHR_EQ | AMP_CARET_EQ => ASSIGN_STMT,
        PLUS_PLUS | MINUS_MINUS => {
            let m = lhs.precede(p);
            p.advance();
            return Some(m.complete(p, INC_DEC_STMT));
        }
        ARROW => {
            let m = lhs.precede(p);
            p.advance();
            exprs::expr(p);
            return Some(m.complete(p, SEND_STMT));
        }
        _ => return Some(lhs),
    };

    let is_plain = matches!(p.peek_kind(), COLON_EQ | EQ);
    let m = lhs.precede(p);
    p.advance();

    if allow_range && is_plain && p.at(RANGE_KW) {
        p.advance();
        exprs::expr(p);
        return Some(m.complete(p, RANGE_CLAUSE));
    }

    exprs::expr_list(p);
    Some(m.complete(p, kind))
}

/// `[init;] [tag]` of `if` and `switch` statements.
fn header(p: &mut Parser<'_>) {
    let level = p.set_expr_level(-1);

    if !p.at(LEFT_BRACE) {
        if !p.at(SEMICOLON) {
            simple_stmt(p, false);
        }
        if p.eat(SEMICOLON) && !p.at(LEFT_BRACE) {
            simple_stmt(p, false);
        }
    }

    p.set_expr_level(level);
}

fn if_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    if p.at(LEFT_BRACE) {
        p.error("missing condition in if statement");
    }
    header(p);
    block_or_error(p);

    if p.eat(ELSE_KW) {
        match p.peek_kind() {
            IF_KW => if_stmt(p),
            LEFT_BRACE => block(p),
            _ => {
                let message = expected(p, "'if' or '{'");
                p.error(message);
            }
        }
    }

    m.complete(p, IF_STMT);
}

fn for_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    let level = p.set_expr_level(-1);
    if !p.at(LEFT_BRACE) {
        for_header(p);
    }
    p.set_expr_level(level);

    block_or_error(p);
    m.complete(p, FOR_STMT);
}

fn for_header(p: &mut Parser<'_>) {
    let init = if p.at(SEMICOLON) { None } else { simple_stmt(p, true) };

    if init.as_ref().is_some_and(|it| it.kind() == RANGE_CLAUSE) || !p.at(SEMICOLON) {
        return;
    }

    let clause = match init {
        Some(init) => expr_stmt(p, init).precede(p),
        None => p.start(),
    };

    p.advance();
    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON);
    if !p.at(LEFT_BRACE) {
        if let Some(post) = simple_stmt(p, false) {
            expr_stmt(p, post);
        }
    }

    clause.complete(p, FOR_CLAUSE);
}

fn switch_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    header(p);
    clauses(p, CASE_CLAUSE);
    m.complete(p, SWITCH_STMT);
}

fn select_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    clauses(p, COMM_CLAUSE);
    m.complete(p, SELECT_STMT);
}

fn clauses(p: &mut Parser<'_>, kind: SyntaxKind) {
    if !p.eat(LEFT_BRACE) {
        let message = expected(p, "'{'");
        p.error(message);
        return;
    }

    let level = p.set_expr_level(0);
    while !p.at(RIGHT_BRACE) && !p.at(EOF) && !at_block_break(p) {
        match p.peek_kind() {
            CASE_KW | DEFAULT_KW => case_clause(p, kind),
            SEMICOLON => p.advance(),
            _ => {
                let message = expected(p, "'case' or 'default'");
                p.error_and_bump(message);
            }
        }
    }
    p.set_expr_level(level);

    p.expect(RIGHT_BRACE);
}

fn case_clause(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();

    if p.eat(CASE_KW) {
        if kind == COMM_CLAUSE {
            simple_stmt(p, false);
        } else {
            exprs::expr_list(p);
        }
    } else {
        p.advance();
    }

    p.expect(COLON);
    stmt_list(p);
    m.complete(p, kind);
}
