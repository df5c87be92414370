use golem_syntax::SyntaxKind::{self, *};
use golem_syntax::{SyntaxSet, TextRange};
use golem_tokenizer::Delimiters;

use super::expected;
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn is_trivia(kind: SyntaxKind) -> bool {
    kind == WHITESPACE
}

struct Context<'d> {
    delimiters: &'d Delimiters,
    range_depth: u32,
}

impl Context<'_> {
    /// `keyword` wrapped in the configured delimiters, e.g. `{{end}}`.
    fn action(&self, keyword: &str) -> String {
        format!("{}{keyword}{}", self.delimiters.left(), self.delimiters.right())
    }
}

pub(crate) fn template(p: &mut Parser<'_>, delimiters: &Delimiters) {
    let mut cx = Context { delimiters, range_depth: 0 };
    let m = p.start();

    while !p.at(EOF) {
        if at_list_end(p) {
            stray(p, &cx);
        } else {
            item(p, &mut cx);
        }
    }

    m.complete(p, TEMPLATE);
}

fn at_list_end(p: &Parser<'_>) -> bool {
    p.at(LEFT_DELIM) && matches!(p.nth(1), ELSE_KW | END_KW)
}

fn list(p: &mut Parser<'_>, cx: &mut Context<'_>) {
    let m = p.start();
    while !p.at(EOF) && !at_list_end(p) {
        item(p, cx);
    }
    m.complete(p, TMPL_LIST);
}

fn item(p: &mut Parser<'_>, cx: &mut Context<'_>) {
    if !p.at(LEFT_DELIM) {
        p.advance();
        return;
    }

    match p.nth(1) {
        IF_KW | RANGE_KW | WITH_KW | DEFINE_KW | BLOCK_KW => {
            if p.nest(|p| block_directive(p, cx)).is_none() {
                blocks_too_deep(p);
            }
        }
        TEMPLATE_KW => {
            let m = p.start();
            open(p);
            template_name(p);
            if !p.at(RIGHT_DELIM) && !p.at(EOF) {
                pipeline(p);
            }
            close(p, cx);
            m.complete(p, TMPL_TEMPLATE);
        }
        BREAK_KW => loop_control(p, cx, TMPL_BREAK, "break"),
        CONTINUE_KW => loop_control(p, cx, TMPL_CONTINUE, "continue"),
        RETURN_KW => {
            let m = p.start();
            open(p);
            if !p.at(RIGHT_DELIM) && !p.at(EOF) {
                pipeline(p);
            }
            close(p, cx);
            m.complete(p, TMPL_RETURN);
        }
        BLOCK_COMMENT | UNTERMINATED_COMMENT => {
            let m = p.start();
            open(p);
            close(p, cx);
            m.complete(p, TMPL_ACTION);
        }
        _ => {
            let m = p.start();
            p.advance();
            if p.at(RIGHT_DELIM) || p.at(EOF) {
                p.error("missing value for command");
            } else {
                pipeline(p);
            }
            close(p, cx);
            m.complete(p, TMPL_ACTION);
        }
    }
}

fn block_directive(p: &mut Parser<'_>, cx: &mut Context<'_>) {
    match p.nth(1) {
        IF_KW => control(p, cx, TMPL_IF),
        RANGE_KW => control(p, cx, TMPL_RANGE),
        WITH_KW => control(p, cx, TMPL_WITH),
        DEFINE_KW => named_block(p, cx, TMPL_DEFINE),
        _ => named_block(p, cx, TMPL_BLOCK),
    }
}

/// Skips a block directive nested too deeply to parse, along with the rest
/// of the enclosing list.
fn blocks_too_deep(p: &mut Parser<'_>) {
    let m = p.start();
    p.error("nesting too deep");

    let mut depth = 0u32;
    while !p.at(EOF) {
        if p.at(LEFT_DELIM) {
            match p.nth(1) {
                IF_KW | RANGE_KW | WITH_KW | DEFINE_KW | BLOCK_KW => depth += 1,
                ELSE_KW | END_KW if depth == 0 => break,
                END_KW => depth -= 1,
                _ => {}
            }
        }
        p.advance();
    }

    m.complete(p, ERROR);
}

/// Consumes the left delimiter and the keyword after it.
fn open(p: &mut Parser<'_>) {
    p.advance();
    p.advance();
}

fn close(p: &mut Parser<'_>, cx: &Context<'_>) {
    if p.eat(RIGHT_DELIM) {
        return;
    }
    if p.at(EOF) {
        p.error("unclosed action");
        return;
    }

    let m = p.start();
    if !p.peek_kind().is_lex_error() {
        let message = expected(p, &format!("'{}'", cx.delimiters.right()));
        p.error(message);
    }
    while !p.at(RIGHT_DELIM) && !p.at(EOF) {
        p.advance();
    }
    m.complete(p, ERROR);
    p.eat(RIGHT_DELIM);
}

fn keyword_name(kind: SyntaxKind) -> &'static str {
    match kind {
        TMPL_IF => "if",
        TMPL_RANGE => "range",
        TMPL_WITH => "with",
        TMPL_DEFINE => "define",
        TMPL_BLOCK => "block",
        _ => "end",
    }
}

/// `if`, `range` and `with`: a pipeline, a body, optional `else` branches
/// and a closing `end`.
fn control(p: &mut Parser<'_>, cx: &mut Context<'_>, kind: SyntaxKind) {
    let m = p.start();
    let start = p.current_range().start();
    let keyword = keyword_name(kind);

    open(p);
    control_pipeline(p, keyword);
    close(p, cx);
    let opener = TextRange::new(start, p.previous_end());

    let in_loop = kind == TMPL_RANGE;
    cx.range_depth += u32::from(in_loop);
    list(p, cx);
    cx.range_depth -= u32::from(in_loop);

    let mut seen_else = false;
    while p.at(LEFT_DELIM) && p.nth(1) == ELSE_KW {
        let clause = p.start();
        let start = p.current_range().start();
        let chained = matches!(p.nth(2), IF_KW | WITH_KW);

        open(p);
        if chained {
            let chain = p.peek_kind();
            p.advance();
            control_pipeline(p, if chain == IF_KW { "if" } else { "with" });
        }
        close(p, cx);

        if seen_else {
            let message = format!("expected {}, found {}", cx.action("end"), cx.action("else"));
            p.error_at(message, TextRange::new(start, p.previous_end()));
        } else if chained && in_loop {
            let message =
                format!("unexpected chained {} in {}", cx.action("else"), cx.action(keyword));
            p.error_at(message, TextRange::new(start, p.previous_end()));
        }
        seen_else |= !chained;

        list(p, cx);
        clause.complete(p, TMPL_ELSE);
    }

    end(p, cx, keyword, opener);
    m.complete(p, kind);
}

fn control_pipeline(p: &mut Parser<'_>, keyword: &str) {
    if p.at(RIGHT_DELIM) || p.at(EOF) {
        p.error(format!("missing value for {keyword}"));
    } else {
        pipeline(p);
    }
}

/// The closing `end` of a block directive. A missing one is reported on the
/// opener.
fn end(p: &mut Parser<'_>, cx: &Context<'_>, keyword: &str, opener: TextRange) {
    if p.at(LEFT_DELIM) && p.nth(1) == END_KW {
        let m = p.start();
        open(p);
        close(p, cx);
        m.complete(p, TMPL_END);
    } else {
        let message = format!("missing {} for {}", cx.action("end"), cx.action(keyword));
        p.error_at(message, opener);
    }
}

/// `define` and `block`: a quoted name, for `block` a pipeline, then a body.
fn named_block(p: &mut Parser<'_>, cx: &mut Context<'_>, kind: SyntaxKind) {
    let m = p.start();
    let start = p.current_range().start();
    let keyword = keyword_name(kind);

    open(p);
    template_name(p);
    if kind == TMPL_BLOCK && !p.at(RIGHT_DELIM) && !p.at(EOF) {
        pipeline(p);
    }
    close(p, cx);
    let opener = TextRange::new(start, p.previous_end());

    // Loop state does not leak into a nested definition.
    let depth = std::mem::take(&mut cx.range_depth);
    list(p, cx);
    cx.range_depth = depth;

    end(p, cx, keyword, opener);
    m.complete(p, kind);
}

fn template_name(p: &mut Parser<'_>) {
    if p.at(STRING) || p.at(RAW_STRING) {
        p.advance();
    } else {
        let message = expected(p, "template name string");
        p.error_recover(message, &SyntaxSet::new([RIGHT_DELIM]));
    }
}

fn loop_control(p: &mut Parser<'_>, cx: &Context<'_>, kind: SyntaxKind, keyword: &str) {
    let m = p.start();
    let start = p.current_range().start();
    open(p);
    close(p, cx);

    if cx.range_depth == 0 {
        let message = format!("{} outside {}", cx.action(keyword), cx.action("range"));
        p.error_at(message, TextRange::new(start, p.previous_end()));
    }
    m.complete(p, kind);
}

/// An `end` or `else` with no open block.
fn stray(p: &mut Parser<'_>, cx: &Context<'_>) {
    let (kind, keyword) =
        if p.nth(1) == END_KW { (TMPL_END, "end") } else { (TMPL_ELSE, "else") };

    let m = p.start();
    let start = p.current_range().start();
    open(p);
    if kind == TMPL_ELSE && matches!(p.peek_kind(), IF_KW | WITH_KW) {
        p.advance();
        if !p.at(RIGHT_DELIM) && !p.at(EOF) {
            pipeline(p);
        }
    }
    close(p, cx);

    let message = format!("unexpected {}", cx.action(keyword));
    p.error_at(message, TextRange::new(start, p.previous_end()));
    m.complete(p, kind);
}

fn pipeline(p: &mut Parser<'_>) {
    let m = p.start();

    if at_declaration(p) {
        declaration(p);
    }

    loop {
        command(p);
        if !p.eat(PIPE) {
            break;
        }
    }

    m.complete(p, TMPL_PIPELINE);
}

/// `$x :=`, `$x =` or `$i, $e :=`.
fn at_declaration(p: &Parser<'_>) -> bool {
    if !p.at(VARIABLE) {
        return false;
    }
    match p.nth(1) {
        COLON_EQ | EQ => true,
        COMMA => p.nth(2) == VARIABLE && matches!(p.nth(3), COLON_EQ | EQ),
        _ => false,
    }
}

fn declaration(p: &mut Parser<'_>) {
    let m = p.start();

    variable(p);
    if p.eat(COMMA) {
        variable(p);
    }
    p.advance();

    m.complete(p, TMPL_DECLARATION);
}

fn variable(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    m.complete(p, TMPL_VARIABLE);
}

fn command(p: &mut Parser<'_>) {
    let m = p.start();

    let mut operands = 0;
    while operand(p) {
        operands += 1;
    }
    if operands == 0 {
        p.error("missing value for command");
    }

    m.complete(p, TMPL_COMMAND);
}

fn operand(p: &mut Parser<'_>) -> bool {
    let term = match p.peek_kind() {
        FIELD => {
            let m = p.start();
            p.advance();
            while p.at_adjacent(FIELD) {
                p.advance();
            }
            m.complete(p, TMPL_FIELD_CHAIN)
        }
        DOT => leaf(p, TMPL_DOT),
        VARIABLE => leaf(p, TMPL_VARIABLE),
        IDENT | COMPARE_OP | LOGIC_OP => leaf(p, TMPL_FUNCTION),
        INT_NUMBER | FLOAT_NUMBER | IMAGINARY_NUMBER | RUNE | STRING | RAW_STRING
        | UNTERMINATED_STRING | UNTERMINATED_RAW_STRING | UNTERMINATED_RUNE | TRUE_KW
        | FALSE_KW | NIL_KW => leaf(p, TMPL_LITERAL),
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            if p.nest(pipeline).is_none() {
                pipeline_too_deep(p);
            }
            p.expect(RIGHT_PAREN);
            m.complete(p, TMPL_PAREN)
        }
        _ => return false,
    };

    // `$x.Field` and `(pipeline).Field`
    if matches!(term.kind(), TMPL_VARIABLE | TMPL_PAREN) && p.at_adjacent(FIELD) {
        let m = term.precede(p);
        while p.at_adjacent(FIELD) {
            p.advance();
        }
        m.complete(p, TMPL_CHAIN);
    }

    true
}

/// Skips a parenthesized pipeline nested too deeply to parse, up to its
/// closing paren.
fn pipeline_too_deep(p: &mut Parser<'_>) {
    let m = p.start();
    p.error("nesting too deep");

    let mut depth = 0u32;
    while !p.at(EOF) && !p.at(RIGHT_DELIM) {
        match p.peek_kind() {
            LEFT_PAREN => depth += 1,
            RIGHT_PAREN if depth == 0 => break,
            RIGHT_PAREN => depth -= 1,
            _ => {}
        }
        p.advance();
    }

    m.complete(p, ERROR);
}

fn leaf(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.advance();
    m.complete(p, kind)
}
