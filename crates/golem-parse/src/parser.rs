use std::cell::Cell;

use drop_bomb::DropBomb;
use golem_syntax::{Builder, ErrorAnchor, SyntaxKind, SyntaxSet, SyntaxTree, TextRange, TextSize};
use golem_tokenizer::Token;

#[derive(Clone, Copy)]
struct Significant {
    index: u32,
    line_start: bool,
}

/// Event-based recursive-descent core shared by both grammars.
///
/// The parser only looks at significant tokens. Trivia is woven back into
/// the tree when the recorded events are replayed in [`Parser::build_tree`].
pub(crate) struct Parser<'t> {
    text: &'t str,
    range: TextRange,
    tokens: Vec<Token>,
    significant: Vec<Significant>,
    pos: usize,
    events: Vec<Event>,
    expr_level: i32,
    nesting: u32,
    steps: Cell<u32>,
}

const STEP_LIMIT: u32 = 10_000_000;

/// Deepest syntactic nesting the grammars descend into.
const NESTING_LIMIT: u32 = 256;

impl<'t> Parser<'t> {
    pub(crate) fn new(
        text: &'t str,
        range: TextRange,
        tokens: Vec<Token>,
        is_trivia: fn(SyntaxKind) -> bool,
    ) -> Self {
        let mut significant = Vec::with_capacity(tokens.len());
        let mut saw_newline = true;

        for (index, token) in tokens.iter().enumerate() {
            if is_trivia(token.kind) {
                let multiline_comment =
                    token.kind == SyntaxKind::BLOCK_COMMENT && text[token.range].contains('\n');
                saw_newline |= token.kind == SyntaxKind::NEWLINE || multiline_comment;
                continue;
            }
            significant.push(Significant { index: index as u32, line_start: saw_newline });
            saw_newline = text[token.range].contains('\n');
        }

        Self {
            text,
            range,
            tokens,
            significant,
            pos: 0,
            events: Vec::new(),
            expr_level: 0,
            nesting: 0,
            steps: Cell::new(0),
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn token(&self, n: usize) -> Option<&Token> {
        let significant = self.significant.get(self.pos + n)?;
        Some(&self.tokens[significant.index as usize])
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        let steps = self.steps.get();
        assert!(steps <= STEP_LIMIT, "the parser seems stuck");
        self.steps.set(steps + 1);

        self.token(n).map_or(SyntaxKind::EOF, |token| token.kind)
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    /// `true` if the current token is the first significant token on its line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.nth_at_line_start(0)
    }

    pub(crate) fn nth_at_line_start(&self, n: usize) -> bool {
        self.significant.get(self.pos + n).is_some_and(|it| it.line_start)
    }

    /// `true` if the current token is `kind` and touches the previous token.
    pub(crate) fn at_adjacent(&self, kind: SyntaxKind) -> bool {
        self.at(kind) && self.current_range().start() == self.previous_end()
    }

    pub(crate) fn current_range(&self) -> TextRange {
        self.token(0).map_or(TextRange::empty(self.range.end()), |token| token.range)
    }

    /// End of the last consumed significant token.
    pub(crate) fn previous_end(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|pos| self.significant.get(pos)) {
            Some(previous) => self.tokens[previous.index as usize].range.end(),
            None => self.range.start(),
        }
    }

    pub(crate) fn advance(&mut self) {
        if self.pos >= self.significant.len() {
            return;
        }

        self.steps.set(0);
        self.pos += 1;
        self.events.push(Event::Token);
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {}, got {}", kind.describe(), self.peek_kind().describe()));
        false
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Range an error at the current position points at. When the current
    /// token sits on a later line, or input has ended, the error points just
    /// past the previous token instead.
    fn error_range(&self) -> TextRange {
        if self.at(SyntaxKind::EOF) || (self.pos > 0 && self.at_line_start()) {
            TextRange::empty(self.previous_end())
        } else {
            self.current_range()
        }
    }

    pub(crate) fn error(&mut self, message: impl Into<Box<str>>) {
        let range = self.error_range();
        self.events.push(Event::Error { message: message.into(), range });
    }

    pub(crate) fn error_at(&mut self, message: impl Into<Box<str>>, range: TextRange) {
        self.events.push(Event::Error { message: message.into(), range });
    }

    pub(crate) fn error_and_bump(&mut self, message: impl Into<Box<str>>) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Reports an error, consuming the current token unless it belongs to
    /// `recovery`.
    pub(crate) fn error_recover(&mut self, message: impl Into<Box<str>>, recovery: &SyntaxSet) {
        if self.at_set(recovery) || self.at(SyntaxKind::EOF) {
            self.error(message);
        } else {
            self.error_and_bump(message);
        }
    }

    pub(crate) fn expr_level(&self) -> i32 {
        self.expr_level
    }

    /// Replaces the expression nesting level, returning the old one.
    pub(crate) fn set_expr_level(&mut self, level: i32) -> i32 {
        std::mem::replace(&mut self.expr_level, level)
    }

    /// Runs `parse` one nesting level deeper, or returns `None` without
    /// running it once the input nests past the limit.
    pub(crate) fn nest<T>(&mut self, parse: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.nesting == NESTING_LIMIT {
            return None;
        }

        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        Some(result)
    }

    pub(crate) fn build_tree(self) -> SyntaxTree {
        let Parser { text, range, tokens, significant, mut events, .. } = self;
        let mut builder = Builder::new(&text[range], range.start());
        let mut forward_parents = Vec::new();
        let mut raw = 0usize;
        let mut consumed = 0usize;
        let mut depth = 0usize;

        let next_significant = |consumed: usize| {
            significant.get(consumed).map_or(tokens.len(), |it| it.index as usize)
        };

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        if depth > 0 {
                            emit(&mut builder, text, &tokens, &mut raw, next_significant(consumed));
                        }
                        builder.start_node(kind);
                        depth += 1;
                    }
                }
                Event::Finish => {
                    depth -= 1;
                    if depth == 0 {
                        emit(&mut builder, text, &tokens, &mut raw, tokens.len());
                    }
                    builder.finish_node();
                }
                Event::Token => {
                    emit(&mut builder, text, &tokens, &mut raw, next_significant(consumed) + 1);
                    consumed += 1;
                }
                Event::Error { message, range } => {
                    builder.error(message, range, ErrorAnchor::Innermost);
                }
            }
        }

        builder.finish()
    }
}

/// Feeds raw tokens up to `until` into the builder, reporting lexical errors
/// against the enclosing statement.
fn emit(builder: &mut Builder, text: &str, tokens: &[Token], raw: &mut usize, until: usize) {
    while *raw < until {
        let token = tokens[*raw];
        if let Some(message) = token.kind.lex_error_message() {
            let message = match token.kind {
                SyntaxKind::BAD_CHAR => format!("{message} {:?}", &text[token.range]),
                _ => message.to_owned(),
            };
            builder.error(message, token.range, ErrorAnchor::Statement);
        }
        builder.token(token.kind, token.range);
        *raw += 1;
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token,
    Error { message: Box<str>, range: TextRange },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position, kind)
    }

    /// Drops the marker without creating a node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        let position = self.position as usize;
        if position == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None }) => {}
                _ => unreachable!(),
            }
        }
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    fn new(pos: u32, kind: SyntaxKind) -> Self {
        CompletedMarker { pos, kind }
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
