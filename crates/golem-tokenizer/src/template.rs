use std::fmt;
use std::str::FromStr;

use golem_syntax::SyntaxKind::{self, *};
use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::Token;
use crate::cursor::Cursor;
use crate::literals;

/// The opening and closing markers of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiters {
    left: Box<str>,
    right: Box<str>,
}

impl Delimiters {
    /// Returns `None` when either marker is empty.
    pub fn new(left: &str, right: &str) -> Option<Self> {
        (!left.is_empty() && !right.is_empty())
            .then(|| Self { left: left.into(), right: right.into() })
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { left: "{{".into(), right: "}}".into() }
    }
}

/// The markup a template is embedded in. Decides which host constructs hide
/// delimiters from the template tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostLanguage {
    /// Delimiters inside `<!-- ... -->` do not open a directive.
    #[default]
    Html,
    /// Every delimiter opens a directive.
    Text,
}

impl HostLanguage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
        }
    }

    /// Byte length of the host comment at the start of `text` if it opens one.
    /// An unclosed comment runs to the end of `text`.
    fn comment_len(self, text: &str) -> Option<usize> {
        match self {
            Self::Html => {
                let body = text.strip_prefix("<!--")?;
                Some(body.find("-->").map_or(text.len(), |end| 4 + end + 3))
            }
            Self::Text => None,
        }
    }

    fn comment_opener(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("<!--"),
            Self::Text => None,
        }
    }
}

impl fmt::Display for HostLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown host language `{0}`, expected `html` or `text`")]
pub struct UnknownHostLanguage(pub String);

impl FromStr for HostLanguage {
    type Err = UnknownHostLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" => Ok(Self::Text),
            _ => Err(UnknownHostLanguage(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Text,
    Action,
}

fn is_trim_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Tokenizer for template documents.
///
/// Outside directives it yields `TEXT` (and `WHITESPACE` swallowed by trim
/// markers); between `LEFT_DELIM` and `RIGHT_DELIM` it yields the tokens of
/// the directive language.
pub struct TemplateTokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    delimiters: &'a Delimiters,
    host: HostLanguage,
    mode: Mode,
    trim_after: bool,
}

impl<'a> TemplateTokenizer<'a> {
    pub fn new(text: &'a str, delimiters: &'a Delimiters, host: HostLanguage) -> Self {
        Self::with_range(text, TextRange::up_to(TextSize::of(text)), delimiters, host)
    }

    /// Tokenizes only `range` of `text`, starting outside any directive.
    pub fn with_range(
        text: &'a str,
        range: TextRange,
        delimiters: &'a Delimiters,
        host: HostLanguage,
    ) -> Self {
        Self {
            text,
            cursor: Cursor::new(&text[range], range.start()),
            delimiters,
            host,
            mode: Mode::Text,
            trim_after: false,
        }
    }

    /// `true` while the next token is inside a directive.
    pub fn in_action(&self) -> bool {
        self.mode == Mode::Action
    }

    fn token(&mut self, kind: SyntaxKind) -> Token {
        let range = TextRange::new(self.cursor.token_start(), self.cursor.offset());
        self.cursor.reset_pos_within_token();
        Token::new(kind, range)
    }

    /// Byte length of the left delimiter at the start of `rest`, including a
    /// trim marker, and whether it trims.
    fn left_delimiter_at(&self, rest: &str) -> Option<(usize, bool)> {
        let after = rest.strip_prefix(self.delimiters.left())?;
        let left = self.delimiters.left().len();
        let mut chars = after.chars();
        match (chars.next(), chars.next()) {
            (Some('-'), Some(c)) if is_trim_space(c) => Some((left + 1, true)),
            _ => Some((left, false)),
        }
    }

    /// Position of the next left delimiter in `rest` that is not hidden by a
    /// host comment.
    fn find_left_delimiter(&self, rest: &str) -> Option<usize> {
        let left = self.delimiters.left();
        let mut from = 0;
        loop {
            let delimiter = rest[from..].find(left).map(|index| from + index);
            let comment = self
                .host
                .comment_opener()
                .and_then(|opener| rest[from..].find(opener))
                .map(|index| from + index);

            match (delimiter, comment) {
                (Some(delimiter), Some(comment)) if comment < delimiter => {
                    from = comment + self.host.comment_len(&rest[comment..]).unwrap_or(1);
                }
                (None, Some(comment)) => {
                    from = comment + self.host.comment_len(&rest[comment..]).unwrap_or(1);
                    if from >= rest.len() {
                        return None;
                    }
                }
                (delimiter, _) => return delimiter,
            }
        }
    }

    fn text_token(&mut self) -> SyntaxKind {
        let rest = self.cursor.as_str();

        if std::mem::take(&mut self.trim_after) && rest.starts_with(is_trim_space) {
            self.cursor.advance_while(is_trim_space);
            return WHITESPACE;
        }

        if let Some((len, _)) = self.left_delimiter_at(rest) {
            self.cursor.advance_bytes(len);
            self.mode = Mode::Action;
            return LEFT_DELIM;
        }

        let Some(index) = self.find_left_delimiter(rest) else {
            self.cursor.advance_bytes(rest.len());
            return TEXT;
        };

        let trims = self.left_delimiter_at(&rest[index..]).is_some_and(|(_, trims)| trims);
        if trims {
            let text = rest[..index].trim_end_matches(is_trim_space);
            if text.is_empty() {
                self.cursor.advance_bytes(index);
                return WHITESPACE;
            }
            self.cursor.advance_bytes(text.len());
            return TEXT;
        }

        self.cursor.advance_bytes(index);
        TEXT
    }

    fn right_delimiter_len(&self, rest: &str) -> Option<usize> {
        let right = self.delimiters.right();
        if rest.starts_with(right) {
            return Some(right.len());
        }
        rest.strip_prefix('-')
            .filter(|after| after.starts_with(right) && is_trim_space(self.cursor.previous()))
            .map(|_| right.len() + 1)
    }

    fn action_token(&mut self) -> SyntaxKind {
        let rest = self.cursor.as_str();
        if let Some(len) = self.right_delimiter_len(rest) {
            self.trim_after = len > self.delimiters.right().len();
            self.cursor.advance_bytes(len);
            self.mode = Mode::Text;
            return RIGHT_DELIM;
        }

        let cursor = &mut self.cursor;
        let first = cursor.advance();
        match first {
            c if is_trim_space(c) => {
                cursor.advance_while(is_trim_space);
                WHITESPACE
            }
            '/' if cursor.peek() == '*' => {
                cursor.advance();
                loop {
                    if cursor.is_eof() {
                        break UNTERMINATED_COMMENT;
                    }
                    if cursor.advance() == '*' && cursor.eat('/') {
                        break BLOCK_COMMENT;
                    }
                }
            }
            '"' => {
                if literals::quoted(cursor, '"') { STRING } else { UNTERMINATED_STRING }
            }
            '\'' => {
                if literals::quoted(cursor, '\'') { RUNE } else { UNTERMINATED_RUNE }
            }
            '`' => {
                if literals::raw(cursor) { RAW_STRING } else { UNTERMINATED_RAW_STRING }
            }
            '0'..='9' => literals::number(cursor, first),
            '+' | '-' if cursor.peek().is_ascii_digit() => {
                let next = cursor.advance();
                literals::number(cursor, next)
            }
            '.' if cursor.peek().is_ascii_digit() => literals::number(cursor, first),
            '.' if literals::is_ident_start(cursor.peek()) => {
                cursor.advance_while(literals::is_ident_continue);
                FIELD
            }
            '.' => DOT,
            '$' => {
                cursor.advance_while(literals::is_ident_continue);
                VARIABLE
            }
            '|' if cursor.eat('|') => LOGIC_OP,
            '|' => PIPE,
            '&' if cursor.eat('&') => LOGIC_OP,
            '!' if cursor.eat('=') => COMPARE_OP,
            '!' => LOGIC_OP,
            '=' if cursor.eat('=') => COMPARE_OP,
            '=' => EQ,
            '<' | '>' => {
                cursor.eat('=');
                COMPARE_OP
            }
            ':' if cursor.eat('=') => COLON_EQ,
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            ',' => COMMA,
            c if literals::is_ident_start(c) => {
                cursor.advance_while(literals::is_ident_continue);
                let word = &self.text[TextRange::new(cursor.token_start(), cursor.offset())];
                match word {
                    "eq" | "ne" | "lt" | "le" | "gt" | "ge" => COMPARE_OP,
                    "and" | "or" | "not" => LOGIC_OP,
                    _ => SyntaxKind::from_template_keyword(word).unwrap_or(IDENT),
                }
            }
            _ => BAD_CHAR,
        }
    }
}

impl Iterator for TemplateTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }
        let kind = match self.mode {
            Mode::Text => self.text_token(),
            Mode::Action => self.action_token(),
        };
        Some(self.token(kind))
    }
}
