use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Character cursor over a slice of a larger document. Offsets it reports are
/// absolute in that document.
pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    end: TextSize,
    token_start: TextSize,
    previous: char,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, start: TextSize) -> Self {
        Self {
            chars: text.chars(),
            end: start + text.text_len(),
            token_start: start,
            previous: EOF_CHAR,
        }
    }

    fn remaining(&self) -> TextSize {
        TextSize::new(self.chars.as_str().len() as u32)
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.end - self.remaining()
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn previous(&self) -> char {
        self.previous
    }

    pub(crate) fn token_start(&self) -> TextSize {
        self.token_start
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.token_start = self.offset();
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.previous = self.chars.next().unwrap_or(EOF_CHAR);
        self.previous
    }

    /// Advances past `len` bytes, which must end on a char boundary.
    pub(crate) fn advance_bytes(&mut self, len: usize) {
        let target = self.chars.as_str().len() - len;
        while self.chars.as_str().len() > target {
            self.advance();
        }
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        let matched = !self.is_eof() && self.peek() == c;
        if matched {
            self.advance();
        }
        matched
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
