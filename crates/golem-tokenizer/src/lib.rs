//! Tokenizers for Go source and for Go template directives.
//!
//! Both tokenizers are lossless: every byte of the input lands in exactly one
//! token, trivia included, and token ranges are absolute offsets into the
//! document they were created for.

mod cursor;
mod literals;
mod template;

use cursor::Cursor;
pub use golem_syntax::SyntaxKind;
use golem_syntax::SyntaxKind::*;
pub use template::{Delimiters, HostLanguage, TemplateTokenizer, UnknownHostLanguage};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Slice of `text` covered by this token. `text` is the whole document.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    Paren,
    Bracket,
    Brace,
    /// `(` directly after `var`, `const`, `type` or `import`.
    DeclParen,
}

/// Go tokenizer with automatic semicolon insertion.
///
/// A newline that terminates a statement is emitted as a `SEMICOLON` token
/// whose text is the newline itself. End of input and block comments spanning
/// a line break produce zero-length `SEMICOLON` tokens instead.
pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    groups: Vec<Group>,
    insert_semicolon: bool,
    last_significant: SyntaxKind,
    pending_semicolon: Option<TextSize>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::at(text, TextSize::new(0))
    }

    /// Starts tokenizing `text` at `offset` with a fresh lexer state.
    pub fn at(text: &'a str, offset: TextSize) -> Self {
        Self {
            text,
            cursor: Cursor::new(&text[usize::from(offset)..], offset),
            groups: Vec::new(),
            insert_semicolon: false,
            last_significant: EOF,
            pending_semicolon: None,
        }
    }

    pub fn offset(&self) -> TextSize {
        self.cursor.offset()
    }

    fn newline_terminates(&self) -> bool {
        self.insert_semicolon && !matches!(self.groups.last(), Some(Group::Paren | Group::Bracket))
    }

    fn token(&mut self, kind: SyntaxKind) -> Token {
        let range = TextRange::new(self.cursor.token_start(), self.cursor.offset());
        self.cursor.reset_pos_within_token();
        Token::new(kind, range)
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        let first = self.cursor.advance();
        match first {
            '\n' => {
                if self.newline_terminates() {
                    self.insert_semicolon = false;
                    SEMICOLON
                } else {
                    NEWLINE
                }
            }
            ' ' | '\t' | '\r' => {
                self.cursor.advance_while(|c| matches!(c, ' ' | '\t' | '\r'));
                WHITESPACE
            }
            '/' if self.cursor.peek() == '/' => {
                self.cursor.advance_while(|c| c != '\n');
                LINE_COMMENT
            }
            '/' if self.cursor.peek() == '*' => self.block_comment(),
            _ => {
                let kind = self.significant(first);
                self.track(kind);
                kind
            }
        }
    }

    fn block_comment(&mut self) -> SyntaxKind {
        self.cursor.advance();
        let mut spans_lines = false;
        loop {
            if self.cursor.is_eof() {
                return UNTERMINATED_COMMENT;
            }
            match self.cursor.advance() {
                '*' if self.cursor.eat('/') => break,
                '\n' => spans_lines = true,
                _ => {}
            }
        }
        if spans_lines && self.newline_terminates() {
            self.insert_semicolon = false;
            self.pending_semicolon = Some(self.cursor.offset());
        }
        BLOCK_COMMENT
    }

    fn significant(&mut self, first: char) -> SyntaxKind {
        let cursor = &mut self.cursor;
        match first {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ';' => SEMICOLON,
            '~' => TILDE,
            '0'..='9' => literals::number(cursor, first),
            '.' if cursor.peek().is_ascii_digit() => literals::number(cursor, first),
            '.' if cursor.peek() == '.' && cursor.second() == '.' => {
                cursor.advance();
                cursor.advance();
                ELLIPSIS
            }
            '.' => DOT,
            '"' => {
                if literals::quoted(cursor, '"') { STRING } else { UNTERMINATED_STRING }
            }
            '\'' => {
                if literals::quoted(cursor, '\'') { RUNE } else { UNTERMINATED_RUNE }
            }
            '`' => {
                if literals::raw(cursor) { RAW_STRING } else { UNTERMINATED_RAW_STRING }
            }
            ':' => {
                if cursor.eat('=') { COLON_EQ } else { COLON }
            }
            '+' => {
                if cursor.eat('+') {
                    PLUS_PLUS
                } else if cursor.eat('=') {
                    PLUS_EQ
                } else {
                    PLUS
                }
            }
            '-' => {
                if cursor.eat('-') {
                    MINUS_MINUS
                } else if cursor.eat('=') {
                    MINUS_EQ
                } else {
                    MINUS
                }
            }
            '*' => {
                if cursor.eat('=') { STAR_EQ } else { STAR }
            }
            '/' => {
                if cursor.eat('=') { SLASH_EQ } else { SLASH }
            }
            '%' => {
                if cursor.eat('=') { PERCENT_EQ } else { PERCENT }
            }
            '^' => {
                if cursor.eat('=') { CARET_EQ } else { CARET }
            }
            '=' => {
                if cursor.eat('=') { EQ_EQ } else { EQ }
            }
            '!' => {
                if cursor.eat('=') { NEQ } else { BANG }
            }
            '&' => {
                if cursor.eat('&') {
                    AMP_AMP
                } else if cursor.eat('^') {
                    if cursor.eat('=') { AMP_CARET_EQ } else { AMP_CARET }
                } else if cursor.eat('=') {
                    AMP_EQ
                } else {
                    AMP
                }
            }
            '|' => {
                if cursor.eat('|') {
                    PIPE_PIPE
                } else if cursor.eat('=') {
                    PIPE_EQ
                } else {
                    PIPE
                }
            }
            '<' => {
                if cursor.eat('<') {
                    if cursor.eat('=') { SHL_EQ } else { SHL }
                } else if cursor.eat('=') {
                    LTEQ
                } else if cursor.eat('-') {
                    ARROW
                } else {
                    LT
                }
            }
            '>' => {
                if cursor.eat('>') {
                    if cursor.eat('=') { SHR_EQ } else { SHR }
                } else if cursor.eat('=') {
                    GTEQ
                } else {
                    GT
                }
            }
            c if literals::is_ident_start(c) => {
                cursor.advance_while(literals::is_ident_continue);
                let word = &self.text[TextRange::new(cursor.token_start(), cursor.offset())];
                SyntaxKind::from_keyword(word).unwrap_or(IDENT)
            }
            _ => BAD_CHAR,
        }
    }

    /// Updates the semicolon flag and the group stack after a significant token.
    fn track(&mut self, kind: SyntaxKind) {
        match kind {
            LEFT_PAREN => {
                let opens_decl_group =
                    matches!(self.last_significant, VAR_KW | CONST_KW | TYPE_KW | IMPORT_KW);
                let group = if opens_decl_group { Group::DeclParen } else { Group::Paren };
                self.groups.push(group);
            }
            LEFT_BRACKET => self.groups.push(Group::Bracket),
            LEFT_BRACE => self.groups.push(Group::Brace),
            RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE => {
                self.groups.pop();
            }
            _ => {}
        }

        self.insert_semicolon = matches!(
            kind,
            IDENT
                | INT_NUMBER
                | FLOAT_NUMBER
                | IMAGINARY_NUMBER
                | RUNE
                | STRING
                | RAW_STRING
                | UNTERMINATED_STRING
                | UNTERMINATED_RAW_STRING
                | UNTERMINATED_RUNE
                | BREAK_KW
                | CONTINUE_KW
                | FALLTHROUGH_KW
                | RETURN_KW
                | PLUS_PLUS
                | MINUS_MINUS
                | RIGHT_PAREN
                | RIGHT_BRACKET
                | RIGHT_BRACE
        );
        self.last_significant = kind;
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(offset) = self.pending_semicolon.take() {
            return Some(Token::new(SEMICOLON, TextRange::empty(offset)));
        }

        if self.cursor.is_eof() {
            if std::mem::take(&mut self.insert_semicolon) {
                return Some(Token::new(SEMICOLON, TextRange::empty(self.cursor.offset())));
            }
            return None;
        }

        let kind = self.syntax_kind();
        Some(self.token(kind))
    }
}

/// Tokenizes all of `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SyntaxKind, &str)> {
        tokenize(text).into_iter().map(|token| (token.kind, token.text(text))).collect()
    }

    fn significant(text: &str) -> Vec<SyntaxKind> {
        tokenize(text)
            .into_iter()
            .map(|token| token.kind)
            .filter(|kind| !kind.is_trivia())
            .collect()
    }

    fn assert_tiles(text: &str) {
        let mut end = TextSize::new(0);
        for token in Tokenizer::new(text) {
            assert_eq!(token.range.start(), end, "gap before {token:?} in {text:?}");
            end = token.range.end();
        }
        assert_eq!(usize::from(end), text.len());
    }

    #[test]
    fn test_integer_literals() {
        let inputs = ["123", "0", "0b1010", "0o755", "0755", "0x1f", "0X_1F", "123_456"];

        for input in inputs {
            assert_eq!(kinds(input), [(INT_NUMBER, input), (SEMICOLON, "")], "Input: '{input}'");
        }
    }

    #[test]
    fn test_float_and_imaginary_literals() {
        let inputs = [
            ("123.456", FLOAT_NUMBER),
            ("1.", FLOAT_NUMBER),
            (".5", FLOAT_NUMBER),
            ("1e10", FLOAT_NUMBER),
            ("1.0e-5", FLOAT_NUMBER),
            ("0x1p-2", FLOAT_NUMBER),
            ("0x1.8p1", FLOAT_NUMBER),
            ("2i", IMAGINARY_NUMBER),
            ("1.5e3i", IMAGINARY_NUMBER),
        ];

        for (input, expected_kind) in inputs {
            assert_eq!(kinds(input)[0], (expected_kind, input), "Input: '{input}'");
        }
    }

    #[test]
    fn test_operators_use_longest_match() {
        assert_eq!(
            significant("a &^= b <<= c <- d ... e &^ f"),
            [
                IDENT,
                AMP_CARET_EQ,
                IDENT,
                SHL_EQ,
                IDENT,
                ARROW,
                IDENT,
                ELLIPSIS,
                IDENT,
                AMP_CARET,
                IDENT,
                SEMICOLON
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("func größe"),
            [(FUNC_KW, "func"), (WHITESPACE, " "), (IDENT, "größe"), (SEMICOLON, "")]
        );
    }

    #[test]
    fn test_newline_after_identifier_is_a_terminator() {
        assert_eq!(
            kinds("x\ny"),
            [(IDENT, "x"), (SEMICOLON, "\n"), (IDENT, "y"), (SEMICOLON, "")]
        );
    }

    #[test]
    fn test_newline_after_operator_is_whitespace() {
        assert_eq!(
            kinds("x +\ny"),
            [
                (IDENT, "x"),
                (WHITESPACE, " "),
                (PLUS, "+"),
                (NEWLINE, "\n"),
                (IDENT, "y"),
                (SEMICOLON, "")
            ]
        );
    }

    #[test]
    fn test_terminating_keywords_and_closers() {
        assert_eq!(significant("return\n"), [RETURN_KW, SEMICOLON]);
        assert_eq!(significant("i++\n"), [IDENT, PLUS_PLUS, SEMICOLON]);
        assert_eq!(significant("}\n"), [RIGHT_BRACE, SEMICOLON]);
        assert_eq!(significant("if\n"), [IF_KW]);
    }

    #[test]
    fn test_newlines_inside_parens_do_not_terminate() {
        assert_eq!(significant("f(a\n)\n"), [IDENT, LEFT_PAREN, IDENT, RIGHT_PAREN, SEMICOLON]);
    }

    #[test]
    fn test_declaration_groups_terminate_lines() {
        assert_eq!(
            significant("var (\na = 1\n)\n"),
            [VAR_KW, LEFT_PAREN, IDENT, EQ, INT_NUMBER, SEMICOLON, RIGHT_PAREN, SEMICOLON]
        );
    }

    #[test]
    fn test_braces_inside_parens_terminate_lines() {
        assert_eq!(
            significant("f(func() {\nx\n})"),
            [
                IDENT,
                LEFT_PAREN,
                FUNC_KW,
                LEFT_PAREN,
                RIGHT_PAREN,
                LEFT_BRACE,
                IDENT,
                SEMICOLON,
                RIGHT_BRACE,
                RIGHT_PAREN,
                SEMICOLON
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("x // note\n"),
            [(IDENT, "x"), (WHITESPACE, " "), (LINE_COMMENT, "// note"), (SEMICOLON, "\n")]
        );
        assert_eq!(
            kinds("x /* a\nb */y"),
            [
                (IDENT, "x"),
                (WHITESPACE, " "),
                (BLOCK_COMMENT, "/* a\nb */"),
                (SEMICOLON, ""),
                (IDENT, "y"),
                (SEMICOLON, "")
            ]
        );
        assert_eq!(
            kinds("x /* a */"),
            [(IDENT, "x"), (WHITESPACE, " "), (BLOCK_COMMENT, "/* a */"), (SEMICOLON, "")]
        );
    }

    #[test]
    fn test_strings_runes_and_raw_strings() {
        assert_eq!(kinds(r#""a\"b""#)[0], (STRING, r#""a\"b""#));
        assert_eq!(kinds(r"'\n'")[0], (RUNE, r"'\n'"));
        assert_eq!(kinds("`a\nb`")[0], (RAW_STRING, "`a\nb`"));
    }

    #[test]
    fn test_unterminated_literals_are_error_tokens() {
        assert_eq!(kinds("\"abc"), [(UNTERMINATED_STRING, "\"abc"), (SEMICOLON, "")]);
        assert_eq!(
            kinds("\"abc\nx"),
            [(UNTERMINATED_STRING, "\"abc"), (SEMICOLON, "\n"), (IDENT, "x"), (SEMICOLON, "")]
        );
        assert_eq!(kinds("`abc")[0], (UNTERMINATED_RAW_STRING, "`abc"));
        assert_eq!(kinds("'a")[0], (UNTERMINATED_RUNE, "'a"));
        assert_eq!(kinds("/* abc"), [(UNTERMINATED_COMMENT, "/* abc")]);
    }

    #[test]
    fn test_bad_characters_advance_one_char() {
        assert_eq!(kinds("a@€b")[1..3], [(BAD_CHAR, "@"), (BAD_CHAR, "€")]);
    }

    #[test]
    fn test_tokens_tile_the_input() {
        for text in [
            "",
            "package main\n\nfunc main() {\n\tprintln(\"hi\")\n}\n",
            "\"unterminated\n'x\n`raw",
            "/* open",
            "@#$%^&*()_+\u{0}\u{7f}\u{feff}日本",
            "0x 1e 1.e+ 0b_ ...",
        ] {
            assert_tiles(text);
        }
    }

    #[test]
    fn test_restart_at_offset() {
        let text = "a := 1\nb := 2\n";
        let tokens = Tokenizer::at(text, 7.into()).collect::<Vec<_>>();
        assert_eq!(tokens[0].kind, IDENT);
        assert_eq!(tokens[0].text(text), "b");
        assert_eq!(tokens.last().unwrap().range.end(), TextSize::of(text));
    }
}
