use golem_syntax::SyntaxKind::{self, *};

use crate::cursor::Cursor;

/// Scans the rest of a numeric literal whose first char has already been
/// consumed. `first` may be `.` when the literal starts with a fraction.
pub(crate) fn number(cursor: &mut Cursor<'_>, first: char) -> SyntaxKind {
    let mut kind = INT_NUMBER;

    if first == '.' {
        digits(cursor, false);
        exponent(cursor, ['e', 'E']);
        kind = FLOAT_NUMBER;
    } else if first == '0' && matches!(cursor.peek(), 'x' | 'X') {
        cursor.advance();
        digits(cursor, true);
        if cursor.eat('.') {
            digits(cursor, true);
            kind = FLOAT_NUMBER;
        }
        if exponent(cursor, ['p', 'P']) {
            kind = FLOAT_NUMBER;
        }
    } else if first == '0' && matches!(cursor.peek(), 'b' | 'B' | 'o' | 'O') {
        cursor.advance();
        digits(cursor, false);
    } else {
        digits(cursor, false);
        if cursor.peek() == '.' && cursor.second() != '.' {
            cursor.advance();
            digits(cursor, false);
            kind = FLOAT_NUMBER;
        }
        if exponent(cursor, ['e', 'E']) {
            kind = FLOAT_NUMBER;
        }
    }

    if cursor.eat('i') {
        kind = IMAGINARY_NUMBER;
    }

    kind
}

fn digits(cursor: &mut Cursor<'_>, allow_hex: bool) {
    loop {
        match cursor.peek() {
            '_' | '0'..='9' => {
                cursor.advance();
            }
            'a'..='f' | 'A'..='F' if allow_hex => {
                cursor.advance();
            }
            _ => return,
        }
    }
}

fn exponent(cursor: &mut Cursor<'_>, markers: [char; 2]) -> bool {
    if !markers.contains(&cursor.peek()) {
        return false;
    }
    cursor.advance();
    if matches!(cursor.peek(), '+' | '-') {
        cursor.advance();
    }
    digits(cursor, false);
    true
}

/// Scans an escaped literal up to `quote`. The opening quote has already been
/// consumed. Returns `false` when a newline or end of input came first; the
/// newline is left unconsumed.
pub(crate) fn quoted(cursor: &mut Cursor<'_>, quote: char) -> bool {
    loop {
        if cursor.is_eof() {
            return false;
        }
        match cursor.peek() {
            '\n' => return false,
            '\\' => {
                cursor.advance();
                if cursor.peek() != '\n' && !cursor.is_eof() {
                    cursor.advance();
                }
            }
            c => {
                cursor.advance();
                if c == quote {
                    return true;
                }
            }
        }
    }
}

/// Scans a raw literal up to the closing backquote, newlines included.
pub(crate) fn raw(cursor: &mut Cursor<'_>) -> bool {
    cursor.advance_while(|c| c != '`');
    cursor.eat('`')
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
