use crate::parser::Parser;

pub(crate) mod go;
pub(crate) mod template;

/// "expected X, got Y" for the current token.
pub(crate) fn expected(p: &Parser<'_>, what: &str) -> String {
    format!("expected {what}, got {}", p.peek_kind().describe())
}
