#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    WHITESPACE,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    DOT,
    ELLIPSIS,
    SEMICOLON,
    COLON,

    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    SHL,
    SHR,
    AMP_CARET,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    AMP_CARET_EQ,
    AMP_AMP,
    PIPE_PIPE,
    ARROW,
    PLUS_PLUS,
    MINUS_MINUS,
    EQ_EQ,
    NEQ,
    LT,
    LTEQ,
    GT,
    GTEQ,
    EQ,
    COLON_EQ,
    BANG,
    TILDE,

    BREAK_KW,
    CASE_KW,
    CHAN_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DEFER_KW,
    ELSE_KW,
    FALLTHROUGH_KW,
    FOR_KW,
    FUNC_KW,
    GO_KW,
    GOTO_KW,
    IF_KW,
    IMPORT_KW,
    INTERFACE_KW,
    MAP_KW,
    PACKAGE_KW,
    RANGE_KW,
    RETURN_KW,
    SELECT_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPE_KW,
    VAR_KW,

    END_KW,
    WITH_KW,
    DEFINE_KW,
    TEMPLATE_KW,
    BLOCK_KW,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,

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
    UNTERMINATED_COMMENT,
    BAD_CHAR,

    TEXT,
    LEFT_DELIM,
    RIGHT_DELIM,
    FIELD,
    VARIABLE,
    COMPARE_OP,
    LOGIC_OP,

    EOF,

    SOURCE_FILE,
    PACKAGE_CLAUSE,
    IMPORT_DECL,
    IMPORT_SPEC,
    FUNC_DECL,
    RECEIVER,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    PARAM_LIST,
    PARAM,
    RESULT,
    TYPE_DECL,
    TYPE_SPEC,
    VAR_DECL,
    VAR_SPEC,
    CONST_DECL,
    CONST_SPEC,
    NAME,
    BLOCK,

    EMPTY_STMT,
    EXPR_STMT,
    ASSIGN_STMT,
    SHORT_VAR_DECL,
    INC_DEC_STMT,
    SEND_STMT,
    LABELED_STMT,
    GO_STMT,
    DEFER_STMT,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    GOTO_STMT,
    FALLTHROUGH_STMT,
    IF_STMT,
    FOR_STMT,
    FOR_CLAUSE,
    RANGE_CLAUSE,
    SWITCH_STMT,
    CASE_CLAUSE,
    SELECT_STMT,
    COMM_CLAUSE,
    DECL_STMT,

    EXPR_LIST,
    LITERAL,
    NAME_REF,
    PAREN_EXPR,
    UNARY_EXPR,
    BINARY_EXPR,
    CALL_EXPR,
    ARG_LIST,
    SELECTOR_EXPR,
    INDEX_EXPR,
    SLICE_EXPR,
    TYPE_ASSERT_EXPR,
    COMPOSITE_LIT,
    LITERAL_VALUE,
    KEYED_ELEMENT,
    FUNC_LIT,

    TYPE_NAME,
    TYPE_ARGS,
    POINTER_TYPE,
    ARRAY_TYPE,
    SLICE_TYPE,
    MAP_TYPE,
    CHAN_TYPE,
    FUNC_TYPE,
    STRUCT_TYPE,
    FIELD_DECL,
    INTERFACE_TYPE,
    METHOD_SPEC,
    TYPE_ELEM,
    PAREN_TYPE,

    TEMPLATE,
    TMPL_LIST,
    TMPL_ACTION,
    TMPL_IF,
    TMPL_RANGE,
    TMPL_WITH,
    TMPL_DEFINE,
    TMPL_BLOCK,
    TMPL_TEMPLATE,
    TMPL_ELSE,
    TMPL_END,
    TMPL_BREAK,
    TMPL_CONTINUE,
    TMPL_RETURN,
    TMPL_PIPELINE,
    TMPL_DECLARATION,
    TMPL_COMMAND,
    TMPL_FIELD_CHAIN,
    TMPL_VARIABLE,
    TMPL_FUNCTION,
    TMPL_LITERAL,
    TMPL_DOT,
    TMPL_PAREN,
    TMPL_CHAIN,

    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | NEWLINE | LINE_COMMENT | BLOCK_COMMENT | UNTERMINATED_COMMENT)
    }

    pub fn is_keyword(self) -> bool {
        (BREAK_KW as u16..=NIL_KW as u16).contains(&(self as u16))
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            INT_NUMBER
                | FLOAT_NUMBER
                | IMAGINARY_NUMBER
                | RUNE
                | STRING
                | RAW_STRING
                | UNTERMINATED_STRING
                | UNTERMINATED_RAW_STRING
                | UNTERMINATED_RUNE
        )
    }

    pub fn is_token(self) -> bool {
        (self as u16) <= EOF as u16
    }

    /// Tokens the tokenizer emits in place of a failed match.
    pub fn is_lex_error(self) -> bool {
        matches!(
            self,
            UNTERMINATED_STRING
                | UNTERMINATED_RAW_STRING
                | UNTERMINATED_RUNE
                | UNTERMINATED_COMMENT
                | BAD_CHAR
        )
    }

    pub fn lex_error_message(self) -> Option<&'static str> {
        Some(match self {
            UNTERMINATED_STRING => "unterminated string literal",
            UNTERMINATED_RAW_STRING => "unterminated raw string literal",
            UNTERMINATED_RUNE => "unterminated rune literal",
            UNTERMINATED_COMMENT => "unterminated block comment",
            BAD_CHAR => "unexpected character",
            _ => return None,
        })
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            PACKAGE_CLAUSE | IMPORT_DECL | FUNC_DECL | TYPE_DECL | VAR_DECL | CONST_DECL
        )
    }

    pub fn is_statement(self) -> bool {
        (EMPTY_STMT as u16..=DECL_STMT as u16).contains(&(self as u16))
    }

    /// Directive-level constructs of the template grammar.
    pub fn is_template_action(self) -> bool {
        (TMPL_ACTION as u16..=TMPL_RETURN as u16).contains(&(self as u16))
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "break" => BREAK_KW,
            "case" => CASE_KW,
            "chan" => CHAN_KW,
            "const" => CONST_KW,
            "continue" => CONTINUE_KW,
            "default" => DEFAULT_KW,
            "defer" => DEFER_KW,
            "else" => ELSE_KW,
            "fallthrough" => FALLTHROUGH_KW,
            "for" => FOR_KW,
            "func" => FUNC_KW,
            "go" => GO_KW,
            "goto" => GOTO_KW,
            "if" => IF_KW,
            "import" => IMPORT_KW,
            "interface" => INTERFACE_KW,
            "map" => MAP_KW,
            "package" => PACKAGE_KW,
            "range" => RANGE_KW,
            "return" => RETURN_KW,
            "select" => SELECT_KW,
            "struct" => STRUCT_KW,
            "switch" => SWITCH_KW,
            "type" => TYPE_KW,
            "var" => VAR_KW,
            _ => return None,
        })
    }

    pub fn from_template_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "if" => IF_KW,
            "else" => ELSE_KW,
            "end" => END_KW,
            "range" => RANGE_KW,
            "with" => WITH_KW,
            "define" => DEFINE_KW,
            "template" => TEMPLATE_KW,
            "block" => BLOCK_KW,
            "break" => BREAK_KW,
            "continue" => CONTINUE_KW,
            "return" => RETURN_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "nil" => NIL_KW,
            _ => return None,
        })
    }

    /// Human readable spelling used in "expected X, got Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            NEWLINE => "newline",
            LEFT_PAREN => "'('",
            RIGHT_PAREN => "')'",
            LEFT_BRACKET => "'['",
            RIGHT_BRACKET => "']'",
            LEFT_BRACE => "'{'",
            RIGHT_BRACE => "'}'",
            COMMA => "','",
            DOT => "'.'",
            ELLIPSIS => "'...'",
            SEMICOLON => "';'",
            COLON => "':'",
            PLUS => "'+'",
            MINUS => "'-'",
            STAR => "'*'",
            SLASH => "'/'",
            PERCENT => "'%'",
            AMP => "'&'",
            PIPE => "'|'",
            CARET => "'^'",
            SHL => "'<<'",
            SHR => "'>>'",
            AMP_CARET => "'&^'",
            AMP_AMP => "'&&'",
            PIPE_PIPE => "'||'",
            ARROW => "'<-'",
            PLUS_PLUS => "'++'",
            MINUS_MINUS => "'--'",
            EQ_EQ => "'=='",
            NEQ => "'!='",
            LT => "'<'",
            LTEQ => "'<='",
            GT => "'>'",
            GTEQ => "'>='",
            EQ => "'='",
            COLON_EQ => "':='",
            BANG => "'!'",
            TILDE => "'~'",
            PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ | AMP_EQ | PIPE_EQ | CARET_EQ
            | SHL_EQ | SHR_EQ | AMP_CARET_EQ => "assignment operator",
            BREAK_KW => "'break'",
            CASE_KW => "'case'",
            CHAN_KW => "'chan'",
            CONST_KW => "'const'",
            CONTINUE_KW => "'continue'",
            DEFAULT_KW => "'default'",
            DEFER_KW => "'defer'",
            ELSE_KW => "'else'",
            FALLTHROUGH_KW => "'fallthrough'",
            FOR_KW => "'for'",
            FUNC_KW => "'func'",
            GO_KW => "'go'",
            GOTO_KW => "'goto'",
            IF_KW => "'if'",
            IMPORT_KW => "'import'",
            INTERFACE_KW => "'interface'",
            MAP_KW => "'map'",
            PACKAGE_KW => "'package'",
            RANGE_KW => "'range'",
            RETURN_KW => "'return'",
            SELECT_KW => "'select'",
            STRUCT_KW => "'struct'",
            SWITCH_KW => "'switch'",
            TYPE_KW => "'type'",
            VAR_KW => "'var'",
            END_KW => "'end'",
            WITH_KW => "'with'",
            DEFINE_KW => "'define'",
            TEMPLATE_KW => "'template'",
            BLOCK_KW => "'block'",
            TRUE_KW => "'true'",
            FALSE_KW => "'false'",
            NIL_KW => "'nil'",
            IDENT => "identifier",
            INT_NUMBER | FLOAT_NUMBER | IMAGINARY_NUMBER => "number",
            RUNE | UNTERMINATED_RUNE => "rune literal",
            STRING | RAW_STRING | UNTERMINATED_STRING | UNTERMINATED_RAW_STRING => "string",
            BAD_CHAR => "invalid character",
            TEXT => "text",
            LEFT_DELIM => "left delimiter",
            RIGHT_DELIM => "right delimiter",
            FIELD => "field",
            VARIABLE => "variable",
            COMPARE_OP => "comparison",
            LOGIC_OP => "logical operator",
            EOF => "end of file",
            _ => "syntax",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_do_not_overlap() {
        assert!(IF_STMT.is_statement());
        assert!(!IF_STMT.is_declaration());
        assert!(FUNC_DECL.is_declaration());
        assert!(TMPL_IF.is_template_action());
        assert!(!TMPL_PIPELINE.is_template_action());
        assert!(NIL_KW.is_keyword());
        assert!(!IDENT.is_keyword());
        assert!(EOF.is_token());
        assert!(!SOURCE_FILE.is_token());
    }

    #[test]
    fn every_lex_error_has_a_message() {
        for kind in [
            UNTERMINATED_STRING,
            UNTERMINATED_RAW_STRING,
            UNTERMINATED_RUNE,
            UNTERMINATED_COMMENT,
            BAD_CHAR,
        ] {
            assert!(kind.is_lex_error());
            assert!(kind.lex_error_message().is_some());
        }
        assert_eq!(STRING.lex_error_message(), None);
    }

    #[test]
    fn keyword_tables() {
        assert_eq!(SyntaxKind::from_keyword("func"), Some(FUNC_KW));
        assert_eq!(SyntaxKind::from_keyword("end"), None);
        assert_eq!(SyntaxKind::from_template_keyword("end"), Some(END_KW));
        assert_eq!(SyntaxKind::from_template_keyword("func"), None);
    }
}
