use super::{AstNode, child, children, token};
use crate::SyntaxKind::{self, *};
use crate::{SyntaxNode, SyntaxToken};

ast_node! {
    SourceFile => SOURCE_FILE,
    PackageClause => PACKAGE_CLAUSE,
    ImportDecl => IMPORT_DECL,
    ImportSpec => IMPORT_SPEC,
    FuncDecl => FUNC_DECL,
    ParamList => PARAM_LIST,
    Param => PARAM,
    TypeDecl => TYPE_DECL,
    TypeSpec => TYPE_SPEC,
    VarDecl => VAR_DECL,
    VarSpec => VAR_SPEC,
    ConstDecl => CONST_DECL,
    ConstSpec => CONST_SPEC,
    /// Identifier introduced by a declaration.
    Name => NAME,
    Block => BLOCK,
    ExprStmt => EXPR_STMT,
    ReturnStmt => RETURN_STMT,
    IfStmt => IF_STMT,
    ForStmt => FOR_STMT,
    Literal => LITERAL,
    NameRef => NAME_REF,
    BinaryExpr => BINARY_EXPR,
    UnaryExpr => UNARY_EXPR,
    CallExpr => CALL_EXPR,
    ArgList => ARG_LIST,
}

impl<'a> SourceFile<'a> {
    pub fn package_clause(self) -> Option<PackageClause<'a>> {
        child(self.0)
    }

    pub fn imports(self) -> impl Iterator<Item = ImportDecl<'a>> + 'a {
        children(self.0)
    }

    pub fn funcs(self) -> impl Iterator<Item = FuncDecl<'a>> + 'a {
        children(self.0)
    }

    /// Every top-level declaration node, in source order.
    pub fn decls(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0
            .children()
            .filter(|node| node.kind().is_declaration() && node.kind() != PACKAGE_CLAUSE)
    }
}

impl<'a> PackageClause<'a> {
    pub fn name(self) -> Option<Name<'a>> {
        child(self.0)
    }
}

impl<'a> Name<'a> {
    pub fn ident(self) -> Option<SyntaxToken<'a>> {
        token(self.0, IDENT)
    }

    pub fn text(self) -> &'a str {
        self.ident().map_or("", SyntaxToken::text)
    }
}

impl<'a> ImportDecl<'a> {
    pub fn specs(self) -> impl Iterator<Item = ImportSpec<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> ImportSpec<'a> {
    /// Explicit package name, including `_` and `.`.
    pub fn alias(self) -> Option<SyntaxToken<'a>> {
        child::<Name<'a>>(self.0).and_then(Name::ident).or_else(|| token(self.0, DOT))
    }

    pub fn path_token(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().find(|token| {
            matches!(
                token.kind(),
                STRING | RAW_STRING | UNTERMINATED_STRING | UNTERMINATED_RAW_STRING
            )
        })
    }

    /// Import path with its quotes removed.
    pub fn path(self) -> Option<&'a str> {
        let text = self.path_token()?.text();
        let text = text.strip_prefix(['"', '`']).unwrap_or(text);
        Some(text.strip_suffix(['"', '`']).unwrap_or(text))
    }
}

impl<'a> FuncDecl<'a> {
    pub fn name(self) -> Option<Name<'a>> {
        child(self.0)
    }

    /// Receiver parameter list for methods.
    pub fn receiver(self) -> Option<SyntaxNode<'a>> {
        self.0.first_child_of_kind(RECEIVER)
    }

    pub fn params(self) -> Option<ParamList<'a>> {
        child(self.0)
    }

    pub fn result(self) -> Option<SyntaxNode<'a>> {
        self.0.first_child_of_kind(RESULT)
    }

    pub fn body(self) -> Option<Block<'a>> {
        child(self.0)
    }
}

impl<'a> ParamList<'a> {
    pub fn params(self) -> impl Iterator<Item = Param<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Param<'a> {
    pub fn name(self) -> Option<Name<'a>> {
        child(self.0)
    }

    /// The parameter's type node, if it was written.
    pub fn ty(self) -> Option<SyntaxNode<'a>> {
        self.0.children().find(|node| node.kind() != NAME)
    }
}

impl<'a> TypeDecl<'a> {
    pub fn specs(self) -> impl Iterator<Item = TypeSpec<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> TypeSpec<'a> {
    pub fn name(self) -> Option<Name<'a>> {
        child(self.0)
    }

    /// `type A = B` rather than `type A B`.
    pub fn is_alias(self) -> bool {
        token(self.0, EQ).is_some()
    }

    pub fn ty(self) -> Option<SyntaxNode<'a>> {
        self.0.children().find(|node| !matches!(node.kind(), NAME | TYPE_PARAM_LIST))
    }
}

impl<'a> VarDecl<'a> {
    pub fn specs(self) -> impl Iterator<Item = VarSpec<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> VarSpec<'a> {
    pub fn names(self) -> impl Iterator<Item = Name<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> ConstDecl<'a> {
    pub fn specs(self) -> impl Iterator<Item = ConstSpec<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> ConstSpec<'a> {
    pub fn names(self) -> impl Iterator<Item = Name<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Block<'a> {
    pub fn statements(self) -> impl Iterator<Item = Stmt<'a>> + 'a {
        children(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stmt<'a> {
    Expr(ExprStmt<'a>),
    Return(ReturnStmt<'a>),
    If(IfStmt<'a>),
    For(ForStmt<'a>),
    Block(Block<'a>),
    Other(SyntaxNode<'a>),
}

impl<'a> AstNode<'a> for Stmt<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        Some(match syntax.kind() {
            EXPR_STMT => Stmt::Expr(ExprStmt(syntax)),
            RETURN_STMT => Stmt::Return(ReturnStmt(syntax)),
            IF_STMT => Stmt::If(IfStmt(syntax)),
            FOR_STMT => Stmt::For(ForStmt(syntax)),
            BLOCK => Stmt::Block(Block(syntax)),
            kind if kind.is_statement() || kind == ERROR => Stmt::Other(syntax),
            _ => return None,
        })
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Stmt::Expr(it) => it.0,
            Stmt::Return(it) => it.0,
            Stmt::If(it) => it.0,
            Stmt::For(it) => it.0,
            Stmt::Block(it) => it.0,
            Stmt::Other(it) => it,
        }
    }
}

impl<'a> ExprStmt<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> ReturnStmt<'a> {
    /// Returned values, flattening an expression list.
    pub fn values(self) -> impl Iterator<Item = Expr<'a>> + 'a {
        let list = self.0.first_child_of_kind(EXPR_LIST).unwrap_or(self.0);
        children(list)
    }
}

impl<'a> IfStmt<'a> {
    /// Optional init statement before `;`.
    pub fn init(self) -> Option<SyntaxNode<'a>> {
        let semicolon = token(self.0, SEMICOLON)?;
        self.0.children().take_while(|node| node.range().end() <= semicolon.range().start()).next()
    }

    pub fn condition(self) -> Option<Expr<'a>> {
        let start = token(self.0, SEMICOLON).map(|semi| semi.range().end());
        self.0
            .children()
            .take_while(|node| node.kind() != BLOCK)
            .filter(|node| start.is_none_or(|start| node.range().start() >= start))
            .find_map(Expr::cast)
    }

    pub fn then_branch(self) -> Option<Block<'a>> {
        child(self.0)
    }

    /// Either a nested `IfStmt` or a `Block`.
    pub fn else_branch(self) -> Option<Stmt<'a>> {
        token(self.0, ELSE_KW)?;
        self.0
            .children()
            .filter(|node| matches!(node.kind(), IF_STMT | BLOCK))
            .nth(1)
            .and_then(Stmt::cast)
    }
}

impl<'a> ForStmt<'a> {
    /// `FOR_CLAUSE`, `RANGE_CLAUSE` or a bare condition.
    pub fn header(self) -> Option<SyntaxNode<'a>> {
        self.0.children().take_while(|node| node.kind() != BLOCK).next()
    }

    pub fn body(self) -> Option<Block<'a>> {
        child(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr<'a> {
    Literal(Literal<'a>),
    NameRef(NameRef<'a>),
    Binary(BinaryExpr<'a>),
    Unary(UnaryExpr<'a>),
    Call(CallExpr<'a>),
    Other(SyntaxNode<'a>),
}

const EXPR_KINDS: &[SyntaxKind] = &[
    PAREN_EXPR,
    SELECTOR_EXPR,
    INDEX_EXPR,
    SLICE_EXPR,
    TYPE_ASSERT_EXPR,
    COMPOSITE_LIT,
    FUNC_LIT,
];

impl<'a> AstNode<'a> for Expr<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        Some(match syntax.kind() {
            LITERAL => Expr::Literal(Literal(syntax)),
            NAME_REF => Expr::NameRef(NameRef(syntax)),
            BINARY_EXPR => Expr::Binary(BinaryExpr(syntax)),
            UNARY_EXPR => Expr::Unary(UnaryExpr(syntax)),
            CALL_EXPR => Expr::Call(CallExpr(syntax)),
            kind if EXPR_KINDS.contains(&kind) => Expr::Other(syntax),
            _ => return None,
        })
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Expr::Literal(it) => it.0,
            Expr::NameRef(it) => it.0,
            Expr::Binary(it) => it.0,
            Expr::Unary(it) => it.0,
            Expr::Call(it) => it.0,
            Expr::Other(it) => it,
        }
    }
}

impl<'a> Literal<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().find(|token| !token.is_trivia())
    }
}

impl<'a> NameRef<'a> {
    pub fn text(self) -> &'a str {
        token(self.0, IDENT).map_or("", SyntaxToken::text)
    }
}

impl<'a> BinaryExpr<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        self.0.children().next().and_then(Expr::cast)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().find(|token| !token.is_trivia())
    }

    pub fn rhs(self) -> Option<Expr<'a>> {
        let op = self.op()?;
        self.0.children().find(|node| node.range().start() >= op.range().end()).and_then(Expr::cast)
    }
}

impl<'a> UnaryExpr<'a> {
    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().find(|token| !token.is_trivia())
    }

    pub fn operand(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> CallExpr<'a> {
    pub fn callee(self) -> Option<Expr<'a>> {
        self.0.children().next().and_then(Expr::cast)
    }

    pub fn args(self) -> Option<ArgList<'a>> {
        child(self.0)
    }
}

impl<'a> ArgList<'a> {
    pub fn args(self) -> impl Iterator<Item = Expr<'a>> + 'a {
        children(self.0)
    }
}
