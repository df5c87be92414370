//! Incremental front end: files are salsa inputs, and parsing, template
//! splitting and line indexing are tracked queries over them. Editing one file
//! only recomputes the queries that read it.

mod imports;

use camino::Utf8PathBuf;
pub use golem_errors::Diagnostic;
use golem_parse::Parse;
use golem_syntax::TextSize;
use golem_template::{FileKind, TemplateConfig, TemplateDocument};
pub use imports::{GoEnvironment, ImportLookupCache};
pub use line_index::{LineCol, LineIndex};

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    /// Used when the file is a template.
    #[returns(ref)]
    pub template_config: TemplateConfig,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked]
    pub fn kind(self, db: &dyn salsa::Database) -> FileKind {
        FileKind::from_path(self.path(db))
    }

    #[salsa::tracked(returns(ref))]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        golem_parse::parse_source(self.text(db))
    }

    #[salsa::tracked(returns(ref))]
    pub fn template(self, db: &dyn salsa::Database) -> TemplateDocument {
        TemplateDocument::new(self.text(db), self.template_config(db).clone())
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }

    /// Zero-based line and UTF-8 column of `offset`.
    pub fn line_col(self, db: &dyn salsa::Database, offset: TextSize) -> LineCol {
        self.line_index(db).line_col(offset)
    }
}

/// Syntax diagnostics of `file`, parsed as a template or as Go source
/// depending on its name. Files of any other kind are not checked.
#[salsa::tracked(returns(ref), no_eq)]
pub fn check_file(db: &dyn salsa::Database, file: File) -> Vec<Diagnostic> {
    let diagnostics = match file.kind(db) {
        FileKind::Template => file.template(db).diagnostics(),
        FileKind::Source => file.parse(db).errors().iter().map(Diagnostic::from).collect(),
        FileKind::Other => {
            tracing::debug!(path = %file.path(db), "not a Go source or template file");
            return Vec::new();
        }
    };

    tracing::debug!(path = %file.path(db), count = diagnostics.len(), "checked file");
    diagnostics
}
