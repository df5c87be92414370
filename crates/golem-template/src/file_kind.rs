use camino::Utf8Path;

/// How a file on disk should be parsed, decided by its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A `.go` file.
    Source,
    /// `.tmpl`, `.gohtml` or `*.go.html`.
    Template,
    Other,
}

impl FileKind {
    pub fn from_path(path: &Utf8Path) -> Self {
        let Some(name) = path.file_name() else {
            return Self::Other;
        };
        if name.ends_with(".go.html") {
            return Self::Template;
        }

        match path.extension() {
            Some("go") => Self::Source,
            Some("tmpl" | "gohtml") => Self::Template,
            _ => Self::Other,
        }
    }

    pub fn is_template(self) -> bool {
        self == Self::Template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_name() {
        let cases = [
            ("main.go", FileKind::Source),
            ("cmd/server/main.go", FileKind::Source),
            ("layout.tmpl", FileKind::Template),
            ("page.gohtml", FileKind::Template),
            ("views/index.go.html", FileKind::Template),
            ("index.html", FileKind::Other),
            ("go.mod", FileKind::Other),
            ("README", FileKind::Other),
        ];

        for (path, kind) in cases {
            assert_eq!(FileKind::from_path(Utf8Path::new(path)), kind, "{path}");
        }
    }
}
