use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use dashmap::DashMap;

/// Where Go packages are looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoEnvironment {
    pub sdk_home: Option<Utf8PathBuf>,
    pub gopath: Vec<Utf8PathBuf>,
}

impl GoEnvironment {
    /// Reads `GOROOT` and `GOPATH`. Entries that are empty or not UTF-8 are
    /// skipped.
    pub fn from_env() -> Self {
        let sdk_home = std::env::var("GOROOT")
            .ok()
            .filter(|home| !home.is_empty())
            .map(Utf8PathBuf::from);

        let gopath = std::env::var_os("GOPATH")
            .map(|paths| {
                std::env::split_paths(&paths)
                    .filter_map(|path| Utf8PathBuf::from_path_buf(path).ok())
                    .filter(|path| !path.as_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(?sdk_home, ?gopath, "read Go environment");
        Self { sdk_home, gopath }
    }

    /// Source roots in lookup order: the SDK first, then every GOPATH entry.
    pub fn source_roots(&self) -> Vec<Utf8PathBuf> {
        self.sdk_home
            .iter()
            .chain(&self.gopath)
            .map(|root| root.join("src"))
            .collect()
    }
}

/// Candidate import directories per file name, computed on first request and
/// shared between threads.
#[derive(Debug, Default)]
pub struct ImportLookupCache {
    environment: GoEnvironment,
    entries: DashMap<String, Arc<[Utf8PathBuf]>>,
}

impl ImportLookupCache {
    pub fn new(environment: GoEnvironment) -> Self {
        Self { environment, entries: DashMap::new() }
    }

    pub fn environment(&self) -> &GoEnvironment {
        &self.environment
    }

    /// Directories an import in `file_name` may resolve against.
    pub fn lookup_dirs(&self, file_name: &str) -> Arc<[Utf8PathBuf]> {
        if let Some(dirs) = self.entries.get(file_name) {
            tracing::trace!(file_name, "import lookup cache hit");
            return Arc::clone(&dirs);
        }

        let entry = self.entries.entry(file_name.to_owned()).or_insert_with(|| {
            tracing::trace!(file_name, "import lookup cache miss");
            self.environment.source_roots().into()
        });
        Arc::clone(&entry)
    }

    /// Same as [`Self::lookup_dirs`], keyed by the file name of `path`.
    pub fn lookup_dirs_for(&self, path: &Utf8Path) -> Arc<[Utf8PathBuf]> {
        self.lookup_dirs(path.file_name().unwrap_or(path.as_str()))
    }

    /// First lookup directory containing `import_path` as a directory.
    pub fn resolve(&self, file_name: &str, import_path: &str) -> Option<Utf8PathBuf> {
        self.lookup_dirs(file_name)
            .iter()
            .map(|dir| dir.join(import_path))
            .find(|candidate| candidate.is_dir())
    }

    /// Replaces the environment and drops every cached entry.
    pub fn set_environment(&mut self, environment: GoEnvironment) {
        self.environment = environment;
        self.invalidate();
    }

    pub fn invalidate(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
