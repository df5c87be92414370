use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use golem_db::{GoEnvironment, ImportLookupCache};

fn environment() -> GoEnvironment {
    GoEnvironment {
        sdk_home: Some("/usr/local/go".into()),
        gopath: vec!["/home/gopher/go".into(), "/work".into()],
    }
}

#[test]
fn sdk_sources_come_first() {
    let cache = ImportLookupCache::new(environment());
    let dirs = cache.lookup_dirs("main.go");
    let expected: [Utf8PathBuf; 3] =
        ["/usr/local/go/src".into(), "/home/gopher/go/src".into(), "/work/src".into()];
    assert_eq!(&*dirs, &expected);
}

#[test]
fn entries_are_cached_per_file_name() {
    let cache = ImportLookupCache::new(environment());
    let first = cache.lookup_dirs("main.go");
    let second = cache.lookup_dirs_for(Utf8Path::new("cmd/tool/main.go"));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    cache.lookup_dirs("util.go");
    assert_eq!(cache.len(), 2);

    cache.invalidate();
    assert!(cache.is_empty());
}

#[test]
fn changing_the_environment_invalidates() {
    let mut cache = ImportLookupCache::new(environment());
    cache.lookup_dirs("main.go");

    cache.set_environment(GoEnvironment { sdk_home: None, gopath: vec!["/other".into()] });
    assert!(cache.is_empty());
    assert_eq!(&*cache.lookup_dirs("main.go"), [Utf8PathBuf::from("/other/src")]);
}

#[test]
fn concurrent_lookups_share_one_entry() {
    let cache = Arc::new(ImportLookupCache::new(environment()));
    let handles = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.lookup_dirs("shared.go"))
        })
        .collect::<Vec<_>>();

    let results = handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>();
    assert!(results.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(cache.len(), 1);
}

#[test]
fn resolves_against_existing_directories() {
    let root = Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .unwrap()
        .join(format!("golem-imports-{}", std::process::id()));
    std::fs::create_dir_all(root.join("src/example.com/lib")).unwrap();

    let cache =
        ImportLookupCache::new(GoEnvironment { sdk_home: None, gopath: vec![root.clone()] });
    let resolved = cache.resolve("main.go", "example.com/lib");
    assert_eq!(resolved, Some(root.join("src/example.com/lib")));
    assert_eq!(cache.resolve("main.go", "example.com/missing"), None);

    std::fs::remove_dir_all(&root).unwrap();
}
