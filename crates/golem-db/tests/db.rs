use golem_db::{File, LineCol, RootDatabase, check_file};
use golem_syntax::{SyntaxKind, TextSize};
use golem_template::{FileKind, TemplateConfig};
use salsa::Setter as _;

fn file(db: &RootDatabase, path: &str, text: &str) -> File {
    File::new(db, path.into(), text.to_owned(), TemplateConfig::default())
}

fn messages(db: &RootDatabase, file: File) -> Vec<String> {
    check_file(db, file).iter().map(|diagnostic| diagnostic.message().to_owned()).collect()
}

#[test]
fn source_files_report_parse_errors() {
    let db = RootDatabase::default();
    let main = file(&db, "main.go", "package main\nfunc f() {\nreturn 1 +\n}\n");

    assert_eq!(main.kind(&db), FileKind::Source);
    assert_eq!(messages(&db, main), ["missing operand after '+'"]);

    let offset = check_file(&db, main)[0].range().start();
    assert_eq!(main.line_col(&db, offset), LineCol { line: 2, col: 10 });
}

#[test]
fn template_files_report_region_and_parse_errors() {
    let db = RootDatabase::default();
    let page = file(&db, "views/page.gohtml", "<p>{{if .X}}no end</p>");

    assert_eq!(page.kind(&db), FileKind::Template);
    assert_eq!(messages(&db, page), ["missing {{end}} for {{if}}"]);
    assert_eq!(page.template(&db).regions().len(), 2);
}

#[test]
fn edits_are_picked_up() {
    let mut db = RootDatabase::default();
    let a = file(&db, "a.go", "package a\nvar x = \n");
    let b = file(&db, "b.go", "package b\n");

    assert_eq!(messages(&db, a), ["expected expression, got end of file"]);
    assert!(messages(&db, b).is_empty());

    a.set_text(&mut db).to("package a\nvar x = 1\n".to_owned());
    assert!(messages(&db, a).is_empty());
    assert!(messages(&db, b).is_empty());
    assert_eq!(a.parse(&db).root().kind(), SyntaxKind::SOURCE_FILE);
    assert_eq!(a.line_col(&db, TextSize::of("package a\nvar")), LineCol { line: 1, col: 3 });
}

#[test]
fn template_config_changes_reparse() {
    let mut db = RootDatabase::default();
    let page = file(&db, "page.tmpl", "[[.X]] {{.Y}}");
    assert_eq!(page.template(&db).directives().count(), 1);

    let config = TemplateConfig::new("[[", "]]", Default::default()).unwrap();
    page.set_template_config(&mut db).to(config);
    let template = page.template(&db);
    let directives =
        template.directives().map(|region| region.text(template.text())).collect::<Vec<_>>();
    assert_eq!(directives, ["[[.X]]"]);
}

#[test]
fn diagnostics_compare_by_value_across_edits() {
    let mut db = RootDatabase::default();
    let main = file(&db, "main.go", "package main\nvar x = 1 +\n");
    let before = check_file(&db, main).clone();
    assert!(!before.is_empty());

    main.set_text(&mut db).to("package main\nvar x = 1 +\n".to_owned());
    assert_eq!(check_file(&db, main), &before);
}

#[test]
fn other_files_are_not_checked() {
    let db = RootDatabase::default();
    let page = file(&db, "index.html", "<p>func ( {{if</p>");

    assert_eq!(page.kind(&db), FileKind::Other);
    assert!(check_file(&db, page).is_empty());
}
