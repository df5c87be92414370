use golem_syntax::SyntaxKind::*;
use golem_syntax::ast::{self, AstNode as _};
use golem_syntax::{TextRange, TextSize};
use golem_template::{
    HostLanguage, RegionError, RegionKind, TemplateConfig, TemplateDocument, split_regions,
};

fn document(text: &str) -> TemplateDocument {
    TemplateDocument::new(text, TemplateConfig::default())
}

fn messages(doc: &TemplateDocument) -> Vec<String> {
    doc.diagnostics().iter().map(|diagnostic| diagnostic.message().to_owned()).collect()
}

#[track_caller]
fn assert_tiles(text: &str, config: &TemplateConfig) {
    let regions = split_regions(text, config);
    let mut end = TextSize::new(0);
    for region in &regions {
        assert_eq!(region.range().start(), end, "gap or overlap in {text:?}");
        assert!(!region.range().is_empty(), "empty region in {text:?}");
        end = region.range().end();

        match region.parse() {
            Some(parse) => {
                assert!(region.is_directive());
                assert_eq!(parse.root().range(), region.range(), "{text:?}");
            }
            None => assert_eq!(region.kind(), RegionKind::Host),
        }
    }
    assert_eq!(end, TextSize::of(text));
}

#[test]
fn if_else_directive_between_markup() {
    let doc = document("<p>{{if .X}}A{{else}}B{{end}}</p>");

    let kinds = doc.regions().iter().map(|region| region.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [RegionKind::Host, RegionKind::Directive, RegionKind::Host]);
    assert!(doc.diagnostics().is_empty());

    let directive = &doc.regions()[1];
    assert_eq!(directive.text(doc.text()), "{{if .X}}A{{else}}B{{end}}");
    assert_eq!(directive.range(), TextRange::new(3.into(), 29.into()));

    let parse = directive.parse().unwrap();
    let tmpl_if = parse.root().children().find_map(ast::TmplIf::cast).unwrap();
    assert_eq!(tmpl_if.else_clauses().count(), 1);
    assert!(tmpl_if.end().is_some());

    let operand =
        tmpl_if.syntax().descendants().find(|node| node.kind() == TMPL_FIELD_CHAIN).unwrap();
    assert_eq!(operand.text(), ".X");
    assert_eq!(operand.range(), TextRange::new(8.into(), 10.into()));
}

#[test]
fn missing_end_marks_the_trailing_region() {
    let doc = document("{{if .X}}no end");

    let region = doc.regions().last().unwrap();
    assert!(region.is_directive());
    assert_eq!(region.range(), TextRange::up_to(TextSize::of(doc.text())));
    assert_eq!(region.error(), Some(&RegionError::MissingEnd { end: "{{end}}".into() }));

    assert_eq!(messages(&doc), ["missing {{end}} for {{if}}"]);
}

#[test]
fn unclosed_action_marks_the_trailing_region() {
    let doc = document("<b>{{.Name");
    let region = doc.regions().last().unwrap();
    assert_eq!(region.error(), Some(&RegionError::UnclosedAction));
    assert_eq!(region.text(doc.text()), "{{.Name");
    assert_eq!(messages(&doc), ["unclosed action"]);
}

#[test]
fn missing_end_uses_configured_delimiters() {
    let config = TemplateConfig::new("<%", "%>", HostLanguage::Text).unwrap();
    let doc = TemplateDocument::new("<%if .X%>", config);
    assert_eq!(messages(&doc), ["missing <%end%> for <%if%>"]);

    let region = &doc.regions()[0];
    let missing_end = RegionError::MissingEnd { end: "<%end%>".into() };
    assert_eq!(region.error(), Some(&missing_end));
    assert!(missing_end.is_reported_by(region.parse().unwrap()));
    assert!(!RegionError::UnclosedAction.is_reported_by(region.parse().unwrap()));
}

#[test]
fn lookups_use_document_offsets() {
    let doc = document("<ul>{{range .Items}}<li>{{.Name}}</li>{{end}}</ul>");
    assert_eq!(doc.directives().count(), 1);

    let host = doc.region_at(2.into()).unwrap();
    assert_eq!(host.kind(), RegionKind::Host);
    assert!(doc.node_at(2.into()).is_none());

    let offset = TextSize::of("<ul>{{range .Items}}<li>{{.Na");
    let node = doc.node_at(offset).unwrap();
    assert_eq!(node.kind(), TMPL_FIELD_CHAIN);
    assert_eq!(node.text(), ".Name");

    let at_end = doc.region_at(TextSize::of(doc.text())).unwrap();
    assert_eq!(at_end.text(doc.text()), "</ul>");
}

#[test]
fn custom_delimiters_and_text_host() {
    let config = TemplateConfig::new("<%", "%>", HostLanguage::Text).unwrap();
    let doc = TemplateDocument::new("<!-- <% .X %> -->{{ .Y }}", config);

    let directives = doc.directives().map(|region| region.text(doc.text())).collect::<Vec<_>>();
    assert_eq!(directives, ["<% .X %>"]);
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn regions_tile_any_document() {
    const FRAGMENTS: &[&str] = &[
        "{{", "}}", "{{- ", " -}}", "if ", "else", "end", "range ", "with ", "define ", "\"n\"",
        ".X", "$x := ", "|", "(", ")", "<p>", "</p>", "<!--", "-->", " ", "\n", "text", "\"",
        "/*", "*/",
    ];

    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state as usize
    };

    let configs = [
        TemplateConfig::default(),
        TemplateConfig { host: HostLanguage::Text, ..TemplateConfig::default() },
    ];
    for round in 0..300 {
        let len = next() % 30;
        let text = (0..len).map(|_| FRAGMENTS[next() % FRAGMENTS.len()]).collect::<String>();
        assert_tiles(&text, &configs[round % configs.len()]);
    }
    assert_tiles("", &configs[0]);
}
