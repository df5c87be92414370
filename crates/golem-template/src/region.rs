use golem_parse::{Parse, parse_template};
use golem_syntax::SyntaxKind::{self, *};
use golem_syntax::{TextRange, TextSize};
use golem_tokenizer::{TemplateTokenizer, Token};
use thiserror::Error;

use crate::TemplateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Markup passed through untouched.
    Host,
    /// One top-level directive, from its opener through its matching `end`.
    Directive,
}

/// Why a directive region runs into the end of the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum RegionError {
    #[error("unclosed action")]
    UnclosedAction,
    #[error("missing {end}")]
    MissingEnd { end: String },
}

impl RegionError {
    /// `true` if `parse` carries an error for the same condition, such as
    /// `missing {{end}} for {{if}}` for a missing `{{end}}`.
    pub fn is_reported_by(&self, parse: &Parse) -> bool {
        let prefix = match self {
            Self::UnclosedAction => "unclosed action".to_owned(),
            Self::MissingEnd { end } => format!("missing {end} for "),
        };
        parse.errors().iter().any(|error| error.message().starts_with(&prefix))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    range: TextRange,
    kind: RegionKind,
    parse: Option<Parse>,
    error: Option<RegionError>,
}

impl Region {
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn is_directive(&self) -> bool {
        self.kind == RegionKind::Directive
    }

    /// Template tree of a directive region, in document coordinates.
    pub fn parse(&self) -> Option<&Parse> {
        self.parse.as_ref()
    }

    pub fn error(&self) -> Option<&RegionError> {
        self.error.as_ref()
    }

    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.range]
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    InHost,
    InDirective,
}

struct Span {
    range: TextRange,
    kind: RegionKind,
    error: Option<RegionError>,
}

/// Partitions `text` into host and directive regions and parses each
/// directive region on its own.
///
/// The regions tile the document in order. An empty document has no regions.
pub fn split_regions(text: &str, config: &TemplateConfig) -> Vec<Region> {
    let regions = spans(text, config)
        .into_iter()
        .map(|span| {
            let parse = (span.kind == RegionKind::Directive)
                .then(|| parse_template(text, span.range, &config.delimiters, config.host));
            Region { range: span.range, kind: span.kind, parse, error: span.error }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        regions = regions.len(),
        directives = regions.iter().filter(|region| region.is_directive()).count(),
        "split template document"
    );
    regions
}

/// Block directives that need a matching `end`.
fn opens_block(keyword: Option<SyntaxKind>) -> bool {
    matches!(keyword, Some(IF_KW | RANGE_KW | WITH_KW | DEFINE_KW | BLOCK_KW))
}

fn spans(text: &str, config: &TemplateConfig) -> Vec<Span> {
    let tokens =
        TemplateTokenizer::new(text, &config.delimiters, config.host).collect::<Vec<Token>>();
    let trimming_right = TextSize::of(config.delimiters.right()) + TextSize::new(1);

    let mut spans = Vec::new();
    let mut push = |range: TextRange, kind, error| {
        if !range.is_empty() {
            spans.push(Span { range, kind, error });
        }
    };

    let mut state = State::InHost;
    let mut start = TextSize::new(0);
    let mut depth = 0u32;
    let mut in_action = false;

    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index];
        match state {
            State::InHost => {
                // Anything but text starts a directive: its left delimiter, or
                // the whitespace a `{{-` trims away in front of it.
                if token.kind != TEXT {
                    push(TextRange::new(start, token.range.start()), RegionKind::Host, None);
                    start = token.range.start();
                    state = State::InDirective;
                    continue;
                }
            }
            State::InDirective => match token.kind {
                LEFT_DELIM => {
                    in_action = true;
                    let keyword = tokens[index + 1..]
                        .iter()
                        .map(|token| token.kind)
                        .find(|&kind| kind != WHITESPACE);
                    if opens_block(keyword) {
                        depth += 1;
                    } else if keyword == Some(END_KW) {
                        depth = depth.saturating_sub(1);
                    }
                }
                RIGHT_DELIM => {
                    in_action = false;
                    if depth == 0 {
                        let mut end = token.range.end();
                        // `-}}` pulls the whitespace after it into the directive.
                        let trims = token.range.len() == trimming_right;
                        let trailing = tokens.get(index + 1).filter(|next| next.kind == WHITESPACE);
                        if let Some(next) = trailing.filter(|_| trims) {
                            end = next.range.end();
                            index += 1;
                        }
                        push(TextRange::new(start, end), RegionKind::Directive, None);
                        start = end;
                        state = State::InHost;
                    }
                }
                _ => {}
            },
        }
        index += 1;
    }

    let end = TextSize::of(text);
    match state {
        State::InHost => push(TextRange::new(start, end), RegionKind::Host, None),
        State::InDirective => {
            let error = if in_action {
                RegionError::UnclosedAction
            } else {
                let delimiters = &config.delimiters;
                let end = format!("{}end{}", delimiters.left(), delimiters.right());
                RegionError::MissingEnd { end }
            };
            tracing::debug!(%error, "directive region runs to the end of the document");
            push(TextRange::new(start, end), RegionKind::Directive, Some(error));
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(text: &str) -> Vec<(RegionKind, &str)> {
        spans(text, &TemplateConfig::default())
            .into_iter()
            .map(|span| (span.kind, &text[span.range]))
            .collect()
    }

    #[test]
    fn block_directives_span_to_their_end() {
        assert_eq!(
            regions("<p>{{if .X}}A{{else}}B{{end}}</p>"),
            [
                (RegionKind::Host, "<p>"),
                (RegionKind::Directive, "{{if .X}}A{{else}}B{{end}}"),
                (RegionKind::Host, "</p>"),
            ]
        );
    }

    #[test]
    fn nested_blocks_stay_in_one_region() {
        assert_eq!(
            regions("{{range .Xs}}{{with .Y}}{{.}}{{end}}{{end}}{{.Z}}"),
            [
                (RegionKind::Directive, "{{range .Xs}}{{with .Y}}{{.}}{{end}}{{end}}"),
                (RegionKind::Directive, "{{.Z}}"),
            ]
        );
    }

    #[test]
    fn trim_markers_move_whitespace_into_the_directive() {
        assert_eq!(
            regions("a \n {{- .X -}} \n b"),
            [
                (RegionKind::Host, "a"),
                (RegionKind::Directive, " \n {{- .X -}} \n "),
                (RegionKind::Host, "b"),
            ]
        );
    }

    #[test]
    fn html_comments_hide_delimiters() {
        assert_eq!(
            regions("<!-- {{if}} -->{{.X}}"),
            [(RegionKind::Host, "<!-- {{if}} -->"), (RegionKind::Directive, "{{.X}}")]
        );
    }

    #[test]
    fn unterminated_directives_report_why() {
        let errors =
            |text| spans(text, &TemplateConfig::default()).pop().and_then(|span| span.error);
        let missing_end = RegionError::MissingEnd { end: "{{end}}".into() };
        assert_eq!(errors("x {{.X"), Some(RegionError::UnclosedAction));
        assert_eq!(errors("{{if .X}}no end"), Some(missing_end));
        assert_eq!(errors("{{if .X}}{{end}}"), None);
    }

    #[test]
    fn empty_document_has_no_regions() {
        assert!(regions("").is_empty());
    }
}
