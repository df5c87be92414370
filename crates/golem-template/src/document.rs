use golem_errors::Diagnostic;
use golem_syntax::{SyntaxNode, TextSize};

use crate::{Region, TemplateConfig, split_regions};

/// A template document split into regions, with every directive parsed.
///
/// All ranges, in regions and in their trees, are offsets into [`Self::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    text: Box<str>,
    config: TemplateConfig,
    regions: Vec<Region>,
}

impl TemplateDocument {
    pub fn new(text: impl Into<Box<str>>, config: TemplateConfig) -> Self {
        let text = text.into();
        let regions = split_regions(&text, &config);
        Self { text, config, regions }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn directives(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|region| region.is_directive())
    }

    /// The region containing `offset`. The end of the document belongs to the
    /// last region.
    pub fn region_at(&self, offset: TextSize) -> Option<&Region> {
        let index = self.regions.partition_point(|region| region.range().end() <= offset);
        self.regions
            .get(index)
            .or_else(|| self.regions.last().filter(|region| region.range().end() == offset))
    }

    /// Innermost template node around `offset`, or `None` outside directives.
    pub fn node_at(&self, offset: TextSize) -> Option<SyntaxNode<'_>> {
        let mut node = self.region_at(offset)?.parse()?.root();
        while let Some(child) = node.children().find(|child| child.range().contains(offset)) {
            node = child;
        }
        Some(node)
    }

    /// Region errors followed by the parse errors of each directive, in
    /// document order of the regions. A region error the directive's own
    /// parse already reports is left out.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for region in &self.regions {
            let parse = region.parse();
            let error =
                region.error().filter(|error| !parse.is_some_and(|it| error.is_reported_by(it)));
            if let Some(error) = error {
                diagnostics.push(Diagnostic::error(error.to_string(), region.range()));
            }
            if let Some(parse) = parse {
                diagnostics.extend(parse.errors().iter().map(Diagnostic::from));
            }
        }
        diagnostics
    }
}
