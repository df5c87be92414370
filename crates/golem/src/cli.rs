use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use golem_template::{HostLanguage, TemplateConfig};

#[derive(Parser)]
#[command(version, about = "Syntax front end for Go sources and Go templates")]
pub(crate) struct Options {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[command(flatten)]
    pub(crate) template: TemplateOptions,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Report syntax errors.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Print the syntax tree of a file.
    Tree { path: Utf8PathBuf },
}

#[derive(Args)]
pub(crate) struct TemplateOptions {
    /// TOML file with `left_delimiter`, `right_delimiter` and `host`.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,
    #[arg(long, global = true)]
    left_delim: Option<String>,
    #[arg(long, global = true)]
    right_delim: Option<String>,
    /// `html` or `text`.
    #[arg(long, global = true)]
    host: Option<HostLanguage>,
}

impl TemplateOptions {
    /// Flags override the config file, which overrides the defaults.
    pub(crate) fn resolve(&self) -> anyhow::Result<TemplateConfig> {
        let base = match &self.config {
            Some(path) => TemplateConfig::load(path)?,
            None => TemplateConfig::default(),
        };

        let left = self.left_delim.as_deref().unwrap_or(base.delimiters.left());
        let right = self.right_delim.as_deref().unwrap_or(base.delimiters.right());
        let host = self.host.unwrap_or(base.host);
        Ok(TemplateConfig::new(left, right, host)?)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn verify_cli() {
        Options::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let options = Options::try_parse_from([
            "golem",
            "check",
            "a.tmpl",
            "--left-delim",
            "[[",
            "--right-delim",
            "]]",
            "--host",
            "text",
        ])
        .unwrap();
        let config = options.template.resolve().unwrap();
        assert_eq!(config.delimiters.left(), "[[");
        assert_eq!(config.delimiters.right(), "]]");
        assert_eq!(config.host, HostLanguage::Text);
        assert!(matches!(options.command, Command::Check { paths } if paths == ["a.tmpl"]));
    }

    #[test]
    fn invalid_flags_are_errors() {
        let options =
            Options::try_parse_from(["golem", "tree", "a.tmpl", "--left-delim", "}}"]).unwrap();
        assert!(options.template.resolve().is_err());
        assert!(Options::try_parse_from(["golem", "tree", "a.tmpl", "--host", "xml"]).is_err());
    }
}
