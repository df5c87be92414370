use camino::Utf8Path;
use golem_tokenizer::{Delimiters, HostLanguage, UnknownHostLanguage};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template configuration")]
    Parse(#[from] toml::de::Error),
    #[error("template delimiters must not be empty")]
    EmptyDelimiter,
    #[error("left and right delimiters are both `{0}`")]
    IdenticalDelimiters(String),
    #[error(transparent)]
    Host(#[from] UnknownHostLanguage),
}

/// How directives are recognized in a template document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TemplateConfig {
    pub delimiters: Delimiters,
    pub host: HostLanguage,
}

/// On-disk shape: a flat table, every key optional.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    left_delimiter: String,
    right_delimiter: String,
    host: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        let delimiters = Delimiters::default();
        Self {
            left_delimiter: delimiters.left().to_owned(),
            right_delimiter: delimiters.right().to_owned(),
            host: HostLanguage::default().name().to_owned(),
        }
    }
}

impl TemplateConfig {
    pub fn new(left: &str, right: &str, host: HostLanguage) -> Result<Self, ConfigError> {
        let delimiters = Delimiters::new(left, right).ok_or(ConfigError::EmptyDelimiter)?;
        if left == right {
            return Err(ConfigError::IdenticalDelimiters(left.to_owned()));
        }
        Ok(Self { delimiters, host })
    }

    /// Parses a table such as
    ///
    /// ```toml
    /// left_delimiter = "[["
    /// right_delimiter = "]]"
    /// host = "text"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let host = raw.host.parse()?;
        let config = Self::new(&raw.left_delimiter, &raw.right_delimiter, host)?;

        tracing::debug!(
            left = config.delimiters.left(),
            right = config.delimiters.right(),
            host = %config.host,
            "loaded template configuration"
        );
        Ok(config)
    }

    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_gives_defaults() {
        assert_eq!(TemplateConfig::from_toml_str("").unwrap(), TemplateConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = TemplateConfig::from_toml_str(
            "left_delimiter = \"[[\"\nright_delimiter = \"]]\"\nhost = \"Text\"\n",
        )
        .unwrap();
        assert_eq!(config.delimiters.left(), "[[");
        assert_eq!(config.delimiters.right(), "]]");
        assert_eq!(config.host, HostLanguage::Text);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TemplateConfig::from_toml_str("left_delimiter = \"\""),
            Err(ConfigError::EmptyDelimiter)
        ));
        assert!(matches!(
            TemplateConfig::from_toml_str("left_delimiter = \"%%\"\nright_delimiter = \"%%\""),
            Err(ConfigError::IdenticalDelimiters(delimiter)) if delimiter == "%%"
        ));
        assert!(matches!(
            TemplateConfig::from_toml_str("host = \"xml\""),
            Err(ConfigError::Host(_))
        ));
        assert!(matches!(
            TemplateConfig::from_toml_str("delimiters = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
