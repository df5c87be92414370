//! Splits mixed host/template documents into regions and parses every
//! directive region with the template grammar.

mod config;
mod document;
mod file_kind;
mod region;

pub use config::{ConfigError, TemplateConfig};
pub use document::TemplateDocument;
pub use file_kind::FileKind;
pub use golem_tokenizer::{Delimiters, HostLanguage};
pub use region::{Region, RegionError, RegionKind, split_regions};
