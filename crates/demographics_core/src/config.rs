//! Normalizer configuration: per-category label formats and the fallback label.

use crate::category::{CategoryKind, CategoryMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How raw classifier labels are turned into display labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// Upper-case the first character of every whitespace-delimited word.
    #[default]
    Capitalized,
    /// Pass the label through untouched.
    Verbatim,
}

impl LabelFormat {
    pub fn apply(self, raw: &str) -> String {
        match self {
            LabelFormat::Capitalized => capitalize_words(raw),
            LabelFormat::Verbatim => raw.to_string(),
        }
    }
}

fn capitalize_words(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Configuration for the distribution normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub formats: CategoryMap<LabelFormat>,
    /// Label used for the primary of an empty distribution.
    pub fallback_label: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            formats: CategoryMap::from_fn(|kind| match kind {
                CategoryKind::Race | CategoryKind::Sex => LabelFormat::Capitalized,
                CategoryKind::AgeRange => LabelFormat::Verbatim,
            }),
            fallback_label: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl NormalizerConfig {
    pub fn format_for(&self, kind: CategoryKind) -> LabelFormat {
        *self.formats.get(kind)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::debug!("loaded normalizer config from {}", path.display());
        Ok(cfg)
    }
}
