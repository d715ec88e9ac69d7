//! Intake of the classifier response.
//!
//! Parsing is lenient: any probability that is not a finite number becomes
//! `0.0` and is logged at debug level. Missing categories become empty
//! distributions. Only text that is not JSON at all is an error.

use crate::category::{CategoryKind, CategoryMap};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Label to probability mapping for one category, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDistribution {
    entries: Vec<(String, f64)>,
}

impl RawDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, p)| (label.as_str(), *p))
    }

    /// Lenient construction from a JSON value. Non-objects yield an empty
    /// distribution.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            Value::Null => Self::default(),
            other => {
                tracing::debug!("distribution is not an object ({other}); treating as empty");
                Self::default()
            }
        }
    }

    fn from_json_map(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(label, value)| (label.clone(), lenient_probability(label, value)))
            .collect()
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for RawDistribution {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        for (label, p) in iter {
            let label = label.into();
            let p = if p.is_finite() { p } else { 0.0 };
            // later duplicates overwrite in place, like a JSON object
            match entries.iter_mut().find(|(existing, _)| *existing == label) {
                Some(slot) => slot.1 = p,
                None => entries.push((label, p)),
            }
        }
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for RawDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for RawDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, p) in &self.entries {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

fn lenient_probability(label: &str, value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() => p,
        _ => {
            tracing::debug!("non-numeric probability for {label:?} ({value}); using 0");
            0.0
        }
    }
}

/// The three distributions produced for one subject image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub race: RawDistribution,
    #[serde(default)]
    pub age: RawDistribution,
    #[serde(default)]
    pub gender: RawDistribution,
}

impl AnalysisResult {
    pub fn distribution(&self, kind: CategoryKind) -> &RawDistribution {
        match kind {
            CategoryKind::Race => &self.race,
            CategoryKind::AgeRange => &self.age,
            CategoryKind::Sex => &self.gender,
        }
    }

    pub fn distributions(&self) -> CategoryMap<&RawDistribution> {
        CategoryMap::from_fn(|kind| self.distribution(kind))
    }

    /// Lenient construction from the `data` object of the response.
    pub fn from_json(value: &Value) -> Self {
        let field = |kind: CategoryKind| {
            value
                .get(kind.payload_key())
                .map(RawDistribution::from_json)
                .unwrap_or_default()
        };
        Self {
            race: field(CategoryKind::Race),
            age: field(CategoryKind::AgeRange),
            gender: field(CategoryKind::Sex),
        }
    }

    /// Content digest identifying this result. Equal content, equal key.
    pub fn fingerprint(&self) -> ResultFingerprint {
        let mut hasher = Sha256::new();
        for (kind, dist) in self.distributions().iter() {
            hasher.update(kind.payload_key().as_bytes());
            hasher.update((dist.len() as u64).to_le_bytes());
            for (label, p) in dist.iter() {
                hasher.update((label.len() as u64).to_le_bytes());
                hasher.update(label.as_bytes());
                hasher.update(p.to_bits().to_le_bytes());
            }
        }
        ResultFingerprint(hasher.finalize().into())
    }
}

/// Stable identity of an [`AnalysisResult`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultFingerprint([u8; 32]);

impl fmt::Display for ResultFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ResultFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultFingerprint({})", &hex::encode(self.0)[..12])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read payload {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The classifier response envelope, `{ "data": { race, age, gender } }`.
pub struct AnalysisPayload;

impl AnalysisPayload {
    /// Returns `Ok(None)` when the envelope's `data` is absent or falsy
    /// (`null`, `false`, `0`, `""`). Any other `data` opens the view, with
    /// categories it does not carry left empty.
    pub fn from_json(text: &str) -> Result<Option<AnalysisResult>, PayloadError> {
        let envelope: Value = serde_json::from_str(text)?;
        match envelope.get("data") {
            Some(data) if is_truthy(data) => Ok(Some(AnalysisResult::from_json(data))),
            _ => {
                tracing::info!("classifier response carries no analysis data");
                Ok(None)
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Option<AnalysisResult>, PayloadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PayloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
