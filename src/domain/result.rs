//! Analysis results as returned by the external service.
//!
//! The client interprets these but never validates them. Every field is
//! read leniently: a missing, null or mistyped field only leaves its typed
//! view empty. The payload as received is kept and is what gets serialized.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Closed set of classification labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Verified,
    Misinformation,
    Authentic,
    Deepfake,
    /// Absent, or anything the service returns outside the known set
    #[default]
    #[serde(other)]
    Unknown,
}

/// Which kind of analysis produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictDomain {
    Text,
    Image,
    Unknown,
}

impl Verdict {
    pub fn domain(self) -> VerdictDomain {
        match self {
            Self::Verified | Self::Misinformation => VerdictDomain::Text,
            Self::Authentic | Self::Deepfake => VerdictDomain::Image,
            Self::Unknown => VerdictDomain::Unknown,
        }
    }

    /// Positive verdicts get "safe" styling
    pub fn is_safe(self) -> bool {
        matches!(self, Self::Verified | Self::Authentic)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Verified => "VERIFIED",
            Self::Misinformation => "MISINFORMATION",
            Self::Authentic => "AUTHENTIC",
            Self::Deepfake => "DEEPFAKE",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Read `key` as `T`, treating null and type mismatches as absent
fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    object
        .get(key)
        .filter(|value| !value.is_null())
        .and_then(|value| T::deserialize(value).ok())
}

/// Entries of `object` not named in `known`
fn leftovers(object: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// A supporting citation for a text-domain verdict
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceItem {
    pub source: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
    pub published_at: Option<String>,
}

impl EvidenceItem {
    /// Non-object entries carry nothing to show and are skipped
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            source: field(object, "source"),
            url: field(object, "url"),
            snippet: field(object, "snippet"),
            published_at: field(object, "published_at"),
        })
    }
}

/// Image-domain explanation block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Explanations {
    /// Named manipulation indicators, in service order
    pub artifacts_detected: Vec<String>,
    pub notes: Option<String>,
    /// e.g. `heatmap`
    pub extra: Map<String, Value>,
}

impl Explanations {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let artifacts_detected = object
            .get("artifacts_detected")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            artifacts_detected,
            notes: field(object, "notes"),
            extra: leftovers(object, &["artifacts_detected", "notes"]),
        })
    }
}

const RESULT_FIELDS: &[&str] = &[
    "verdict",
    "status",
    "confidence_score",
    "similarity_score",
    "evidence",
    "original_headline",
    "model",
    "explanations",
    "processed_at",
];

/// Verdict payload for either domain.
///
/// The public fields are a typed view for rendering. Serializing writes the
/// body exactly as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    pub status: Option<String>,
    pub confidence_score: Option<f64>,

    // Text domain
    pub similarity_score: Option<f64>,
    pub evidence: Vec<EvidenceItem>,
    pub original_headline: Option<String>,

    // Image domain
    pub model: Option<String>,
    pub explanations: Option<Explanations>,

    pub processed_at: Option<String>,

    /// Fields this client does not interpret
    pub extra: Map<String, Value>,

    raw: Value,
}

impl AnalysisResult {
    /// Build the typed view over any JSON value; never fails
    pub fn from_value(raw: Value) -> Self {
        let empty = Map::new();
        let object = raw.as_object().unwrap_or(&empty);

        let evidence = object
            .get("evidence")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(EvidenceItem::from_value).collect())
            .unwrap_or_default();

        Self {
            verdict: field(object, "verdict").unwrap_or_default(),
            status: field(object, "status"),
            confidence_score: field(object, "confidence_score"),
            similarity_score: field(object, "similarity_score"),
            evidence,
            original_headline: field(object, "original_headline"),
            model: field(object, "model"),
            explanations: object.get("explanations").and_then(Explanations::from_value),
            processed_at: field(object, "processed_at"),
            extra: leftovers(object, RESULT_FIELDS),
            raw,
        }
    }

    /// The body as received
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The verdict string as sent, even when it is outside the known set
    pub fn verdict_label(&self) -> Option<&str> {
        self.raw.get("verdict").and_then(Value::as_str)
    }

    pub fn domain(&self) -> VerdictDomain {
        self.verdict.domain()
    }

    pub fn is_safe(&self) -> bool {
        self.verdict.is_safe()
    }

    /// Detected artifacts, empty when the block is absent
    pub fn artifacts(&self) -> &[String] {
        self.explanations
            .as_ref()
            .map(|e| e.artifacts_detected.as_slice())
            .unwrap_or(&[])
    }
}

impl From<Value> for AnalysisResult {
    fn from(raw: Value) -> Self {
        Self::from_value(raw)
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
