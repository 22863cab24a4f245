//! Segment (one sentence-like piece of the input) and its labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Category reported for a segment that carries no labels.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Opaque segment identifier. Rendered as `shard_<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shard_{}", self.0)
    }
}

impl FromStr for SegmentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("shard_")
            .and_then(|n| n.parse::<usize>().ok())
            .map(SegmentId)
            .ok_or_else(|| Error::InvalidSegmentId(s.to_owned()))
    }
}

impl Serialize for SegmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SegmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A detected (category, property) tag on a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub category: String,
    pub property: String,
    /// First decimal number found after the property text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Label {
    pub fn new(category: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            property: property.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// One sentence-like unit of the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub text: String,
    pub labels: Vec<Label>,
}

impl Segment {
    pub fn new(id: SegmentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            labels: Vec::new(),
        }
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }
}

/// Category of the first label, or [`UNKNOWN_CATEGORY`].
pub fn primary_category(labels: &[Label]) -> &str {
    labels.first().map_or(UNKNOWN_CATEGORY, |l| l.category.as_str())
}

/// Property of the first label, or [`UNKNOWN_CATEGORY`].
pub fn primary_property(labels: &[Label]) -> &str {
    labels.first().map_or(UNKNOWN_CATEGORY, |l| l.property.as_str())
}
