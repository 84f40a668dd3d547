use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single metadata value.
///
/// Serialized untagged so the on-disk form stays a plain JSON scalar.
/// Variant order matters for deserialization: whole numbers parse as `Int`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for MetaValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Open string-keyed metadata map attached to each document
pub type Metadata = BTreeMap<String, MetaValue>;

/// Search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Document ID
    pub doc_id: String,

    /// Similarity score (raw dot product)
    pub score: f32,
}

impl SearchResult {
    pub fn new(doc_id: String, score: f32) -> Self {
        Self { doc_id, score }
    }
}
