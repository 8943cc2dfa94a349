//! Vector store types.

use crate::consistency::ConsistencyPolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_TOP_K: u32 = 10;

/// Distance metric of an index.
///
/// Deserialization is lenient: a missing, null or unrecognised metric reads as
/// [`VectorMetric::Cosine`], which is what the platform uses when none was
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorMetric {
    #[default]
    Cosine,
    Euclidean,
    Dot,
}

impl VectorMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorMetric::Cosine => "cosine",
            VectorMetric::Euclidean => "euclidean",
            VectorMetric::Dot => "dot",
        }
    }

    fn from_name_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "euclidean" => VectorMetric::Euclidean,
            "dot" | "dot-product" | "dotproduct" => VectorMetric::Dot,
            _ => VectorMetric::Cosine,
        }
    }
}

impl fmt::Display for VectorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VectorMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VectorMetric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name
            .as_deref()
            .map(VectorMetric::from_name_lenient)
            .unwrap_or_default())
    }
}

/// Index description. Never cached by the client; always fetched fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorIndex {
    pub name: String,
    pub dimension: u32,
    #[serde(default)]
    pub metric: VectorMetric,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub vector_count: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl VectorIndex {
    pub fn new(name: impl Into<String>, dimension: u32, metric: VectorMetric) -> Self {
        Self {
            name: name.into(),
            dimension,
            metric,
            vector_count: 0,
        }
    }
}

/// Vector identifier: the API accepts both strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorId {
    Int(i64),
    Str(String),
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorId::Int(n) => write!(f, "{}", n),
            VectorId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for VectorId {
    fn from(n: i64) -> Self {
        VectorId::Int(n)
    }
}

impl From<&str> for VectorId {
    fn from(s: &str) -> Self {
        VectorId::Str(s.to_string())
    }
}

impl From<String> for VectorId {
    fn from(s: String) -> Self {
        VectorId::Str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub id: VectorId,
    pub values: Vec<f32>,
}

impl Vector {
    pub fn new(id: impl Into<VectorId>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: VectorId,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AddVectorsOptions {
    #[serde(default)]
    pub consistency: ConsistencyPolicy,
}

impl AddVectorsOptions {
    /// Wait for the index count to reflect the insert (5 probes, 3 s apart).
    pub fn consistent() -> Self {
        Self {
            consistency: ConsistencyPolicy::write(),
        }
    }

    pub fn with_consistency(mut self, consistency: ConsistencyPolicy) -> Self {
        self.consistency = consistency;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default)]
    pub consistency: ConsistencyPolicy,
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            consistency: ConsistencyPolicy::disabled(),
        }
    }
}

impl SearchOptions {
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_consistency(mut self, consistency: ConsistencyPolicy) -> Self {
        self.consistency = consistency;
        self
    }
}

/// How the post-insert verification went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub expected_count: u64,
    /// Count seen by the last probe, `None` if the index was not visible.
    pub observed_count: Option<u64>,
    pub attempts: u32,
    pub converged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddVectorsResult {
    pub inserted: u64,
    pub ids: Vec<VectorId>,
    /// Present only when consistency was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ConsistencyReport>,
}
