use serde::{Deserialize, Serialize};

/// Relevance assumed for a source whose discovery rule did not set one.
pub const DEFAULT_RELEVANCE: f64 = 0.5;

/// Kind of origin a candidate source belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Encyclopedia,
    OfficialDocs,
    Tutorial,
    Science,
    General,
}

/// A named origin proposed by source discovery, not yet fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSource {
    pub name: String,
    pub url: String,
    /// Static relevance weight in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    pub category: SourceCategory,
}

impl CandidateSource {
    pub fn new(name: &str, url: &str, relevance: f64, category: SourceCategory) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            relevance: Some(relevance),
            category,
        }
    }

    pub fn relevance_or_default(&self) -> f64 {
        self.relevance.unwrap_or(DEFAULT_RELEVANCE)
    }
}

/// A successfully extracted piece of evidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Name of the source this text came from.
    pub source: String,
    pub url: String,
    pub content: String,
    pub relevance: f64,
}

impl Document {
    pub fn from_source(source: &CandidateSource, content: String) -> Self {
        Self {
            source: source.name.clone(),
            url: source.url.clone(),
            content,
            relevance: source.relevance_or_default(),
        }
    }
}
