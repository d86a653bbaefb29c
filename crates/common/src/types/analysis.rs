use serde::{Deserialize, Serialize};

/// A weighted term from the statement's row of the vector space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub score: f64,
}

/// Similarity of one retrieved document to the statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub source: String,
    pub url: String,
    /// Cosine similarity in [0, 1].
    pub similarity_score: f64,
    /// Top document-local terms that literally occur in the document text.
    pub key_matches: Vec<KeyTerm>,
    pub content_preview: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TermAnalysis {
    pub key_terms: Vec<KeyTerm>,
    /// Number of key terms before truncation for display.
    pub total_terms: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub source_count: usize,
    pub high_confidence_sources: usize,
    pub average_similarity: f64,
}

/// Everything the analyzer reports besides the accuracy score itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub term_analysis: TermAnalysis,
    pub document_matches: Vec<DocumentMatch>,
    pub reasoning: String,
    pub confidence_factors: ConfidenceFactors,
}

impl AnalysisDetails {
    /// Details for a call that had no evidence to analyze.
    pub fn empty(reasoning: &str) -> Self {
        Self {
            term_analysis: TermAnalysis::default(),
            document_matches: Vec::new(),
            reasoning: reasoning.to_string(),
            confidence_factors: ConfidenceFactors::default(),
        }
    }
}

/// Rough difficulty of verifying a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}
