//! Statement-versus-evidence analysis: TF-IDF similarity, heuristic accuracy
//! scoring and reasoning text.

pub mod normalize;
pub mod reasoning;
pub mod scoring;
pub mod stop_words;
pub mod vector_space;

use std::sync::Arc;

use factcheck_common::config::AnalysisConfig;
use factcheck_common::types::{
    AnalysisDetails, ConfidenceFactors, Document, DocumentMatch, TermAnalysis,
};

pub use normalize::TextNormalizer;
pub use scoring::PatternTables;
pub use vector_space::{
    build_evidence, Evidence, VectorSpace, VectorizeError, VectorizerParams,
};

/// Accuracy reported when the analyzer is handed no documents.
pub const NO_DOCUMENTS_ACCURACY: f64 = 0.5;
const NO_DOCUMENTS_REASONING: &str =
    "No sources available for analysis. Using general knowledge assessment.";

const DISPLAYED_KEY_TERMS: usize = 8;
const DISPLAYED_MATCHES: usize = 3;
/// Matches above this similarity count as high-confidence sources.
const HIGH_CONFIDENCE_SIMILARITY: f64 = 0.2;

/// Scores statements against retrieved documents. Holds only immutable
/// configuration; every call fits a fresh vector space.
#[derive(Clone, Debug)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    patterns: Arc<PatternTables>,
    params: VectorizerParams,
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig, patterns: Arc<PatternTables>) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            patterns,
            params: VectorizerParams {
                max_features: config.max_features,
                max_df: config.max_df,
            },
        }
    }

    /// Accuracy in [0.05, 0.98] plus the evidence behind it.
    pub fn analyze(&self, statement: &str, documents: &[Document]) -> (f64, AnalysisDetails) {
        if documents.is_empty() {
            return (
                NO_DOCUMENTS_ACCURACY,
                AnalysisDetails::empty(NO_DOCUMENTS_REASONING),
            );
        }

        tracing::info!(documents = documents.len(), "Analyzing statement");

        let evidence = build_evidence(&self.normalizer, statement, documents, self.params);
        let accuracy = scoring::score(
            &evidence.matches,
            &evidence.key_terms,
            statement,
            &self.patterns,
        );
        tracing::debug!(
            vocabulary = evidence.vocabulary.len(),
            key_terms = evidence.key_terms.len(),
            matches = evidence.matches.len(),
            "Evidence built"
        );
        let reasoning = reasoning::explain(statement, &evidence.matches, accuracy, &self.patterns);
        let confidence_factors = confidence_factors(&evidence.matches);

        let total_terms = evidence.key_terms.len();
        let mut key_terms = evidence.key_terms;
        key_terms.truncate(DISPLAYED_KEY_TERMS);
        let mut document_matches = evidence.matches;
        document_matches.truncate(DISPLAYED_MATCHES);

        let details = AnalysisDetails {
            term_analysis: TermAnalysis {
                key_terms,
                total_terms,
            },
            document_matches,
            reasoning,
            confidence_factors,
        };

        (accuracy, details)
    }
}

fn confidence_factors(matches: &[DocumentMatch]) -> ConfidenceFactors {
    let average_similarity = if matches.is_empty() {
        0.0
    } else {
        let mean = matches.iter().map(|m| m.similarity_score).sum::<f64>() / matches.len() as f64;
        (mean * 1000.0).round() / 1000.0
    };

    ConfidenceFactors {
        source_count: matches.len(),
        high_confidence_sources: matches
            .iter()
            .filter(|m| m.similarity_score > HIGH_CONFIDENCE_SIMILARITY)
            .count(),
        average_similarity,
    }
}
