use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use factcheck_common::api::check::{CheckResponse, SourceConfidence};
use factcheck_common::config::AnalysisConfig;
use factcheck_common::types::{AnalysisDetails, CandidateSource, Complexity, Document};
use factcheck_common::{CheckId, FactCheckError, Result};
use factcheck_fetch::{ContentExtractor, SourceDiscovery};

use crate::analysis::Analyzer;

pub const EMPTY_STATEMENT_MESSAGE: &str = "Please enter a statement to check";

/// Accuracy reported when no source yielded usable content.
pub const NO_EVIDENCE_ACCURACY: f64 = 0.4;
const NO_EVIDENCE_REASONING: &str = "Unable to retrieve sufficient source content for analysis.";

const MAX_SOURCE_CONFIDENCE: f64 = 0.95;

/// Markers that make a statement harder to verify lexically.
const COMPLEXITY_NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "none"];

/// Sequences discovery, capped extraction, analysis and response assembly
/// for one statement at a time. Holds no per-request state.
pub struct FactChecker {
    discovery: Arc<dyn SourceDiscovery>,
    extractor: ContentExtractor,
    analyzer: Analyzer,
    config: AnalysisConfig,
    max_sources: usize,
}

impl FactChecker {
    pub fn new(
        discovery: Arc<dyn SourceDiscovery>,
        extractor: ContentExtractor,
        analyzer: Analyzer,
        config: AnalysisConfig,
        max_sources: usize,
    ) -> Self {
        Self {
            discovery,
            extractor,
            analyzer,
            config,
            max_sources,
        }
    }

    /// Check one statement. Only an empty statement is an error; source
    /// failures degrade to simulated or default evidence.
    pub async fn check(&self, statement: &str) -> Result<CheckResponse> {
        let statement = statement.trim();
        if statement.is_empty() {
            return Err(FactCheckError::Validation(EMPTY_STATEMENT_MESSAGE.into()));
        }

        let check_id = CheckId::new();
        let span = tracing::info_span!("check", check_id = %check_id);
        Ok(self.run(statement).instrument(span).await)
    }

    async fn run(&self, statement: &str) -> CheckResponse {
        tracing::info!(statement = %statement, "Checking statement");
        let start = Instant::now();

        let mut sources = self.discovery.discover(statement).await;
        sources.truncate(self.max_sources);

        let documents = self.collect_documents(&sources).await;
        tracing::info!(documents = documents.len(), "Collected documents for analysis");

        let (accuracy, analysis_details) = if documents.is_empty() {
            tracing::warn!("No usable source content, using default analysis");
            (
                NO_EVIDENCE_ACCURACY,
                AnalysisDetails::empty(NO_EVIDENCE_REASONING),
            )
        } else {
            self.analyzer.analyze(statement, &documents)
        };

        let elapsed = start.elapsed().as_secs_f64();
        metrics::histogram!("check.total_latency").record(elapsed);

        tracing::info!(
            accuracy,
            sources = documents.len(),
            elapsed_seconds = elapsed,
            "Analysis complete"
        );

        CheckResponse {
            accuracy,
            processing_time: (elapsed * 100.0).round() / 100.0,
            sources_analyzed: documents.len(),
            analysis_details,
            sources: documents
                .iter()
                .map(|doc| SourceConfidence {
                    name: doc.source.clone(),
                    url: doc.url.clone(),
                    confidence: (doc.relevance * accuracy).min(MAX_SOURCE_CONFIDENCE),
                })
                .collect(),
            complexity: complexity(statement),
        }
    }

    /// Extract candidates in order until the document cap is reached.
    /// Candidates past the cap are never fetched.
    async fn collect_documents(&self, sources: &[CandidateSource]) -> Vec<Document> {
        let mut documents = Vec::with_capacity(self.config.max_documents);

        for source in sources {
            if documents.len() >= self.config.max_documents {
                break;
            }

            let content = self.extractor.extract(&source.url).await;
            if content.chars().count() > self.config.min_document_chars {
                tracing::info!(source = %source.name, "Collected document");
                documents.push(Document::from_source(source, content));
            } else {
                tracing::debug!(source = %source.name, "Skipping source with too little content");
            }
        }

        documents
    }
}

/// Rough difficulty of verifying `statement`.
pub fn complexity(statement: &str) -> Complexity {
    let words = statement.split_whitespace().count();
    let lower = statement.to_lowercase();
    let negated = COMPLEXITY_NEGATIONS.iter().any(|n| lower.contains(n));

    if negated || words > 20 {
        Complexity::High
    } else if words > 12 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}
