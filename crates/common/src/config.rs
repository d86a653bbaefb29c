use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from system.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    pub extraction: ExtractionConfig,
    pub discovery: DiscoveryConfig,
    pub analysis: AnalysisConfig,
}

/// Content extraction limits and network behaviour.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Per-fetch timeout in seconds. No retries are attempted.
    pub fetch_timeout_seconds: u64,
    /// Pause before every outbound fetch, in milliseconds.
    pub politeness_delay_ms: u64,
    /// Extracted text is truncated to this many characters.
    pub max_content_chars: usize,
    /// A strategy result shorter than this falls through to the next strategy.
    pub min_strategy_chars: usize,
    /// The best result must be longer than this or simulated text is used.
    pub min_usable_chars: usize,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 15,
            politeness_delay_ms: 1000,
            max_content_chars: 3000,
            min_strategy_chars: 100,
            min_usable_chars: 50,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
        }
    }
}

/// Candidate source discovery.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Max candidate sources handed to the extractor.
    pub max_sources: usize,
    /// Whether to query the encyclopedia summary API before the rule table.
    pub encyclopedia_lookup: bool,
    /// Timeout for each encyclopedia lookup request, in seconds.
    pub lookup_timeout_seconds: u64,
    /// Base URL of the page summary endpoint; the article title is appended.
    pub summary_api_url: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_sources: 4,
            encyclopedia_lookup: true,
            lookup_timeout_seconds: 10,
            summary_api_url: "https://en.wikipedia.org/api/rest_v1/page/summary/".into(),
        }
    }
}

/// Vector space and document cap parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Extraction stops once this many documents were collected.
    pub max_documents: usize,
    /// Documents with extracted text at or under this length are skipped.
    pub min_document_chars: usize,
    /// Vocabulary cap for the term-weighting model.
    pub max_features: usize,
    /// Terms present in more than this fraction of texts are dropped.
    pub max_df: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_documents: 3,
            min_document_chars: 100,
            max_features: 1000,
            max_df: 0.85,
        }
    }
}
