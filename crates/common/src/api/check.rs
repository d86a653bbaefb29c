use serde::{Deserialize, Serialize};

use crate::types::{AnalysisDetails, Complexity};

/// POST /check_fact request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub statement: String,
}

/// POST /check_fact response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub accuracy: f64,
    /// Wall-clock seconds spent on the whole pipeline.
    pub processing_time: f64,
    pub sources_analyzed: usize,
    pub analysis_details: AnalysisDetails,
    pub sources: Vec<SourceConfidence>,
    pub complexity: Complexity,
}

/// Per-source confidence derived from relevance and overall accuracy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfidence {
    pub name: String,
    pub url: String,
    pub confidence: f64,
}

/// Error body returned for any non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
