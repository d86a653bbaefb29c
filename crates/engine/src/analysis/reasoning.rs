use factcheck_common::types::DocumentMatch;

use super::scoring::{PatternTables, CORROBORATING_SIMILARITY};

/// One-sentence explanation of an accuracy score.
pub fn explain(
    statement: &str,
    matches: &[DocumentMatch],
    accuracy: f64,
    patterns: &PatternTables,
) -> String {
    let supporting = matches
        .iter()
        .filter(|m| m.similarity_score > CORROBORATING_SIMILARITY)
        .count();

    if accuracy >= 0.8 {
        format!(
            "High confidence: {supporting} reliable sources strongly support this statement \
             with strong term matches."
        )
    } else if accuracy >= 0.6 {
        format!(
            "Moderate confidence: {supporting} sources provide supporting evidence with good \
             term alignment."
        )
    } else if accuracy >= 0.4 {
        format!(
            "Low confidence: Limited evidence found ({supporting} sources). Verification \
             recommended."
        )
    } else if patterns.has_negation(statement) {
        "Very low confidence: Negated statements are challenging for TF-IDF analysis. \
         Manual verification required."
            .to_string()
    } else if patterns.is_known_false(statement) {
        "Very low confidence: This statement contradicts established scientific consensus."
            .to_string()
    } else {
        "Very low confidence: Little supporting evidence found in analyzed sources.".to_string()
    }
}
