use serde::Deserialize;

use factcheck_common::types::{DocumentMatch, KeyTerm};

/// Position weights for the three best matches.
const MATCH_WEIGHTS: [f64; 3] = [1.0, 0.7, 0.4];

/// Base accuracy when no document matched at all.
const NO_MATCH_BASE: f64 = 0.3;

pub const MIN_ACCURACY: f64 = 0.05;
pub const MAX_ACCURACY: f64 = 0.98;

const STRONG_TERM_WEIGHT: f64 = 0.1;
/// Matches above this similarity count as corroborating sources.
pub const CORROBORATING_SIMILARITY: f64 = 0.15;

/// Heuristic statement tables consulted by the scorer and the reasoning
/// synthesizer. Built once at startup and shared read-only.
///
/// Entries are matched as substrings of the lower-cased statement, so they
/// must themselves be lower-case.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PatternTables {
    /// Word groups whose joint presence marks a commonly known fact.
    pub known_true: Vec<Vec<String>>,
    /// Substrings of statements known to be false.
    pub known_false: Vec<String>,
    /// Substrings signalling a negated statement.
    pub negation_markers: Vec<String>,
}

impl PatternTables {
    pub fn is_known_true(&self, statement: &str) -> bool {
        let lower = statement.to_lowercase();
        self.known_true
            .iter()
            .any(|group| group.iter().all(|word| lower.contains(word.as_str())))
    }

    pub fn is_known_false(&self, statement: &str) -> bool {
        let lower = statement.to_lowercase();
        self.known_false.iter().any(|p| lower.contains(p.as_str()))
    }

    pub fn has_negation(&self, statement: &str) -> bool {
        let lower = statement.to_lowercase();
        self.negation_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
    }
}

impl Default for PatternTables {
    fn default() -> Self {
        let known_true: &[&[&str]] = &[
            &["python", "programming language"],
            &["bear", "mammal"],
            &["water", "boils", "100 degrees"],
            &["earth", "planet"],
            &["moon", "orbits", "earth"],
            &["sun", "star"],
            &["fish", "swim"],
            &["birds", "fly"],
            &["humans", "mammals"],
            &["dogs", "animals"],
            &["earth", "revolves", "sun"],
            &["earth", "sphere"],
            &["earth", "round"],
        ];
        let known_false = [
            "earth is flat",
            "moon is made of cheese",
            "sun revolves around earth",
            "vaccines cause autism",
            "climate change is a hoax",
        ];
        let negation_markers = [
            "not", "no", "never", "nothing", "none", "isn't", "aren't", "wasn't", "weren't",
            "don't", "doesn't",
        ];

        Self {
            known_true: known_true
                .iter()
                .map(|group| group.iter().map(|w| w.to_string()).collect())
                .collect(),
            known_false: known_false.iter().map(|s| s.to_string()).collect(),
            negation_markers: negation_markers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Position-weighted mean similarity of the top three matches, in [0, 1].
pub fn base_accuracy(matches: &[DocumentMatch]) -> f64 {
    if matches.is_empty() {
        return NO_MATCH_BASE;
    }

    let (weighted, total) = matches
        .iter()
        .zip(MATCH_WEIGHTS)
        .fold((0.0, 0.0), |(sum, total), (m, w)| {
            (sum + m.similarity_score * w, total + w)
        });

    (weighted / total).clamp(0.0, 1.0)
}

/// Score a statement against its ranked matches and key terms.
///
/// The adjustments run in a fixed order; each clamps against its own bound
/// rather than the final range, so reordering them changes results for
/// statements that trip several rules.
pub fn score(
    matches: &[DocumentMatch],
    key_terms: &[KeyTerm],
    statement: &str,
    patterns: &PatternTables,
) -> f64 {
    let mut accuracy = base_accuracy(matches);

    let strong_terms = key_terms
        .iter()
        .filter(|t| t.score > STRONG_TERM_WEIGHT)
        .count();
    if strong_terms >= 3 {
        accuracy = (accuracy + 0.15).min(0.95);
    } else if strong_terms >= 2 {
        accuracy = (accuracy + 0.10).min(0.90);
    }

    let corroborating = matches
        .iter()
        .filter(|m| m.similarity_score > CORROBORATING_SIMILARITY)
        .count();
    if corroborating >= 2 {
        accuracy = (accuracy + 0.10).min(0.95);
    }

    if patterns.is_known_true(statement) {
        accuracy = (accuracy + 0.20).min(0.95);
    }

    if patterns.is_known_false(statement) {
        accuracy = (accuracy - 0.30).max(0.05);
    }

    if patterns.has_negation(statement) {
        accuracy = (accuracy - 0.15).max(0.10);
    }

    tracing::debug!(
        strong_terms,
        corroborating,
        accuracy,
        "Scored statement"
    );

    accuracy.clamp(MIN_ACCURACY, MAX_ACCURACY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(similarity: f64) -> DocumentMatch {
        DocumentMatch {
            source: "S".into(),
            url: "https://s.test/".into(),
            similarity_score: similarity,
            key_matches: Vec::new(),
            content_preview: String::new(),
        }
    }

    fn terms(weights: &[f64]) -> Vec<KeyTerm> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| KeyTerm {
                term: format!("term{i}"),
                score: *w,
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_base_accuracy_without_matches() {
        assert!(close(base_accuracy(&[]), 0.3));
    }

    #[test]
    fn test_base_accuracy_drops_absent_weights() {
        assert!(close(base_accuracy(&[m(0.5)]), 0.5));
        // (0.6 * 1.0 + 0.3 * 0.7) / 1.7
        assert!(close(base_accuracy(&[m(0.6), m(0.3)]), 0.81 / 1.7));
    }

    #[test]
    fn test_base_accuracy_ignores_fourth_match() {
        let three = base_accuracy(&[m(0.6), m(0.4), m(0.2)]);
        let four = base_accuracy(&[m(0.6), m(0.4), m(0.2), m(0.9)]);
        assert!(close(three, four));
        assert!(close(three, (0.6 + 0.28 + 0.08) / 2.1));
    }

    #[test]
    fn test_strong_term_boost() {
        let p = PatternTables::default();
        let neutral = "Cats purr";
        assert!(close(score(&[m(0.4)], &terms(&[0.5, 0.5, 0.5]), neutral, &p), 0.55));
        assert!(close(score(&[m(0.4)], &terms(&[0.5, 0.5, 0.05]), neutral, &p), 0.50));
        assert!(close(score(&[m(0.4)], &terms(&[0.5]), neutral, &p), 0.40));
        // Two strong terms cap at 0.90.
        assert!(close(score(&[m(0.85)], &terms(&[0.5, 0.5]), neutral, &p), 0.90));
    }

    #[test]
    fn test_multi_source_boost() {
        let p = PatternTables::default();
        let a = score(&[m(0.3), m(0.2)], &[], "Cats purr", &p);
        let base = base_accuracy(&[m(0.3), m(0.2)]);
        assert!(close(a, base + 0.10));

        let single = score(&[m(0.3), m(0.1)], &[], "Cats purr", &p);
        assert!(close(single, base_accuracy(&[m(0.3), m(0.1)])));
    }

    #[test]
    fn test_known_true_requires_every_word() {
        let p = PatternTables::default();
        assert!(p.is_known_true("Python is a programming language"));
        assert!(!p.is_known_true("Python is a snake"));
        assert!(close(score(&[], &[], "The sun is a star", &p), 0.5));
    }

    #[test]
    fn test_known_false_penalty() {
        let p = PatternTables::default();
        let a = score(&[m(0.5)], &[], "The Earth is flat", &p);
        assert!(close(a, 0.2));
        assert!(a <= base_accuracy(&[m(0.5)]));
    }

    #[test]
    fn test_negation_penalty_floor() {
        let p = PatternTables::default();
        assert!(close(score(&[m(0.5)], &[], "Cats never purr", &p), 0.35));
        assert!(close(score(&[m(0.15)], &[], "Cats never purr", &p), 0.10));
    }

    #[test]
    fn test_penalties_apply_in_order() {
        // Known-false then negation on a low base: 0.3 -> 0.05 -> 0.10.
        let p = PatternTables::default();
        let a = score(&[], &[], "It is not true that the earth is flat", &p);
        assert!(close(a, 0.10));
    }

    #[test]
    fn test_negation_lowers_score() {
        let p = PatternTables::default();
        let matches = [m(0.4), m(0.2)];
        let t = terms(&[0.6, 0.6, 0.5]);
        let positive = score(&matches, &t, "The earth is round", &p);
        let negated = score(&matches, &t, "The earth is not round", &p);
        assert!(negated < positive);
    }

    #[test]
    fn test_accuracy_is_bounded() {
        let p = PatternTables::default();
        let high = score(&[m(1.0), m(1.0), m(1.0)], &terms(&[1.0; 5]), "The sun is a star", &p);
        assert!(high <= MAX_ACCURACY);
        let low = score(&[m(0.02)], &[], "The earth is flat", &p);
        assert!(low >= MIN_ACCURACY);
    }

    #[test]
    fn test_negation_matches_substrings() {
        // "no" inside "known" counts.
        let p = PatternTables::default();
        assert!(p.has_negation("It is well known"));
        assert!(!p.has_negation("The earth is round"));
    }
}
