use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use factcheck_common::types::{Document, DocumentMatch, KeyTerm};

use super::normalize::TextNormalizer;
use super::stop_words::{is_stop_word, is_vocabulary_stop_word};

/// Runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"));

const MAX_KEY_TERMS: usize = 12;
const MAX_KEY_MATCHES: usize = 6;
const MIN_MATCH_SIMILARITY: f64 = 0.01;
const PREVIEW_CHARS: usize = 150;

#[derive(Debug, thiserror::Error)]
pub enum VectorizeError {
    #[error("empty vocabulary; texts contain only stop words")]
    EmptyVocabulary,

    #[error("after pruning, no terms remain")]
    NoTermsAfterPruning,
}

/// Fit parameters for the term-weighting model.
#[derive(Clone, Copy, Debug)]
pub struct VectorizerParams {
    pub max_features: usize,
    /// Terms present in more than this fraction of texts are dropped.
    pub max_df: f64,
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            max_features: 1000,
            max_df: 0.85,
        }
    }
}

/// TF-IDF weights jointly fitted over a small corpus of texts.
///
/// Rows are L2-normalized, so cosine similarity between two rows is their dot
/// product. The space is a plain value: fit it, read it, drop it.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl VectorSpace {
    pub fn fit(texts: &[String], params: VectorizerParams) -> Result<Self, VectorizeError> {
        let term_counts: Vec<HashMap<String, usize>> =
            texts.iter().map(|text| count_terms(text)).collect();

        // df and corpus-wide frequency per term, ordered by term.
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in &term_counts {
            for (term, count) in counts {
                let entry = stats.entry(term.as_str()).or_default();
                entry.0 += 1;
                entry.1 += count;
            }
        }
        if stats.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let max_doc_count = params.max_df * texts.len() as f64;
        let mut kept: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= 1 && (*df as f64) <= max_doc_count)
            .map(|(term, (df, total))| (term, df, total))
            .collect();
        if kept.is_empty() {
            return Err(VectorizeError::NoTermsAfterPruning);
        }

        if kept.len() > params.max_features {
            // Stable: equally frequent terms keep lexicographic order.
            kept.sort_by(|a, b| b.2.cmp(&a.2));
            kept.truncate(params.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n = texts.len() as f64;
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, df, _)| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        let vocabulary: Vec<String> = kept.iter().map(|(term, _, _)| term.to_string()).collect();

        let rows = term_counts
            .iter()
            .map(|counts| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| counts.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(Self { vocabulary, rows })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Cosine similarity of two rows, clamped to [0, 1]. Zero rows score 0.
    pub fn cosine_similarity(&self, a: usize, b: usize) -> f64 {
        let dot: f64 = self.rows[a]
            .iter()
            .zip(&self.rows[b])
            .map(|(x, y)| x * y)
            .sum();
        dot.clamp(0.0, 1.0)
    }

    /// The `limit` highest-weighted terms of a row, descending; equal weights
    /// keep vocabulary order.
    pub fn ranked_terms(&self, row: usize, limit: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .vocabulary
            .iter()
            .map(String::as_str)
            .zip(self.rows[row].iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Output of fitting the statement against its retrieved documents.
#[derive(Clone, Debug, Default)]
pub struct Evidence {
    pub key_terms: Vec<KeyTerm>,
    /// Sorted by similarity, descending.
    pub matches: Vec<DocumentMatch>,
    /// Fitted feature vocabulary, lexicographic.
    pub vocabulary: Vec<String>,
}

/// Fit a vector space over `[statement, documents...]` and rank the documents
/// against the statement.
///
/// A degenerate corpus yields empty evidence rather than an error.
pub fn build_evidence(
    normalizer: &TextNormalizer,
    statement: &str,
    documents: &[Document],
    params: VectorizerParams,
) -> Evidence {
    let texts: Vec<String> = std::iter::once(statement)
        .chain(documents.iter().map(|d| d.content.as_str()))
        .map(|text| normalizer.normalize(text))
        .collect();

    let space = match VectorSpace::fit(&texts, params) {
        Ok(space) => space,
        Err(e) => {
            tracing::warn!(error = %e, documents = documents.len(), "Vectorization failed");
            return Evidence::default();
        }
    };

    let key_terms = space
        .ranked_terms(0, MAX_KEY_TERMS)
        .into_iter()
        .filter(|(term, weight)| {
            *weight > 0.0 && term.chars().count() > 2 && !is_stop_word(term)
        })
        .map(|(term, weight)| KeyTerm {
            term: term.to_string(),
            score: weight,
        })
        .collect();

    let mut matches: Vec<DocumentMatch> = documents
        .iter()
        .enumerate()
        .filter_map(|(i, doc)| {
            let row = i + 1;
            let similarity = space.cosine_similarity(0, row);
            (similarity > MIN_MATCH_SIMILARITY).then(|| DocumentMatch {
                source: doc.source.clone(),
                url: doc.url.clone(),
                similarity_score: similarity,
                key_matches: key_matches(&space, row, &doc.content),
                content_preview: preview(&doc.content),
            })
        })
        .collect();
    matches.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

    Evidence {
        key_terms,
        matches,
        vocabulary: space.vocabulary,
    }
}

/// Top document-local terms that literally occur in the raw document text.
fn key_matches(space: &VectorSpace, row: usize, content: &str) -> Vec<KeyTerm> {
    let content = content.to_lowercase();
    space
        .ranked_terms(row, MAX_KEY_MATCHES)
        .into_iter()
        .filter(|(term, weight)| *weight > 0.0 && content.contains(&term.to_lowercase()))
        .map(|(term, weight)| KeyTerm {
            term: term.to_string(),
            score: weight,
        })
        .collect()
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// Unigram and bigram counts over the non-stop-word tokens of `text`.
fn count_terms(text: &str) -> HashMap<String, usize> {
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !is_vocabulary_stop_word(token))
        .collect();

    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}
