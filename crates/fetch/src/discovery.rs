use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

use factcheck_common::config::DiscoveryConfig;
use factcheck_common::types::{CandidateSource, SourceCategory};

/// Proposes candidate sources for a statement, in priority order.
pub trait SourceDiscovery: Send + Sync {
    fn discover<'a>(
        &'a self,
        statement: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CandidateSource>> + Send + 'a>>;
}

const PROGRAMMING_KEYWORDS: &[&str] = &[
    "python",
    "programming",
    "code",
    "computer",
    "software",
    "java",
    "javascript",
];

const BIOLOGY_KEYWORDS: &[&str] = &["bear", "mammal", "animal", "species", "biology", "science"];

/// Words carrying no topic signal when building an article title.
const TITLE_FILLER_WORDS: &[&str] = &["is", "are", "was", "were", "the", "a", "an"];

const PRIMARY_LOOKUP_RELEVANCE: f64 = 0.95;
const FALLBACK_LOOKUP_RELEVANCE: f64 = 0.90;

/// Keyword rule table plus a best-effort encyclopedia summary lookup.
pub struct RuleTableDiscovery {
    http: reqwest::Client,
    config: DiscoveryConfig,
}

#[derive(Deserialize)]
struct PageSummary {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Deserialize)]
struct ContentUrls {
    desktop: Option<PlatformUrls>,
}

#[derive(Deserialize)]
struct PlatformUrls {
    page: Option<String>,
}

impl RuleTableDiscovery {
    pub fn new(http: reqwest::Client, config: DiscoveryConfig) -> Self {
        Self { http, config }
    }

    async fn discover_sources(&self, statement: &str) -> Vec<CandidateSource> {
        let mut sources = Vec::new();

        if self.config.encyclopedia_lookup {
            if let Some(article) = self.lookup_encyclopedia(statement).await {
                sources.push(article);
            }
        }

        sources.extend(rule_table_sources(statement));
        sources.truncate(self.config.max_sources);

        tracing::info!(
            count = sources.len(),
            names = ?sources.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "Discovered candidate sources"
        );

        sources
    }

    /// Try a keyword-derived article title, then the statement's first sentence.
    async fn lookup_encyclopedia(&self, statement: &str) -> Option<CandidateSource> {
        let attempts = [
            (article_title(statement), PRIMARY_LOOKUP_RELEVANCE),
            (sentence_title(statement), FALLBACK_LOOKUP_RELEVANCE),
        ];

        for (title, relevance) in attempts {
            if title.is_empty() {
                continue;
            }
            match self.fetch_summary(&title).await {
                Ok(Some((page_title, url))) => {
                    tracing::info!(title = %page_title, url = %url, "Found encyclopedia article");
                    return Some(CandidateSource::new(
                        "Wikipedia",
                        &url,
                        relevance,
                        SourceCategory::Encyclopedia,
                    ));
                }
                Ok(None) => {
                    tracing::debug!(title = %title, "No encyclopedia article");
                }
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "Encyclopedia lookup failed");
                }
            }
        }

        None
    }

    async fn fetch_summary(&self, title: &str) -> Result<Option<(String, String)>, reqwest::Error> {
        let url = format!("{}{}", self.config.summary_api_url, title);

        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(self.config.lookup_timeout_seconds))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }

        let summary: PageSummary = response.json().await?;
        let page = summary
            .content_urls
            .and_then(|u| u.desktop)
            .and_then(|d| d.page)
            .filter(|p| !p.is_empty());

        Ok(page.map(|p| (summary.title, p)))
    }
}

impl SourceDiscovery for RuleTableDiscovery {
    fn discover<'a>(
        &'a self,
        statement: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CandidateSource>> + Send + 'a>> {
        Box::pin(self.discover_sources(statement))
    }
}

/// Static sources chosen by keyword category, plus the general fallbacks.
pub fn rule_table_sources(statement: &str) -> Vec<CandidateSource> {
    let lower = statement.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    let mut sources = Vec::new();

    if mentions(PROGRAMMING_KEYWORDS) {
        sources.push(CandidateSource::new(
            "Python Official",
            "https://www.python.org/doc/",
            0.92,
            SourceCategory::OfficialDocs,
        ));
        sources.push(CandidateSource::new(
            "GeeksforGeeks",
            "https://www.geeksforgeeks.org/python-programming-language/",
            0.88,
            SourceCategory::Tutorial,
        ));
    } else if mentions(BIOLOGY_KEYWORDS) {
        sources.push(CandidateSource::new(
            "National Geographic Animals",
            "https://www.nationalgeographic.com/animals/mammals/",
            0.90,
            SourceCategory::Science,
        ));
        sources.push(CandidateSource::new(
            "Britannica Animals",
            "https://www.britannica.com/animal/bear",
            0.92,
            SourceCategory::Encyclopedia,
        ));
    }

    sources.push(CandidateSource::new(
        "Britannica",
        "https://www.britannica.com/",
        0.85,
        SourceCategory::General,
    ));
    sources.push(CandidateSource::new(
        "HowStuffWorks",
        "https://www.howstuffworks.com/",
        0.80,
        SourceCategory::General,
    ));

    sources
}

/// Up to three significant words of the statement as a title-cased article name.
fn article_title(statement: &str) -> String {
    let words: Vec<String> = statement
        .to_lowercase()
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty() && !TITLE_FILLER_WORDS.contains(&w.as_str()))
        .collect();

    let significant: Vec<&str> = words
        .iter()
        .filter(|w| w.chars().count() > 3)
        .take(3)
        .map(String::as_str)
        .collect();

    let chosen: Vec<&str> = if significant.is_empty() {
        words.iter().take(2).map(String::as_str).collect()
    } else {
        significant
    };

    title_case(&chosen.join("_"))
}

/// The statement's first sentence with spaces replaced by underscores.
fn sentence_title(statement: &str) -> String {
    statement
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_alphanumeric() || c == '_' || c == '-' => Some(c),
            _ => None,
        })
        .collect()
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            result.push(c);
            prev_is_alpha = false;
        }
    }
    result
}
