use std::sync::Arc;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use factcheck_common::config::ExtractionConfig;

use crate::fetch::{extract_domain, PageFetcher};
use crate::simulated::SimulatedPassages;

/// Elements detached from the tree before any strategy runs.
const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "menu", "form", "button",
];

/// Structural and CMS selectors, most specific container first.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".main-content",
    "#content",
    ".article-body",
    ".post-content",
    "[role=\"main\"]",
    ".mw-parser-output",
    ".page-content",
    ".entry-content",
    ".story-content",
    ".article-content",
    "#main-content",
    ".main",
];

const BLOCK_TAGS: &str = "p, div, section, article";

/// Matched containers must carry more text than this to count.
const MIN_SELECTOR_NODE_CHARS: usize = 100;
const MIN_BLOCK_WORDS: usize = 20;
const MAX_BLOCK_WORDS: usize = 500;
const PARAGRAPH_BOOST: f64 = 1.5;
const TOP_BLOCKS: usize = 5;
const MIN_FALLBACK_PARAGRAPH_CHARS: usize = 30;
const MIN_FRAGMENT_CHARS: usize = 20;

type Strategy = fn(&Html) -> Option<String>;

const STRATEGIES: [(&str, Strategy); 3] = [
    ("selector_cascade", selector_cascade),
    ("scored_blocks", scored_blocks),
    ("paragraphs", paragraph_fallback),
];

/// Turns a URL into evidence text. Never fails: unreachable or thin pages
/// yield a simulated passage keyed on the URL.
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    passages: Arc<SimulatedPassages>,
    config: ExtractionConfig,
}

impl ContentExtractor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        passages: Arc<SimulatedPassages>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            fetcher,
            passages,
            config,
        }
    }

    /// Fetch `url` once after the politeness delay and extract its body text.
    pub async fn extract(&self, url: &str) -> String {
        tracing::info!(url = %url, "Extracting content");

        tokio::time::sleep(Duration::from_millis(self.config.politeness_delay_ms)).await;

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Fetch failed, using simulated content");
                return self.simulated(url, "fetch_error");
            }
        };

        match extract_page_text(&body, &self.config) {
            Some(text) => {
                tracing::info!(url = %url, chars = text.chars().count(), "Extracted content");
                text
            }
            None => {
                tracing::warn!(url = %url, "Insufficient content, using simulated content");
                self.simulated(url, "insufficient_content")
            }
        }
    }

    fn simulated(&self, url: &str, reason: &'static str) -> String {
        metrics::counter!(
            "extract.simulated_fallback",
            "domain" => extract_domain(url),
            "reason" => reason
        )
        .increment(1);
        self.passages.for_url(url).to_string()
    }
}

/// Run the extraction cascade over an HTML body.
///
/// Returns `None` when even the last strategy produced too little text for
/// the page to be usable.
pub fn extract_page_text(html: &str, config: &ExtractionConfig) -> Option<String> {
    let mut document = Html::parse_document(html);
    strip_non_content(&mut document);

    let mut text = String::new();
    for (name, strategy) in STRATEGIES {
        text = strategy(&document).unwrap_or_default();
        if char_len(&text) >= config.min_strategy_chars {
            tracing::debug!(strategy = name, chars = char_len(&text), "Strategy succeeded");
            metrics::counter!("extract.strategy", "strategy" => name).increment(1);
            break;
        }
    }

    if char_len(&text) <= config.min_usable_chars {
        return None;
    }

    let cleaned = clean_content(&text);
    Some(cleaned.chars().take(config.max_content_chars).collect())
}

/// Detach non-content elements from the tree.
///
/// Detached nodes stay in the arena and `Html::select` still visits them, so
/// every strategy must search from `document.root_element()`, which only
/// walks the attached tree.
fn strip_non_content(document: &mut Html) {
    let Ok(selector) = Selector::parse(&NON_CONTENT_TAGS.join(", ")) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Text of the first selector that matches a substantial container.
fn selector_cascade(document: &Html) -> Option<String> {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            let parts: Vec<String> = document
                .root_element()
                .select(&selector)
                .map(node_text)
                .filter(|text| char_len(text) > MIN_SELECTOR_NODE_CHARS)
                .collect();

            (!parts.is_empty()).then(|| parts.join(" "))
        })
}

/// Highest-scoring mid-sized text blocks inside `<body>`.
fn scored_blocks(document: &Html) -> Option<String> {
    let body_selector = Selector::parse("body").ok()?;
    let block_selector = Selector::parse(BLOCK_TAGS).ok()?;
    let body = document.root_element().select(&body_selector).next()?;

    let mut blocks: Vec<(String, f64)> = body
        .select(&block_selector)
        .filter_map(|element| {
            let text = node_text(element);
            let words = text.split_whitespace().count();
            if words <= MIN_BLOCK_WORDS || words >= MAX_BLOCK_WORDS {
                return None;
            }

            let mut score = words as f64;
            if element.value().name() == "p" {
                score *= PARAGRAPH_BOOST;
            }
            Some((text, score))
        })
        .collect();

    if blocks.is_empty() {
        return None;
    }

    // Stable: equal scores keep document order.
    blocks.sort_by(|a, b| b.1.total_cmp(&a.1));

    Some(
        blocks
            .into_iter()
            .take(TOP_BLOCKS)
            .map(|(text, _)| text)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn paragraph_fallback(document: &Html) -> Option<String> {
    let selector = Selector::parse("p").ok()?;
    let paragraphs: Vec<String> = document
        .root_element()
        .select(&selector)
        .map(node_text)
        .filter(|text| char_len(text) > MIN_FALLBACK_PARAGRAPH_CHARS)
        .collect();

    Some(paragraphs.join(" "))
}

/// Descendant text nodes, each trimmed, joined by single spaces.
fn node_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace and drop sentence fragments too short to be content.
fn clean_content(content: &str) -> String {
    collapse_whitespace(content)
        .split(". ")
        .map(str::trim)
        .filter(|fragment| char_len(fragment) > MIN_FRAGMENT_CHARS)
        .collect::<Vec<_>>()
        .join(". ")
}

fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }
    result.trim().to_string()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;
    use crate::fetch::FetchError;

    const MAIN_TEXT: &str = "Bears are large mammals found across North America, Europe and Asia. \
                             They have thick fur and strong claws used for digging and climbing.";

    fn sentence(prefix: &str, words: usize) -> String {
        (0..words)
            .map(|i| format!("{prefix}{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn test_config() -> ExtractionConfig {
        ExtractionConfig {
            politeness_delay_ms: 0,
            ..ExtractionConfig::default()
        }
    }

    struct StaticFetcher {
        body: Result<String, u16>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                body: Err(status),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for StaticFetcher {
        fn fetch<'a>(
            &'a self,
            url: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
            self.calls.lock().unwrap().push(url.to_string());
            let result = self.body.clone().map_err(|status| FetchError::Status {
                url: url.to_string(),
                status,
            });
            Box::pin(async move { result })
        }
    }

    fn extractor(fetcher: Arc<StaticFetcher>, config: ExtractionConfig) -> ContentExtractor {
        ContentExtractor::new(fetcher, Arc::new(SimulatedPassages::default()), config)
    }

    #[test]
    fn test_main_region_is_extracted() {
        let html = format!(
            r#"<html><body>
                <nav>Home | About | Contact | Careers | Press | Sitemap | Privacy</nav>
                <div class="sidebar">Unrelated sidebar promotion with plenty of words to read.</div>
                <main><p>{MAIN_TEXT}</p></main>
                <footer>Copyright footer text that should never be extracted at all.</footer>
            </body></html>"#
        );

        let text = extract_page_text(&html, &test_config()).unwrap();
        assert_eq!(text, MAIN_TEXT);
    }

    #[test]
    fn test_non_content_nodes_are_removed_from_regions() {
        let html = format!(
            r#"<html><body><main>
                <script>var tracking = "do not include this";</script>
                <form><button>Subscribe now</button></form>
                <p>{MAIN_TEXT}</p>
            </main></body></html>"#
        );

        let text = extract_page_text(&html, &test_config()).unwrap();
        assert!(!text.contains("tracking"));
        assert!(!text.contains("Subscribe"));
        assert!(text.contains("thick fur"));
    }

    #[test]
    fn test_footer_paragraphs_are_not_extracted() {
        let html = "<html><body><p>short</p><footer><p>Copyright 2024 Example Corporation \
                    all rights reserved, including the right to reproduce this page in any \
                    form whatsoever.</p></footer></body></html>";
        assert!(extract_page_text(html, &test_config()).is_none());
    }

    #[test]
    fn test_content_class_inside_header_is_not_extracted() {
        let html = format!(
            r#"<html><body>
                <header><div class="content">Site banner marketing copy that goes on and on
                about offers, newsletters, seasonal deals and everything except the article
                itself.</div></header>
                <p>{MAIN_TEXT}</p>
            </body></html>"#
        );

        let text = extract_page_text(&html, &test_config()).unwrap();
        assert!(!text.contains("banner"));
        assert_eq!(text, MAIN_TEXT);
    }

    #[test]
    fn test_small_selector_match_falls_through() {
        // `main` matches but is too short; the next selector with substance wins.
        let html = format!(
            r#"<html><body>
                <main>Tiny main.</main>
                <div class="entry-content"><p>{MAIN_TEXT}</p></div>
            </body></html>"#
        );

        let text = extract_page_text(&html, &test_config()).unwrap();
        assert_eq!(text, MAIN_TEXT);
    }

    #[test]
    fn test_scored_blocks_take_top_five() {
        let counts = [25, 26, 27, 28, 29, 30];
        let paragraphs: String = counts
            .iter()
            .map(|n| format!("<p>{}</p>", sentence(&format!("w{n}x"), *n)))
            .collect();
        let html = format!("<html><body>{paragraphs}</body></html>");

        let text = extract_page_text(&html, &test_config()).unwrap();

        let expected = [30, 29, 28, 27, 26]
            .iter()
            .map(|n| sentence(&format!("w{n}x"), *n))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_paragraph_boost_outranks_larger_div() {
        // 30 words in a <p> scores 45; a 40-word <div> scores 40.
        let html = format!(
            "<html><body><div>{}</div><p>{}</p></body></html>",
            sentence("d", 40),
            sentence("p", 30)
        );

        let mut document = Html::parse_document(&html);
        strip_non_content(&mut document);
        let text = scored_blocks(&document).unwrap();
        assert!(text.starts_with("p0 p1"));
    }

    #[test]
    fn test_oversized_blocks_are_ignored() {
        let html = format!("<html><body><p>{}</p></body></html>", sentence("z", 600));
        let document = Html::parse_document(&html);
        assert!(scored_blocks(&document).is_none());
    }

    #[test]
    fn test_unusable_page_yields_none() {
        let html = "<html><body><p>Too short.</p><nav>menu menu menu</nav></body></html>";
        assert!(extract_page_text(html, &test_config()).is_none());
    }

    #[test]
    fn test_content_is_truncated() {
        let long = (0..200)
            .map(|i| format!("Sentence number {i} talks about bears in detail"))
            .collect::<Vec<_>>()
            .join(". ");
        let html = format!("<html><body><main>{long}</main></body></html>");

        let config = test_config();
        let text = extract_page_text(&html, &config).unwrap();
        assert_eq!(text.chars().count(), config.max_content_chars);
    }

    #[test]
    fn test_clean_content_drops_short_fragments() {
        let cleaned = clean_content("Menu. Skip. This sentence is long enough to keep.   Ok");
        assert_eq!(cleaned, "This sentence is long enough to keep");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("hello   world"), "hello world");
        assert_eq!(collapse_whitespace("  hello\n\n  world  "), "hello world");
    }

    #[tokio::test]
    async fn test_thin_page_falls_back_to_simulated_passage() {
        let fetcher = Arc::new(StaticFetcher::ok(
            "<html><body><p>Nothing here.</p></body></html>",
        ));
        let extractor = extractor(Arc::clone(&fetcher), test_config());

        let text = extractor.extract("https://www.britannica.com/animal/bear").await;
        assert!(text.starts_with("Encyclopedia Britannica provides"));
    }

    #[tokio::test]
    async fn test_fetch_error_falls_back_to_simulated_passage() {
        let fetcher = Arc::new(StaticFetcher::failing(503));
        let extractor = extractor(Arc::clone(&fetcher), test_config());

        let text = extractor.extract("https://www.python.org/doc/").await;
        assert!(text.starts_with("Python is a high-level programming language"));
        // Single attempt, no retries.
        assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_politeness_delay_precedes_every_fetch() {
        let fetcher = Arc::new(StaticFetcher::failing(500));
        let extractor = extractor(Arc::clone(&fetcher), ExtractionConfig::default());

        let start = tokio::time::Instant::now();
        extractor.extract("https://a.example/").await;
        extractor.extract("https://b.example/").await;

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(fetcher.calls.lock().unwrap().len(), 2);
    }
}
