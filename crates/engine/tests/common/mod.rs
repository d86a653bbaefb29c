#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use factcheck_common::config::{AnalysisConfig, ExtractionConfig};
use factcheck_common::types::{CandidateSource, SourceCategory};
use factcheck_engine::analysis::{Analyzer, PatternTables};
use factcheck_engine::FactChecker;
use factcheck_fetch::{ContentExtractor, FetchError, PageFetcher, SimulatedPassages, SourceDiscovery};

/// Discovery that always proposes the same candidates.
pub struct StaticDiscovery(pub Vec<CandidateSource>);

impl SourceDiscovery for StaticDiscovery {
    fn discover<'a>(
        &'a self,
        _statement: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CandidateSource>> + Send + 'a>> {
        let sources = self.0.clone();
        Box::pin(async move { sources })
    }
}

/// Discovery that panics, standing in for a bug inside the pipeline.
pub struct PanickingDiscovery;

impl SourceDiscovery for PanickingDiscovery {
    fn discover<'a>(
        &'a self,
        _statement: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CandidateSource>> + Send + 'a>> {
        panic!("discovery exploded")
    }
}

/// Serves canned pages by URL and records every fetch. Unknown URLs 404.
#[derive(Default)]
pub struct RecordingFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for RecordingFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        self.calls.lock().unwrap().push(url.to_string());
        let result = self.pages.get(url).cloned().ok_or(FetchError::Status {
            url: url.to_string(),
            status: 404,
        });
        Box::pin(async move { result })
    }
}

pub fn source(name: &str, url: &str, relevance: f64) -> CandidateSource {
    CandidateSource::new(name, url, relevance, SourceCategory::General)
}

/// A page whose `<main>` region carries `text`.
pub fn page(text: &str) -> String {
    format!(
        "<html><head><title>t</title></head><body>\
         <nav>Home About Contact</nav><main><p>{text}</p></main>\
         <footer>Copyright</footer></body></html>"
    )
}

pub fn checker(
    sources: Vec<CandidateSource>,
    fetcher: Arc<RecordingFetcher>,
    analysis: AnalysisConfig,
) -> FactChecker {
    let max_sources = sources.len().max(1);
    checker_with_discovery(Arc::new(StaticDiscovery(sources)), fetcher, analysis, max_sources)
}

pub fn checker_with_discovery(
    discovery: Arc<dyn SourceDiscovery>,
    fetcher: Arc<RecordingFetcher>,
    analysis: AnalysisConfig,
    max_sources: usize,
) -> FactChecker {
    let extraction = ExtractionConfig {
        politeness_delay_ms: 0,
        ..ExtractionConfig::default()
    };
    let extractor = ContentExtractor::new(
        fetcher,
        Arc::new(SimulatedPassages::default()),
        extraction,
    );
    let analyzer = Analyzer::new(&analysis, Arc::new(PatternTables::default()));

    FactChecker::new(
        discovery,
        extractor,
        analyzer,
        analysis,
        max_sources,
    )
}

pub const EARTH_ROUND: &str = "The earth is a round planet. Photographs taken from orbit show \
     that the earth is round, and ships disappear hull first over the horizon.";

pub const EARTH_ORBIT: &str = "Our planet earth travels around the sun once every year. \
     The earth also spins on its axis, which gives us day and night.";

pub const BREAD: &str = "Bread is made by mixing flour, water, salt and yeast into a dough, \
     leaving it to rise, and then baking it in a hot oven until golden.";
