//! Evidence retrieval: candidate source discovery, page fetching and
//! body-text extraction with simulated fallbacks.

pub mod discovery;
pub mod extract;
pub mod fetch;
pub mod simulated;

pub use discovery::{RuleTableDiscovery, SourceDiscovery};
pub use extract::{extract_page_text, ContentExtractor};
pub use fetch::{FetchError, HttpPageFetcher, PageFetcher};
pub use simulated::SimulatedPassages;
