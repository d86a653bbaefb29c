//! Fact-check engine: statement analysis, the check pipeline and its HTTP
//! surface.

pub mod analysis;
pub mod config;
pub mod pipeline;
pub mod server;

pub use pipeline::FactChecker;
