use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use factcheck_engine::analysis::Analyzer;
use factcheck_engine::config;
use factcheck_engine::server::{self, AppState};
use factcheck_engine::FactChecker;
use factcheck_fetch::{ContentExtractor, HttpPageFetcher, RuleTableDiscovery, SimulatedPassages};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Fact-check engine starting");

    // Load configuration — fail loudly on misconfiguration.
    let config_dir = std::env::var("FACTCHECK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let engine_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration — refusing to start");
            std::process::exit(1);
        }
    };
    let system = engine_config.system;

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    // One pooled client for page fetches and encyclopedia lookups.
    let http = reqwest::Client::builder()
        .user_agent(system.extraction.user_agent.as_str())
        .build()
        .expect("Failed to build HTTP client");

    let fetcher = Arc::new(HttpPageFetcher::new(
        http.clone(),
        Duration::from_secs(system.extraction.fetch_timeout_seconds),
    ));
    let extractor = ContentExtractor::new(
        fetcher,
        Arc::new(SimulatedPassages::default()),
        system.extraction.clone(),
    );
    let discovery = Arc::new(RuleTableDiscovery::new(http, system.discovery.clone()));
    let analyzer = Analyzer::new(&system.analysis, Arc::new(engine_config.patterns));

    let checker = FactChecker::new(
        discovery,
        extractor,
        analyzer,
        system.analysis.clone(),
        system.discovery.max_sources,
    );

    let state = Arc::new(AppState {
        checker: Arc::new(checker),
        metrics_handle,
    });

    let app = server::router(state);

    let port: u16 = std::env::var("FACTCHECK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Fact-check engine listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
