use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Outbound page fetch collaborator.
/// Uses boxed future return for object safety (dyn dispatch); tests provide
/// canned pages, production uses [`HttpPageFetcher`].
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL and return the raw response body.
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;
}

/// reqwest-backed fetcher. The client pools connections and is safe to share
/// between concurrent requests.
pub struct HttpPageFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(fetch_url(&self.http, url, self.timeout))
    }
}

/// Fetch a URL once and return the body text. Non-success statuses are errors.
pub async fn fetch_url(
    http: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let start = std::time::Instant::now();

    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;

    let latency = start.elapsed().as_secs_f64();
    let domain = extract_domain(url);
    metrics::histogram!("fetch.request.latency", "domain" => domain).record(latency);

    Ok(body)
}

pub(crate) fn extract_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or("unknown")
        .to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out fetching {0}")]
    Timeout(String),
}
