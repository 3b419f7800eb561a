use reqwest::header::HeaderMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://iplocate.io/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct Config {
    /// API root, e.g. for enterprise hosts. One trailing slash is stripped.
    pub base_url: String,
    /// Per-request budget. Zero means the default.
    pub timeout: Duration,
    pub http_client_options: HttpClientOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http_client_options: HttpClientOptions::default(),
        }
    }
}

/// Caller overrides applied to every request.
#[derive(Debug, Clone, Default)]
pub struct HttpClientOptions {
    /// Merged over `Accept` and `User-Agent`; same-named entries replace them.
    pub headers: HeaderMap,
    /// Extra query parameters. `apikey` is always taken from the client.
    pub query: Vec<(String, String)>,
    pub client: Option<reqwest::Client>,
}
