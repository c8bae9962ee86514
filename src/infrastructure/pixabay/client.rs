//! Pixabay API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::SearchResponse;
use crate::domain::entities::{PageResult, SearchQuery};
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageSearchPort;
use crate::domain::session::DEFAULT_PAGE_SIZE;

pub const PIXABAY_API_BASE: &str = "https://pixabay.com/api/";
const USER_AGENT: &str = concat!("pixgrid/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pixabay adapter settings.
#[derive(Debug, Clone)]
pub struct PixabayConfig {
    pub base_url: String,
    pub api_key: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl PixabayConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: PIXABAY_API_BASE.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Pixabay image search client.
pub struct PixabayClient {
    client: Client,
    config: PixabayConfig,
}

impl PixabayClient {
    /// Creates client for the given settings.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: PixabayConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Query parameters for one page request; filters are fixed.
    fn query_params(&self, query: &SearchQuery, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.config.api_key.clone()),
            ("q", query.as_str().to_string()),
            ("image_type", "photo".to_string()),
            ("orientation", "horizontal".to_string()),
            ("safesearch", "true".to_string()),
            ("per_page", self.config.page_size.to_string()),
            ("page", page.to_string()),
        ]
    }

    fn map_send_error(e: &reqwest::Error) -> FetchError {
        warn!(error = %e, "Failed to reach image search API");
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::network("failed to connect to image search API")
        } else {
            FetchError::network(e.to_string())
        }
    }
}

/// Pixabay answers 400 with a plain-text body once `page` passes the last
/// accessible hit.
fn is_page_out_of_range(status: StatusCode, body: &str) -> bool {
    status == StatusCode::BAD_REQUEST && body.to_ascii_lowercase().contains("out of valid range")
}

fn error_for_status(status: StatusCode, body: &str) -> FetchError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        _ => {
            let message = body.trim();
            let message = if message.is_empty() {
                status.canonical_reason().unwrap_or("unknown error")
            } else {
                message
            };
            FetchError::http(status.as_u16(), message)
        }
    }
}

#[async_trait]
impl ImageSearchPort for PixabayClient {
    async fn fetch_page(&self, query: &SearchQuery, page: u32) -> Result<PageResult, FetchError> {
        debug!(query = %query, page, per_page = self.config.page_size, "Requesting image page");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.query_params(query, page))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if is_page_out_of_range(status, &body) {
                debug!(page, "Requested page is past the last hit");
                return Ok(PageResult::default());
            }

            warn!(status = %status, "Image search API returned an error");
            return Err(error_for_status(status, &body));
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse image search response");
            FetchError::invalid_response(e.to_string())
        })?;

        debug!(
            hits = search_response.hits.len(),
            total = search_response.total,
            total_hits = search_response.total_hits,
            "Image page received"
        );

        Ok(search_response.into())
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn client() -> PixabayClient {
        PixabayClient::new(PixabayConfig::new("test-key").with_page_size(40)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = PixabayClient::new(PixabayConfig::new("test-key"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_query_params_carry_fixed_filters() {
        let query = SearchQuery::new("yellow flowers").unwrap();
        let params = client().query_params(&query, 3);

        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("key"), Some("test-key"));
        assert_eq!(get("q"), Some("yellow flowers"));
        assert_eq!(get("image_type"), Some("photo"));
        assert_eq!(get("orientation"), Some("horizontal"));
        assert_eq!(get("safesearch"), Some("true"));
        assert_eq!(get("per_page"), Some("40"));
        assert_eq!(get("page"), Some("3"));
    }

    #[test_case(StatusCode::BAD_REQUEST, "[ERROR 400] \"page\" is out of valid range.", true ; "pixabay_range_error")]
    #[test_case(StatusCode::BAD_REQUEST, "[ERROR 400] Invalid or missing API key", false ; "bad_key")]
    #[test_case(StatusCode::INTERNAL_SERVER_ERROR, "out of valid range", false ; "server_error")]
    fn test_page_out_of_range_detection(status: StatusCode, body: &str, expected: bool) {
        assert_eq!(is_page_out_of_range(status, body), expected);
    }

    #[test]
    fn test_error_for_status() {
        assert_eq!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            FetchError::RateLimited
        );
        assert_eq!(
            error_for_status(StatusCode::BAD_GATEWAY, ""),
            FetchError::http(502, "Bad Gateway")
        );
        assert_eq!(
            error_for_status(StatusCode::BAD_REQUEST, " [ERROR 400] Invalid or missing API key "),
            FetchError::http(400, "[ERROR 400] Invalid or missing API key")
        );
    }
}
