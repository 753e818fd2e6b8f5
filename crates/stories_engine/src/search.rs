use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::{decode_hits, FailureKind, SearchError, StoryHit};

pub const DEFAULT_SEARCH_URL: &str = "https://hn.algolia.com/api/v1/search";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub search_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Remote search: a query in, stories out.
#[async_trait::async_trait]
pub trait StorySearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<StoryHit>, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStorySearch {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestStorySearch {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn query_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(&self.settings.search_url, &[("query", query)])
            .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl StorySearch for ReqwestStorySearch {
    async fn search(&self, query: &str) -> Result<Vec<StoryHit>, SearchError> {
        let url = self.query_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        decode_hits(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
