use crate::config::ScrapeConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Raw response handed back by a [`Fetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only a plain 200 counts
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Page transport used by the collector.
///
/// Implementations return `Err` only for transport failures. Any HTTP status,
/// successful or not, is reported through [`FetchResponse::status`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Fetch `url` and turn a non-success status into [`Error::BadStatus`].
pub async fn fetch_ok<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<String> {
    let response = fetcher.fetch(url).await?;
    if !response.is_success() {
        return Err(Error::BadStatus {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

/// reqwest-backed fetcher that sends the configured outbound headers
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(value) = reqwest::header::HeaderValue::from_str(&config.accept_language) {
            headers.insert(reqwest::header::ACCEPT_LANGUAGE, value);
        } else {
            ::log::warn!(
                "Ignoring unusable Accept-Language header: {:?}",
                config.accept_language
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        ::log::trace!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}
