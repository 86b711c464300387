use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a scrape run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Site origin every product link is prefixed with
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path of the search results page, relative to the origin
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Fixed query parameters (search term, category, refinements)
    #[serde(default = "default_query")]
    pub query: Vec<(String, String)>,

    /// Number of listing pages to walk, starting at page 1
    #[serde(default = "default_page_count")]
    pub page_count: usize,

    /// Where the CSV artifact is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Outbound User-Agent header
    #[serde(default)]
    pub user_agent: String,

    /// Outbound Accept-Language header
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Regex patterns a product link must match (empty accepts all)
    #[serde(default)]
    pub link_include_patterns: Vec<String>,

    /// Regex patterns that reject a product link
    #[serde(default)]
    pub link_exclude_patterns: Vec<String>,

    /// When the job fires and how often it is retried
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Completion message settings
    #[serde(default)]
    pub notification: NotificationConfig,
}

/// Daily trigger and retry policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_hour")]
    pub hour: u32,

    #[serde(default)]
    pub minute: u32,

    /// Offset from UTC the trigger time is expressed in
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Extra attempts per step after the first failure
    #[serde(default = "default_retries")]
    pub retries: usize,

    /// Pause between attempts of a failing step
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Step names in execution order ("scrape", "notify")
    #[serde(default = "default_steps")]
    pub steps: Vec<String>,
}

/// Completion notification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,

    #[serde(default = "default_subject")]
    pub subject: String,

    #[serde(default = "default_body")]
    pub body: String,

    /// If set, the notification is POSTed here as JSON instead of logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

fn default_origin() -> String {
    "https://www.amazon.in".to_string()
}

fn default_search_path() -> String {
    "/s".to_string()
}

fn default_query() -> Vec<(String, String)> {
    vec![
        ("k".to_string(), "smartphone".to_string()),
        ("i".to_string(), "electronics".to_string()),
        ("rh".to_string(), "n:1389401031".to_string()),
    ]
}

fn default_page_count() -> usize {
    20
}

fn default_output_path() -> PathBuf {
    PathBuf::from("amazon_data.csv")
}

fn default_accept_language() -> String {
    "en-US, en;q=0.5".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_hour() -> u32 {
    11
}

/// IST
fn default_utc_offset_minutes() -> i32 {
    330
}

fn default_retries() -> usize {
    1
}

fn default_retry_delay_secs() -> u64 {
    300
}

/// Notify is declared ahead of scrape, matching the job this replaces.
fn default_steps() -> Vec<String> {
    vec!["notify".to_string(), "scrape".to_string()]
}

fn default_recipient() -> String {
    "your@email.com".to_string()
}

fn default_subject() -> String {
    "Amazon Web Scraping Completed".to_string()
}

fn default_body() -> String {
    "The Amazon web scraping task has completed successfully.".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            search_path: default_search_path(),
            query: default_query(),
            page_count: default_page_count(),
            output_path: default_output_path(),
            user_agent: String::new(),
            accept_language: default_accept_language(),
            request_timeout_secs: default_request_timeout_secs(),
            link_include_patterns: Vec::new(),
            link_exclude_patterns: Vec::new(),
            schedule: ScheduleConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
            utc_offset_minutes: default_utc_offset_minutes(),
            retries: default_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            steps: default_steps(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            subject: default_subject(),
            body: default_body(),
            webhook_url: None,
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// URL of listing page `page` (1-based)
    pub fn listing_url(&self, page: usize) -> String {
        let mut url = format!("{}{}", self.origin, self.search_path);
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .append_pair("page", &page.to_string())
            .finish();
        url.push('?');
        url.push_str(&query);
        url
    }

    /// Absolute URL of a product link discovered on a listing page
    pub fn product_url(&self, link: &str) -> String {
        crate::utils::absolutize(&self.origin, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ScrapeConfig::from_json("{}").unwrap();
        assert_eq!(config, ScrapeConfig::default());
        assert_eq!(config.page_count, 20);
        assert_eq!(config.schedule.steps, vec!["notify", "scrape"]);
        assert_eq!(config.notification.subject, "Amazon Web Scraping Completed");
    }

    #[test]
    fn test_partial_override() {
        let config = ScrapeConfig::from_json(
            r#"{"page_count": 3, "output_path": "out.csv", "schedule": {"hour": 6}}"#,
        )
        .unwrap();
        assert_eq!(config.page_count, 3);
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
        assert_eq!(config.schedule.hour, 6);
        assert_eq!(config.schedule.retries, 1);
    }

    #[test]
    fn test_listing_url() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.listing_url(3),
            "https://www.amazon.in/s?k=smartphone&i=electronics&rh=n%3A1389401031&page=3"
        );
    }

    #[test]
    fn test_product_url() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.product_url("/Phone-X/dp/B0001"),
            "https://www.amazon.in/Phone-X/dp/B0001"
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ScrapeConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
