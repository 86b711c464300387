//! Daily product scraper: walks search result pages, extracts product details
//! and writes them to a CSV file.

pub mod collector;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod notify;
pub mod parsers;
pub mod results;
pub mod schedule;
pub mod utils;

// Re-export commonly used types for convenience
pub use collector::Collector;
pub use config::ScrapeConfig;
pub use error::{Error, Result};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use results::{Dataset, ProductRecord};

use notify::Notifier;

/// Runs one full scrape with the HTTP fetcher and writes the artifact.
pub async fn run_scrape(config: &ScrapeConfig) -> Result<()> {
    let fetcher = HttpFetcher::new(config)?;
    Collector::new(config, &fetcher)?.run_scrape().await
}

/// Sends the configured completion message.
pub async fn notify_completion(config: &ScrapeConfig) -> Result<()> {
    let notifier: Box<dyn Notifier> = notify::from_config(&config.notification);
    notify::notify_completion(notifier.as_ref(), &config.notification).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_completion_logs_by_default() {
        assert!(notify_completion(&ScrapeConfig::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_scrape_survives_unreachable_site() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            // nothing listens on the discard port, so every request fails
            origin: "http://127.0.0.1:9".to_string(),
            page_count: 2,
            request_timeout_secs: 5,
            output_path: dir.path().join("out.csv"),
            ..ScrapeConfig::default()
        };

        run_scrape(&config).await.unwrap();

        let dataset = Dataset::load(&config.output_path).unwrap();
        assert!(dataset.is_empty());
    }
}
