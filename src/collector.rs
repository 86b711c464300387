use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, fetch_ok};
use crate::filter::LinkFilter;
use crate::parsers::{listing, product};
use crate::results::Dataset;

/// Running totals for one run, logged when the run finishes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub listing_pages_fetched: usize,
    pub listing_pages_skipped: usize,
    pub detail_pages_fetched: usize,
    pub detail_pages_skipped: usize,
}

/// Walks the listing pages, fetches every product page and writes the CSV.
///
/// Requests are issued one at a time. A failed request only drops the page or
/// link it was for; the run carries on with the next one.
pub struct Collector<'a, F: Fetcher + ?Sized> {
    config: &'a ScrapeConfig,
    fetcher: &'a F,
    filter: LinkFilter,
}

impl<'a, F: Fetcher + ?Sized> Collector<'a, F> {
    pub fn new(config: &'a ScrapeConfig, fetcher: &'a F) -> Result<Self> {
        url::Url::parse(&config.origin)?;
        let filter = LinkFilter::from_config(config)?;
        Ok(Self {
            config,
            fetcher,
            filter,
        })
    }

    /// Fetches and extracts every product, without filtering or writing.
    ///
    /// The result holds exactly one record per detail page that was fetched
    /// successfully.
    pub async fn gather(&self) -> (Dataset, RunStats) {
        let mut dataset = Dataset::new();
        let mut stats = RunStats::default();

        for page in 1..=self.config.page_count {
            let url = self.config.listing_url(page);
            let body = match fetch_ok(self.fetcher, &url).await {
                Ok(body) => body,
                Err(e) => {
                    ::log::error!("Failed to retrieve listing page {}: {}", page, e);
                    stats.listing_pages_skipped += 1;
                    continue;
                }
            };
            stats.listing_pages_fetched += 1;

            let links = self.filter.select(listing::parse_links(&body));
            ::log::info!("Found {} product links on page {}", links.len(), page);

            for link in links {
                let product_url = self.config.product_url(&link);
                match fetch_ok(self.fetcher, &product_url).await {
                    Ok(body) => {
                        dataset.push(product::parse(&body));
                        stats.detail_pages_fetched += 1;
                    }
                    Err(e) => {
                        ::log::error!("Failed to retrieve product page: {}", e);
                        stats.detail_pages_skipped += 1;
                    }
                }
            }
        }

        (dataset, stats)
    }

    /// Gathers, drops untitled records, writes the artifact and returns what
    /// was written. Only a failure to write is returned as an error.
    pub async fn collect(&self) -> Result<Dataset> {
        let start_time = std::time::Instant::now();
        let (raw, stats) = self.gather().await;
        let raw_len = raw.len();

        let dataset = raw.retain_titled();
        dataset.save(&self.config.output_path)?;

        ::log::info!(
            "Scrape complete - listing pages {}/{} ok, product pages {} ok / {} failed, {} of {} records kept in {:.2} seconds",
            stats.listing_pages_fetched,
            stats.listing_pages_fetched + stats.listing_pages_skipped,
            stats.detail_pages_fetched,
            stats.detail_pages_skipped,
            dataset.len(),
            raw_len,
            start_time.elapsed().as_secs_f64()
        );

        Ok(dataset)
    }

    pub async fn run_scrape(&self) -> Result<()> {
        self.collect().await.map(|_| ())
    }
}
