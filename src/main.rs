use clap::Parser;
use shop_scrape::schedule::{DailySchedule, Pipeline, ScrapeJob, run_daily};
use shop_scrape::{HttpFetcher, ScrapeConfig, notify};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ScrapeConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ScrapeConfig::default(),
    };
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(pages) = args.pages {
        config.page_count = pages;
    }
    if let Some(webhook) = args.webhook {
        config.notification.webhook_url = Some(webhook);
    }

    let pipeline = match Pipeline::from_config(&config.schedule) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            ::log::error!("{}", e);
            std::process::exit(2);
        }
    };
    let fetcher = match HttpFetcher::new(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            ::log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(2);
        }
    };
    let notifier = notify::from_config(&config.notification);
    let job = ScrapeJob::new(&config, &fetcher, notifier.as_ref());

    ::log::info!(
        "Scraping {} listing pages from {} into {}",
        config.page_count,
        config.origin,
        config.output_path.display()
    );

    if args.once {
        if let Err(e) = pipeline.run(&job).await {
            ::log::error!("Run failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let schedule = match DailySchedule::from_config(&config.schedule) {
        Ok(schedule) => schedule,
        Err(e) => {
            ::log::error!("{}", e);
            std::process::exit(2);
        }
    };
    run_daily(&schedule, &pipeline, &job).await;
}
