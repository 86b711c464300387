use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shop-scrape")]
#[command(about = "Scrapes product listings once a day and writes them to CSV")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the CSV output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the number of listing pages
    #[arg(short, long)]
    pub pages: Option<usize>,

    /// Post the completion message to this webhook instead of logging it
    #[arg(long)]
    pub webhook: Option<String>,

    /// Run the job once now instead of waiting for the daily trigger
    #[arg(long)]
    pub once: bool,
}
