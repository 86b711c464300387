use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport error while requesting {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    BadStatus { url: String, status: u16 },

    #[error("CSV error: {0}")]
    Serialization(#[from] csv::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Step '{step}' failed after {attempts} attempt(s)")]
    StepFailed { step: String, attempts: usize },
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        let url = value
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        Error::Transport {
            url,
            message: value.to_string(),
        }
    }
}
