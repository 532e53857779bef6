use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Service account signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid date '{0}': expected YYYY-MM-DD, today, yesterday or NdaysAgo")]
    InvalidDate(String),

    #[error("Unknown report: {0}")]
    UnknownReport(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
