use crate::error::Result;
use crate::reports::{RunReportRequest, RunReportResponse};
use async_trait::async_trait;

/// GA4 Data API `runReport` for one property
#[async_trait]
pub trait AnalyticsPort: Send + Sync {
    async fn run_report(&self, property_id: &str, request: &RunReportRequest) -> Result<RunReportResponse>;
}

/// Source of OAuth2 bearer tokens for Google APIs
#[async_trait]
pub trait AccessTokenPort: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

// Plain GET used for the spreadsheet CSV exports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
