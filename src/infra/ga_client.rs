use crate::app::ports::{AccessTokenPort, AnalyticsPort};
use crate::config::AnalyticsConfig;
use crate::error::{DashboardError, Result};
use crate::infra::google_auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::infra::retry::{send_with_retry, RetryPolicy};
use crate::reports::{RunReportRequest, RunReportResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// REST client for the GA4 Data API
pub struct GaClient {
    client: reqwest::Client,
    api_base: String,
    tokens: Arc<dyn AccessTokenPort>,
    retry: RetryPolicy,
}

impl GaClient {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        tokens: Arc<dyn AccessTokenPort>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            tokens,
            retry,
        }
    }

    /// Client backed by the configured service account, or `None` when no
    /// credentials are present and the dashboard should run on mock data.
    pub fn from_config(config: &AnalyticsConfig) -> Result<Option<Self>> {
        let Some(key) = ServiceAccountKey::discover(&config.credentials_file)? else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let auth = ServiceAccountAuth::new(&key, Some(&config.token_uri), client.clone())?;
        Ok(Some(Self::new(
            client,
            config.api_base.clone(),
            Arc::new(auth),
            RetryPolicy::with_attempts(config.max_attempts),
        )))
    }

    fn report_url(&self, property_id: &str) -> String {
        format!("{}/properties/{}:runReport", self.api_base, property_id)
    }
}

/// Pull `error.message` out of a Google error body, else use the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl AnalyticsPort for GaClient {
    #[instrument(skip(self, request), fields(dimensions = request.dimensions.len()))]
    async fn run_report(&self, property_id: &str, request: &RunReportRequest) -> Result<RunReportResponse> {
        let token = self.tokens.access_token().await?;
        let builder = self
            .client
            .post(self.report_url(property_id))
            .bearer_auth(token)
            .json(request);

        let resp = send_with_retry(builder, &self.retry).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let report: RunReportResponse = resp.json().await?;
        debug!("runReport returned {} rows", report.rows.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticToken;

    #[async_trait]
    impl AccessTokenPort for StaticToken {
        async fn access_token(&self) -> Result<String> {
            Ok("token".to_string())
        }
    }

    #[test]
    fn test_report_url_trims_trailing_slash() {
        let client = GaClient::new(
            reqwest::Client::new(),
            "https://analyticsdata.googleapis.com/v1beta/",
            Arc::new(StaticToken),
            RetryPolicy::default(),
        );
        assert_eq!(
            client.report_url("461877498"),
            "https://analyticsdata.googleapis.com/v1beta/properties/461877498:runReport"
        );
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"code":403,"message":"User does not have sufficient permissions","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(api_error_message(body), "User does not have sufficient permissions");
        assert_eq!(api_error_message("  bad gateway \n"), "bad gateway");
    }
}
