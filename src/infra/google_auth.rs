//! Google service-account authentication (JWT bearer grant).
//!
//! The key comes from `GA_CLIENT_EMAIL` / `GA_PRIVATE_KEY` or a downloaded
//! service-account JSON file. Access tokens are cached until shortly before
//! they expire; refreshes are serialized behind one async mutex.

use crate::app::ports::AccessTokenPort;
use crate::constants::{ANALYTICS_READONLY_SCOPE, GOOGLE_TOKEN_URI};
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountKey {
    /// Build from the two env values. Hosting dashboards store the PEM with
    /// literal `\n` sequences, which are turned back into newlines.
    pub fn from_env_values(client_email: Option<String>, private_key: Option<String>) -> Option<Self> {
        let client_email = client_email.filter(|s| !s.trim().is_empty())?;
        let private_key = private_key.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            client_email: client_email.trim().to_string(),
            private_key: private_key.replace("\\n", "\n"),
            token_uri: None,
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_env_values(
            std::env::var("GA_CLIENT_EMAIL").ok(),
            std::env::var("GA_PRIVATE_KEY").ok(),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            DashboardError::Credentials(format!("{}: {}", path.display(), e))
        })
    }

    /// Env vars first, then the credentials file. `None` means GA is not configured.
    pub fn discover(credentials_file: &str) -> Result<Option<Self>> {
        if let Some(key) = Self::from_env() {
            info!("GA service account loaded from environment ({})", key.client_email);
            return Ok(Some(key));
        }
        let path = Path::new(credentials_file);
        if path.exists() {
            let key = Self::from_file(path)?;
            info!("GA service account loaded from {} ({})", path.display(), key.client_email);
            return Ok(Some(key));
        }
        Ok(None)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

pub struct ServiceAccountAuth {
    client_email: String,
    encoding_key: EncodingKey,
    token_uri: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// `token_uri` falls back to the key file's value, then Google's endpoint.
    pub fn new(key: &ServiceAccountKey, token_uri: Option<&str>, client: reqwest::Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| DashboardError::Credentials(format!("invalid private key: {}", e)))?;
        let token_uri = token_uri
            .map(str::to_string)
            .or_else(|| key.token_uri.clone())
            .unwrap_or_else(|| GOOGLE_TOKEN_URI.to_string());
        Ok(Self {
            client_email: key.client_email.clone(),
            encoding_key,
            token_uri,
            client,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Signed RS256 assertion for the token endpoint
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: ANALYTICS_READONLY_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?)
    }

    #[instrument(skip(self), fields(client_email = %self.client_email))]
    async fn exchange(&self) -> Result<CachedToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;
        let resp = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(DashboardError::Token(format!("{}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        debug!("Obtained access token valid for {}s", token.expires_in);
        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenPort for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.token.clone());
        }
        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}
