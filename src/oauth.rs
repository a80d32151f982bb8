// Catalog API access tokens, OAuth 2.0 client-credentials grant.
// One token is cached per process and refreshed shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::UpstreamError;

const TOKEN_EXPIRY_BUFFER_SECS: i64 = 60;
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .checked_sub_signed(Duration::seconds(TOKEN_EXPIRY_BUFFER_SECS))
            .is_some_and(|refresh_at| now < refresh_at)
    }
}

/// Hands out bearer tokens for the catalog API.
///
/// Concurrent callers that find the cache stale wait on the same lock, so a
/// burst of tool calls triggers one token request rather than one each.
pub struct TokenProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, fetching a new one when the cached token is
    /// missing or within the expiry buffer.
    pub async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    /// Drop the cached token, e.g. after the API answered 401.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn fetch_token(&self) -> Result<CachedToken, UpstreamError> {
        tracing::debug!(token_url = %self.token_url, "requesting catalog access token");

        let resp = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| UpstreamError::Auth(format!("token request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(%status, "token endpoint rejected client credentials");
            return Err(UpstreamError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Auth(format!("invalid token response: {}", e)))?;
        if token.access_token.trim().is_empty() {
            return Err(UpstreamError::Auth("token response has no access_token".into()));
        }

        let expires_in = token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = expiry_after(Utc::now(), expires_in).ok_or_else(|| {
            UpstreamError::Auth(format!("invalid expires_in in token response: {}", expires_in))
        })?;
        tracing::info!(expires_in, "catalog access token refreshed");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}

/// `now + expires_in`, or `None` when the lifetime is out of range.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(expires_in).and_then(|lifetime| now.checked_add_signed(lifetime))
}
