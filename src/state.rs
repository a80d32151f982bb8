// Application state shared by the MCP endpoint and health handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::oauth::TokenProvider;
use crate::upstream::{CatalogApi, ZdfClient};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
    pub clock: Arc<dyn Clock>,
    pub start_time: Instant,
    pub ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            clock,
            start_time: Instant::now(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wire the real catalog client. One reqwest client (and connection
    /// pool) is shared by token requests and API calls.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let tokens = TokenProvider::new(
            http.clone(),
            &config.token_url,
            &config.client_id,
            &config.client_secret,
        );
        let catalog = ZdfClient::new(http, &config.zdf_url, tokens);

        tracing::info!(
            zdf_url = %config.zdf_url,
            timeout_secs = config.upstream_timeout.as_secs(),
            "AppState initialised"
        );

        Ok(Self::new(Arc::new(catalog), Arc::new(SystemClock)))
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Relaxed);
        tracing::info!("Server marked as READY");
    }
}
