// ---------------------------------------------------------------------------
// upstream/client.rs -- reqwest implementation of CatalogApi
// ---------------------------------------------------------------------------

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::CatalogApi;
use super::graphql::{EpisodeQuery, GraphQlResponse, SearchDocumentsData, SearchItem};
use super::models::{
    BrandApiResponse, BroadcastScheduleResponse, SearchResponse, SeasonResponse, SeriesResponse,
};
use crate::error::UpstreamError;
use crate::oauth::TokenProvider;

/// Upstream bodies are kept in errors for diagnostics, but not unbounded.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub struct ZdfClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl ZdfClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: TokenProvider) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let token = self.tokens.access_token().await?;
        tracing::debug!(path, params = query.len(), "catalog GET");

        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        self.read_json(path, resp).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let status = resp.status();
        tracing::debug!(path, %status, "catalog response");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status,
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn paging(limit: u32, page: u32) -> [(&'static str, String); 2] {
    [("limit", limit.to_string()), ("page", page.to_string())]
}

#[async_trait]
impl CatalogApi for ZdfClient {
    async fn search_documents(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> Result<SearchResponse, UpstreamError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(paging(limit, page));
        self.get_json("/search/documents", &params).await
    }

    async fn broadcast_schedule(
        &self,
        from: &str,
        to: &str,
        tv_service: Option<&str>,
        limit: u32,
        page: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError> {
        let mut params = vec![("from", from.to_string()), ("to", to.to_string())];
        if let Some(service) = tv_service {
            params.push(("tvService", service.to_string()));
        }
        params.extend(paging(limit, page));
        self.get_json("/cmdm/epg/broadcasts", &params).await
    }

    async fn current_broadcasts(
        &self,
        tv_service: &str,
        limit: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError> {
        let params = [
            ("tvService", tv_service.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json("/cmdm/epg/broadcasts/pf", &params).await
    }

    async fn list_brands(&self, limit: u32, page: u32) -> Result<BrandApiResponse, UpstreamError> {
        self.get_json("/cmdm/brands", &paging(limit, page)).await
    }

    async fn list_series(&self, limit: u32, page: u32) -> Result<SeriesResponse, UpstreamError> {
        self.get_json("/cmdm/series", &paging(limit, page)).await
    }

    async fn list_seasons(&self, limit: u32, page: u32) -> Result<SeasonResponse, UpstreamError> {
        self.get_json("/cmdm/seasons", &paging(limit, page)).await
    }

    async fn series_episodes(
        &self,
        query: &EpisodeQuery,
    ) -> Result<Option<SearchItem>, UpstreamError> {
        let token = self.tokens.access_token().await?;
        tracing::debug!(
            first = query.first,
            after_present = query.after.is_some(),
            "catalog GraphQL GetSeriesEpisodes"
        );

        let resp = self
            .http
            .post(self.url("/graphql"))
            .bearer_auth(token)
            .json(&query.request_body())
            .send()
            .await?;

        let body: GraphQlResponse<SearchDocumentsData> = self.read_json("/graphql", resp).await?;
        if !body.errors.is_empty() {
            let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(UpstreamError::GraphQl(messages.join("; ")));
        }

        Ok(body.data.and_then(SearchDocumentsData::into_first_item))
    }
}
