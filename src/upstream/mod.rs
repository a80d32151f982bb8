//! Catalog API access: the [`CatalogApi`] seam used by the tools, its wire
//! types, and the reqwest implementation.

pub mod client;
pub mod graphql;
pub mod models;

use async_trait::async_trait;

use crate::error::UpstreamError;
use graphql::{EpisodeQuery, SearchItem};
use models::{
    BrandApiResponse, BroadcastScheduleResponse, SearchResponse, SeasonResponse, SeriesResponse,
};

pub use client::ZdfClient;

/// Read-only operations against the catalog and EPG.
///
/// `page` is 1-based. Implementations must not retry on their own; a failed
/// call is reported to the caller as is.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search_documents(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> Result<SearchResponse, UpstreamError>;

    /// `from` and `to` are RFC 3339 timestamps, forwarded verbatim.
    async fn broadcast_schedule(
        &self,
        from: &str,
        to: &str,
        tv_service: Option<&str>,
        limit: u32,
        page: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError>;

    /// Broadcasts around the present moment ("present/following") for one channel.
    async fn current_broadcasts(
        &self,
        tv_service: &str,
        limit: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError>;

    async fn list_brands(&self, limit: u32, page: u32) -> Result<BrandApiResponse, UpstreamError>;

    async fn list_series(&self, limit: u32, page: u32) -> Result<SeriesResponse, UpstreamError>;

    async fn list_seasons(&self, limit: u32, page: u32) -> Result<SeasonResponse, UpstreamError>;

    /// The first search hit for a series name, or `None` when nothing matched.
    async fn series_episodes(
        &self,
        query: &EpisodeQuery,
    ) -> Result<Option<SearchItem>, UpstreamError>;
}
