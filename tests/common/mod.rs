#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};

use mediathek_mcp::clock::FixedClock;
use mediathek_mcp::error::UpstreamError;
use mediathek_mcp::state::AppState;
use mediathek_mcp::upstream::CatalogApi;
use mediathek_mcp::upstream::graphql::{EpisodeQuery, SearchItem};
use mediathek_mcp::upstream::models::{
    BrandApiResponse, BroadcastScheduleResponse, SearchResponse, SeasonResponse, SeriesResponse,
};

/// One recorded upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { query: String, limit: u32, page: u32 },
    Schedule { from: String, to: String, tv_service: Option<String>, limit: u32, page: u32 },
    Current { tv_service: String, limit: u32 },
    Brands { limit: u32, page: u32 },
    Series { limit: u32, page: u32 },
    Seasons { limit: u32, page: u32 },
    Episodes(EpisodeQuery),
}

/// In-memory catalog: canned responses, recorded calls, optional failure.
#[derive(Default)]
pub struct StubCatalog {
    pub calls: Mutex<Vec<Call>>,
    pub search: SearchResponse,
    pub schedule: BroadcastScheduleResponse,
    pub brands: BrandApiResponse,
    pub series: SeriesResponse,
    pub seasons: SeasonResponse,
    pub episodes: Option<SearchItem>,
    pub fail_with: Option<u16>,
}

impl StubCatalog {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(status) => Err(UpstreamError::Status {
                status: reqwest::StatusCode::from_u16(status).unwrap(),
                body: "upstream exploded".into(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for StubCatalog {
    async fn search_documents(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> Result<SearchResponse, UpstreamError> {
        self.record(Call::Search { query: query.into(), limit, page })?;
        Ok(self.search.clone())
    }

    async fn broadcast_schedule(
        &self,
        from: &str,
        to: &str,
        tv_service: Option<&str>,
        limit: u32,
        page: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError> {
        self.record(Call::Schedule {
            from: from.into(),
            to: to.into(),
            tv_service: tv_service.map(String::from),
            limit,
            page,
        })?;
        Ok(self.schedule.clone())
    }

    async fn current_broadcasts(
        &self,
        tv_service: &str,
        limit: u32,
    ) -> Result<BroadcastScheduleResponse, UpstreamError> {
        self.record(Call::Current { tv_service: tv_service.into(), limit })?;
        Ok(self.schedule.clone())
    }

    async fn list_brands(&self, limit: u32, page: u32) -> Result<BrandApiResponse, UpstreamError> {
        self.record(Call::Brands { limit, page })?;
        Ok(self.brands.clone())
    }

    async fn list_series(&self, limit: u32, page: u32) -> Result<SeriesResponse, UpstreamError> {
        self.record(Call::Series { limit, page })?;
        Ok(self.series.clone())
    }

    async fn list_seasons(&self, limit: u32, page: u32) -> Result<SeasonResponse, UpstreamError> {
        self.record(Call::Seasons { limit, page })?;
        Ok(self.seasons.clone())
    }

    async fn series_episodes(
        &self,
        query: &EpisodeQuery,
    ) -> Result<Option<SearchItem>, UpstreamError> {
        self.record(Call::Episodes(query.clone()))?;
        Ok(self.episodes.clone())
    }
}

pub const NOW: &str = "2025-12-27T20:30:00+01:00";

pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(NOW).unwrap().with_timezone(&Utc)
}

/// AppState over the stub with the clock frozen at [`NOW`].
pub fn state(stub: &Arc<StubCatalog>) -> AppState {
    let state = AppState::new(stub.clone(), Arc::new(FixedClock(now())));
    state.mark_ready();
    state
}

pub fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

pub fn search_response(total: u64, titles: &[&str]) -> SearchResponse {
    let results: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "score": 10.0 - i as f64,
                "id": format!("doc-{i}"),
                "type": "page",
                "title": title,
                "http://zdf.de/rels/target": {
                    "id": format!("target-{i}"),
                    "webCanonical": format!("https://www.zdf.de/nachrichten/{i}.html")
                }
            })
        })
        .collect();
    from_json(json!({
        "totalResultsCount": total,
        "http://zdf.de/rels/search/results": results
    }))
}

pub fn brands(count: usize, next_archive: Option<&str>) -> BrandApiResponse {
    let brands: Vec<Value> = (0..count)
        .map(|i| json!({ "uuid": format!("brand-{i}"), "brandName": format!("Brand {i}") }))
        .collect();
    from_json(json!({
        "http://zdf.de/rels/cmdm/brands": brands,
        "next-archive": next_archive
    }))
}

pub fn broadcasts(slots: &[(&str, &str, &str)]) -> BroadcastScheduleResponse {
    let broadcasts: Vec<Value> = slots
        .iter()
        .map(|(title, begin, end)| {
            json!({
                "airtimeBegin": begin,
                "airtimeEnd": end,
                "tvService": "ZDF",
                "title": title
            })
        })
        .collect();
    from_json(json!({ "http://zdf.de/rels/cmdm/broadcasts": broadcasts }))
}

/// Helper: collect a response body into a serde_json::Value.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn rpc_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn tool_call(id: u64, name: &str, arguments: Value) -> Request<Body> {
    rpc_request(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    }))
}
