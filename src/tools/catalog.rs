// ---------------------------------------------------------------------------
// tools/catalog.rs -- list_brands, list_series, list_seasons
// ---------------------------------------------------------------------------

use serde_json::Value;

use super::{limit_arg, optional_str};
use crate::error::ToolError;
use crate::models::{BrandSummary, SeasonSummary, SeriesSummary};
use crate::pagination::{LocalCursor, PagedResult, PagingPolicy};
use crate::state::AppState;

pub const DEFAULT_BRANDS_LIMIT: u32 = 10;
pub const DEFAULT_SERIES_LIMIT: u32 = 4;
pub const DEFAULT_SEASONS_LIMIT: u32 = 4;

/// `next-archive` is not always present when more brands exist; a full page
/// also counts as "maybe more".
const BRANDS_PAGING: PagingPolicy = PagingPolicy::FULL_PAGE_OR_NEXT_LINK;
const SERIES_PAGING: PagingPolicy = PagingPolicy::FULL_PAGE;
const SEASONS_PAGING: PagingPolicy = PagingPolicy::FULL_PAGE;

#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ListParams {
    pub fn from_args(args: &Value, default_limit: u32) -> Result<Self, ToolError> {
        Ok(Self {
            limit: limit_arg(args, default_limit)?,
            cursor: optional_str(args, "cursor").map(String::from),
        })
    }
}

pub async fn list_brands(
    state: &AppState,
    params: ListParams,
) -> Result<PagedResult<BrandSummary, LocalCursor>, ToolError> {
    tracing::info!(
        tool = "list_brands",
        limit = params.limit,
        cursor_present = params.cursor.is_some(),
        "tool called"
    );

    let request = BRANDS_PAGING.resolve(params.limit, params.cursor.as_deref())?;
    let response = state
        .catalog
        .list_brands(request.limit, request.page)
        .await
        .map_err(ToolError::upstream("Failed to list brands"))?;

    let returned = response.brands.len();
    let next = BRANDS_PAGING.next_cursor(request, returned, response.next_archive.as_deref());
    tracing::info!(
        tool = "list_brands",
        returned,
        page = request.page,
        has_next = next.is_some(),
        "brands retrieved"
    );

    let brands = response.brands.into_iter().map(BrandSummary::from).collect();
    Ok(PagedResult::new(brands, next))
}

pub async fn list_series(
    state: &AppState,
    params: ListParams,
) -> Result<PagedResult<SeriesSummary, LocalCursor>, ToolError> {
    tracing::info!(
        tool = "list_series",
        limit = params.limit,
        cursor_present = params.cursor.is_some(),
        "tool called"
    );

    let request = SERIES_PAGING.resolve(params.limit, params.cursor.as_deref())?;
    let response = state
        .catalog
        .list_series(request.limit, request.page)
        .await
        .map_err(ToolError::upstream("Failed to list series"))?;

    tracing::info!(
        tool = "list_series",
        returned = response.series.len(),
        page = request.page,
        "series retrieved"
    );

    let next = SERIES_PAGING.next_cursor(request, response.series.len(), None);
    let series = response.series.iter().map(SeriesSummary::from).collect();
    Ok(PagedResult::new(series, next))
}

pub async fn list_seasons(
    state: &AppState,
    params: ListParams,
) -> Result<PagedResult<SeasonSummary, LocalCursor>, ToolError> {
    tracing::info!(
        tool = "list_seasons",
        limit = params.limit,
        cursor_present = params.cursor.is_some(),
        "tool called"
    );

    let request = SEASONS_PAGING.resolve(params.limit, params.cursor.as_deref())?;
    let response = state
        .catalog
        .list_seasons(request.limit, request.page)
        .await
        .map_err(ToolError::upstream("Failed to list seasons"))?;

    tracing::info!(
        tool = "list_seasons",
        returned = response.seasons.len(),
        page = request.page,
        "seasons retrieved"
    );

    let next = SEASONS_PAGING.next_cursor(request, response.seasons.len(), None);
    let seasons = response.seasons.iter().map(SeasonSummary::from).collect();
    Ok(PagedResult::new(seasons, next))
}
