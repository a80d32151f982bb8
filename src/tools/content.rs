// ---------------------------------------------------------------------------
// tools/content.rs -- search_content
// ---------------------------------------------------------------------------

use serde_json::Value;

use super::{limit_arg, optional_str, required_str};
use crate::error::ToolError;
use crate::pagination::{LimitSource, LocalCursor, PagedResult, PagingPolicy};
use crate::state::AppState;
use crate::upstream::models::SearchResult;

const DEFAULT_LIMIT: u32 = 5;

/// Full-page heuristic. The page size always comes from the current request
/// so a cursor minted with one limit cannot drift the next page's size.
/// Callers continuing a search must resend `limit` with the cursor; without
/// it the next page uses the default size and may skip results.
const PAGING: PagingPolicy = PagingPolicy::FULL_PAGE.with_limit_from(LimitSource::Request);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl SearchParams {
    pub fn from_args(args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            query: required_str(args, "query")?.to_string(),
            limit: limit_arg(args, DEFAULT_LIMIT)?,
            cursor: optional_str(args, "cursor").map(String::from),
        })
    }
}

pub async fn search_content(
    state: &AppState,
    params: SearchParams,
) -> Result<PagedResult<SearchResult, LocalCursor>, ToolError> {
    tracing::info!(
        tool = "search_content",
        query = %params.query,
        limit = params.limit,
        cursor_present = params.cursor.is_some(),
        "tool called"
    );

    let request = PAGING.resolve(params.limit, params.cursor.as_deref())?;

    let response = state
        .catalog
        .search_documents(&params.query, request.limit, request.page)
        .await
        .map_err(ToolError::upstream("Failed to search ZDF Mediathek"))?;

    tracing::info!(
        tool = "search_content",
        returned = response.results.len(),
        total = response.total_results_count,
        page = request.page,
        upstream_next = ?response.next,
        "search completed"
    );

    let next = PAGING.next_cursor(request, response.results.len(), None);
    Ok(PagedResult::new(response.results, next))
}
