// ---------------------------------------------------------------------------
// tools/episodes.rs -- get_series_episodes
// ---------------------------------------------------------------------------

use serde_json::Value;

use super::{limit_arg, optional_str, required_str};
use crate::episodes::{SeriesLikeItem, extract_episodes};
use crate::error::ToolError;
use crate::pagination::{PagedResult, RemoteCursor};
use crate::state::AppState;
use crate::upstream::graphql::{Episode, EpisodeQuery, SortBy};

const DEFAULT_LIMIT: u32 = 10;

impl EpisodeQuery {
    /// The cursor argument here is the GraphQL `endCursor` from a previous
    /// page, never a locally minted page cursor.
    pub fn from_args(args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            series_name: required_str(args, "seriesName")?.to_string(),
            first: limit_arg(args, DEFAULT_LIMIT)?,
            sort_by: SortBy::from_arg(optional_str(args, "sortBy")),
            after: RemoteCursor::from_arg(optional_str(args, "cursor")),
        })
    }
}

pub async fn get_series_episodes(
    state: &AppState,
    query: EpisodeQuery,
) -> Result<PagedResult<Episode, RemoteCursor>, ToolError> {
    tracing::info!(
        tool = "get_series_episodes",
        series_name = %query.series_name,
        limit = query.first,
        sort_by = ?query.sort_by,
        cursor_present = query.after.is_some(),
        "tool called"
    );

    let item = state
        .catalog
        .series_episodes(&query)
        .await
        .map_err(ToolError::upstream("Failed to get series episodes"))?;

    let series = item.and_then(SeriesLikeItem::from_search_item);
    let kind = series.as_ref().map(|s| s.kind);
    let title = series.as_ref().and_then(|s| s.title.clone());
    let page = extract_episodes(series);

    tracing::info!(
        tool = "get_series_episodes",
        kind = ?kind,
        title = ?title,
        returned = page.resources.len(),
        has_next = page.next_cursor.is_some(),
        "episodes retrieved"
    );

    Ok(page)
}
