//! MCP tools over the catalog API.
//!
//! - `search_content`: full-text search over the Mediathek
//! - `get_broadcast_schedule`: EPG entries in a time window
//! - `get_current_broadcast`: what is on air right now on one channel
//! - `list_brands`, `list_series`, `list_seasons`: catalog listings
//! - `get_series_episodes`: episodes of a series via GraphQL
//!
//! Every tool validates its arguments before touching the network, so an
//! `InvalidInput` error always means no upstream request was made.

pub mod broadcasts;
pub mod catalog;
pub mod content;
pub mod episodes;

use serde_json::{Value, json};

use crate::error::ToolError;
use crate::state::AppState;
use crate::upstream::graphql::EpisodeQuery;

/// Central dispatcher: routes a tool call to its implementation and returns
/// the JSON result handed back to the MCP client.
pub async fn execute_tool(name: &str, args: &Value, state: &AppState) -> Result<Value, ToolError> {
    let result = match name {
        "search_content" => {
            let params = content::SearchParams::from_args(args)?;
            json!(content::search_content(state, params).await?)
        }
        "get_broadcast_schedule" => {
            let params = broadcasts::ScheduleParams::from_args(args)?;
            json!(broadcasts::get_broadcast_schedule(state, params).await?)
        }
        "get_current_broadcast" => {
            let params = broadcasts::CurrentParams::from_args(args)?;
            json!(broadcasts::get_current_broadcast(state, params).await?)
        }
        "list_brands" => {
            let params = catalog::ListParams::from_args(args, catalog::DEFAULT_BRANDS_LIMIT)?;
            json!(catalog::list_brands(state, params).await?)
        }
        "list_series" => {
            let params = catalog::ListParams::from_args(args, catalog::DEFAULT_SERIES_LIMIT)?;
            json!(catalog::list_series(state, params).await?)
        }
        "list_seasons" => {
            let params = catalog::ListParams::from_args(args, catalog::DEFAULT_SEASONS_LIMIT)?;
            json!(catalog::list_seasons(state, params).await?)
        }
        "get_series_episodes" => {
            let query = EpisodeQuery::from_args(args)?;
            json!(episodes::get_series_episodes(state, query).await?)
        }
        _ => return Err(ToolError::UnknownTool(name.to_string())),
    };
    Ok(result)
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// A string argument with surrounding whitespace removed; blank means absent.
pub(crate) fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    optional_str(args, key).ok_or_else(|| {
        ToolError::invalid(format!("Parameter '{}' is required and must not be empty", key))
    })
}

/// `limit` as a positive integer, or `default` when the caller left it out.
/// Numeric strings are accepted since some clients send every argument as text.
pub(crate) fn limit_arg(args: &Value, default: u32) -> Result<u32, ToolError> {
    let raw = match args.get("limit") {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(default),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    match raw {
        Some(n) if n <= 0 => Err(ToolError::invalid("Parameter 'limit' must be greater than 0")),
        Some(n) => u32::try_from(n)
            .map_err(|_| ToolError::invalid("Parameter 'limit' is too large")),
        None => Err(ToolError::invalid("Parameter 'limit' must be an integer")),
    }
}
