// ---------------------------------------------------------------------------
// tools/broadcasts.rs -- get_broadcast_schedule, get_current_broadcast
// ---------------------------------------------------------------------------

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use super::{limit_arg, optional_str, required_str};
use crate::error::ToolError;
use crate::models::CurrentBroadcastResponse;
use crate::pagination::{LocalCursor, PagedResult, PagingPolicy};
use crate::state::AppState;
use crate::upstream::models::Broadcast;

const DEFAULT_LIMIT: u32 = 10;

const PAGING: PagingPolicy = PagingPolicy::FULL_PAGE;

fn timestamp_arg(args: &Value, key: &str) -> Result<(String, DateTime<FixedOffset>), ToolError> {
    let raw = required_str(args, key)?;
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|_| {
        ToolError::invalid(format!(
            "Parameter '{}' must be in ISO 8601 format with timezone, e.g., 2025-12-27T00:00:00+01:00",
            key
        ))
    })?;
    Ok((raw.to_string(), parsed))
}

// ── get_broadcast_schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleParams {
    /// Forwarded upstream exactly as the caller wrote them.
    pub from: String,
    pub to: String,
    pub tv_service: Option<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ScheduleParams {
    pub fn from_args(args: &Value) -> Result<Self, ToolError> {
        let (from, from_ts) = timestamp_arg(args, "from")?;
        let (to, to_ts) = timestamp_arg(args, "to")?;
        if from_ts >= to_ts {
            return Err(ToolError::invalid("Parameter 'from' must be before 'to'"));
        }
        Ok(Self {
            from,
            to,
            tv_service: optional_str(args, "tvService").map(String::from),
            limit: limit_arg(args, DEFAULT_LIMIT)?,
            cursor: optional_str(args, "cursor").map(String::from),
        })
    }
}

pub async fn get_broadcast_schedule(
    state: &AppState,
    params: ScheduleParams,
) -> Result<PagedResult<Broadcast, LocalCursor>, ToolError> {
    tracing::info!(
        tool = "get_broadcast_schedule",
        from = %params.from,
        to = %params.to,
        tv_service = ?params.tv_service,
        limit = params.limit,
        cursor_present = params.cursor.is_some(),
        "tool called"
    );

    let request = PAGING.resolve(params.limit, params.cursor.as_deref())?;

    let response = state
        .catalog
        .broadcast_schedule(
            &params.from,
            &params.to,
            params.tv_service.as_deref(),
            request.limit,
            request.page,
        )
        .await
        .map_err(ToolError::upstream("Failed to get broadcast schedule"))?;

    tracing::info!(
        tool = "get_broadcast_schedule",
        returned = response.broadcasts.len(),
        page = request.page,
        next_archive = ?response.next_archive,
        "schedule retrieved"
    );

    let next = PAGING.next_cursor(request, response.broadcasts.len(), None);
    Ok(PagedResult::new(response.broadcasts, next))
}

// ── get_current_broadcast ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentParams {
    pub tv_service: String,
    pub limit: u32,
}

impl CurrentParams {
    pub fn from_args(args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            tv_service: required_str(args, "tvService")?.to_string(),
            limit: limit_arg(args, DEFAULT_LIMIT)?,
        })
    }
}

/// The first broadcast airing at `now`: begun at or before it, ending after it.
pub fn find_current(broadcasts: Vec<Broadcast>, now: DateTime<Utc>) -> Option<Broadcast> {
    broadcasts.into_iter().find(|b| {
        b.airtime_begin.with_timezone(&Utc) <= now && now < b.airtime_end.with_timezone(&Utc)
    })
}

pub async fn get_current_broadcast(
    state: &AppState,
    params: CurrentParams,
) -> Result<CurrentBroadcastResponse, ToolError> {
    tracing::info!(
        tool = "get_current_broadcast",
        tv_service = %params.tv_service,
        limit = params.limit,
        "tool called"
    );

    let response = state
        .catalog
        .current_broadcasts(&params.tv_service, params.limit)
        .await
        .map_err(ToolError::upstream("Failed to get current broadcast"))?;

    let now = state.clock.now();
    let current = find_current(response.broadcasts, now);

    match &current {
        Some(b) => tracing::info!(
            tool = "get_current_broadcast",
            title = %b.title,
            began = %b.airtime_begin,
            "current broadcast found"
        ),
        None => tracing::info!(
            tool = "get_current_broadcast",
            queried_at = %now,
            "nothing on air"
        ),
    }

    Ok(CurrentBroadcastResponse {
        tv_service: params.tv_service,
        current_broadcast: current,
        queried_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn broadcast(title: &str, begin: &str, end: &str) -> Broadcast {
        serde_json::from_value(json!({
            "airtimeBegin": begin,
            "airtimeEnd": end,
            "title": title,
            "tvService": "ZDF"
        }))
        .unwrap()
    }

    fn at(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn current_is_half_open_interval() {
        let list = || {
            vec![
                broadcast("heute", "2025-12-27T19:00:00+01:00", "2025-12-27T19:20:00+01:00"),
                broadcast("Krimi", "2025-12-27T19:20:00+01:00", "2025-12-27T21:00:00+01:00"),
            ]
        };

        let at_boundary = find_current(list(), at("2025-12-27T19:20:00+01:00")).unwrap();
        assert_eq!(at_boundary.title, "Krimi");

        // Offsets differ but the instant is the same.
        let utc = find_current(list(), at("2025-12-27T18:05:00Z")).unwrap();
        assert_eq!(utc.title, "heute");

        assert!(find_current(list(), at("2025-12-27T21:00:00+01:00")).is_none());
    }

    #[test]
    fn schedule_requires_ordered_rfc3339_window() {
        let ok = ScheduleParams::from_args(&json!({
            "from": "2025-12-27T00:00:00+01:00",
            "to": "2025-12-27T23:59:59+01:00",
            "tvService": "ZDFneo"
        }))
        .unwrap();
        assert_eq!(ok.limit, 10);
        assert_eq!(ok.tv_service.as_deref(), Some("ZDFneo"));

        let err = ScheduleParams::from_args(&json!({
            "from": "2025-12-27T10:00:00+01:00",
            "to": "2025-12-27T10:00:00+01:00"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Parameter 'from' must be before 'to'");

        let err = ScheduleParams::from_args(&json!({
            "from": "2025-12-27",
            "to": "2025-12-28T00:00:00+01:00"
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("Parameter 'from' must be in ISO 8601"));

        let err = ScheduleParams::from_args(&json!({ "from": "2025-12-27T00:00:00Z" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter 'to' is required and must not be empty"
        );
    }

    #[test]
    fn current_requires_tv_service() {
        let err = CurrentParams::from_args(&json!({ "tvService": "" })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
