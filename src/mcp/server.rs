//! MCP server: exposes the catalog tools via JSON-RPC 2.0 over HTTP POST.
//!
//! Supported methods:
//! - `initialize`: server info + capabilities
//! - `notifications/*`: client notifications (acknowledged, no result)
//! - `ping`
//! - `tools/list`
//! - `tools/call`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::Instrument;

use crate::error::ToolError;
use crate::state::AppState;
use crate::tools;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// MCP JSON-RPC 2.0 endpoint handler.
pub async fn mcp_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "MCP server: unparseable request body");
            let rpc = json_rpc_error(Value::Null, PARSE_ERROR, "Parse error: body is not valid JSON");
            return (StatusCode::OK, Json(rpc));
        }
    };

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let Some(method) = request.get("method").and_then(Value::as_str) else {
        return (
            StatusCode::OK,
            Json(json_rpc_error(id, INVALID_REQUEST, "Invalid Request: missing 'method'")),
        );
    };

    tracing::debug!(method = %method, "MCP server: incoming request");

    if method.starts_with("notifications/") {
        return (StatusCode::ACCEPTED, Json(json!({})));
    }

    let result = match method {
        "initialize" => handle_initialize(&id),
        "ping" => handle_ping(&id),
        "tools/list" => handle_tools_list(&id),
        "tools/call" => handle_tools_call(&state, &request, &id).await,
        _ => json_rpc_error(id, METHOD_NOT_FOUND, &format!("Method not found: {}", method)),
    };

    (StatusCode::OK, Json(result))
}

// ── initialize ──────────────────────────────────────────────────────────────

fn handle_initialize(id: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": "Search the ZDF Mediathek, browse brands, series and seasons, list series episodes, and read the EPG. Paged tools return {resources, nextCursor}; pass nextCursor back unchanged as 'cursor' to continue."
        }
    })
}

// ── ping ────────────────────────────────────────────────────────────────────

fn handle_ping(id: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {}
    })
}

// ── tools/list ──────────────────────────────────────────────────────────────

fn handle_tools_list(id: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "tools": build_mcp_tool_list()
        }
    })
}

// ── tools/call ──────────────────────────────────────────────────────────────

async fn handle_tools_call(state: &AppState, request: &Value, id: &Value) -> Value {
    let params = request.get("params").cloned().unwrap_or(json!({}));
    let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");
    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    if tool_name.is_empty() {
        return json_rpc_error(id.clone(), INVALID_PARAMS, "Missing 'name' in params");
    }

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("tools/call", %request_id, tool = %tool_name);

    let outcome = tools::execute_tool(tool_name, &arguments, state)
        .instrument(span.clone())
        .await;

    span.in_scope(|| match outcome {
        Ok(result) => tool_result(id, result.to_string(), false),
        Err(e @ (ToolError::InvalidInput(_) | ToolError::UnknownTool(_))) => {
            tracing::warn!(code = e.code(), error = %e, "tool call rejected");
            json_rpc_error(id.clone(), INVALID_PARAMS, &e.to_string())
        }
        Err(e @ ToolError::Upstream { .. }) => {
            tracing::error!(code = e.code(), error = ?e, "tool call failed upstream");
            tool_result(id, e.to_string(), true)
        }
    })
}

fn tool_result(id: &Value, text: String, is_error: bool) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "content": [{ "type": "text", "text": text }],
            "isError": is_error
        }
    })
}

// ── Tool list ───────────────────────────────────────────────────────────────

const LIMIT_DESC: &str = "Maximum number of results per page";
const CURSOR_DESC: &str = "nextCursor from a previous page; omit for the first page";
const SEARCH_CURSOR_DESC: &str = "nextCursor from a previous page; omit for the first page. The page size comes from 'limit', not the cursor, so send the same 'limit' again with it";

/// Build the MCP `tools/list` entries for every catalog tool.
pub fn build_mcp_tool_list() -> Vec<Value> {
    vec![
        mcp_tool("search_content", "Search the ZDF Mediathek for shows, documentaries, news and other content. Returns matching documents with title, type and web URL.", json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search terms, e.g. 'Tagesschau' or 'Terra X'" },
                "limit": { "type": "integer", "minimum": 1, "default": 5, "description": LIMIT_DESC },
                "cursor": { "type": "string", "description": SEARCH_CURSOR_DESC }
            },
            "required": ["query"]
        })),
        mcp_tool("get_broadcast_schedule", "Get the TV schedule (EPG) for a time window, optionally for one channel.", json!({
            "type": "object",
            "properties": {
                "from": { "type": "string", "description": "Start, ISO 8601 with timezone, e.g. 2025-12-27T00:00:00+01:00" },
                "to": { "type": "string", "description": "End, ISO 8601 with timezone; must be after 'from'" },
                "tvService": { "type": "string", "description": "Channel, e.g. ZDF, ZDFneo, ZDFinfo, 3sat, PHOENIX, KIKA" },
                "limit": { "type": "integer", "minimum": 1, "default": 10, "description": LIMIT_DESC },
                "cursor": { "type": "string", "description": CURSOR_DESC }
            },
            "required": ["from", "to"]
        })),
        mcp_tool("get_current_broadcast", "Get the program currently on air on one channel.", json!({
            "type": "object",
            "properties": {
                "tvService": { "type": "string", "description": "Channel, e.g. ZDF, ZDFneo, ZDFinfo, 3sat, PHOENIX, KIKA" },
                "limit": { "type": "integer", "minimum": 1, "default": 10, "description": "Maximum number of broadcasts to inspect" }
            },
            "required": ["tvService"]
        })),
        mcp_tool("list_brands", "List brands (top-level shows and formats) of the ZDF catalog.", json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1, "default": 10, "description": LIMIT_DESC },
                "cursor": { "type": "string", "description": CURSOR_DESC }
            }
        })),
        mcp_tool("list_series", "List series with description, brand, IMDb link and web URL.", json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1, "default": 4, "description": LIMIT_DESC },
                "cursor": { "type": "string", "description": CURSOR_DESC }
            }
        })),
        mcp_tool("list_seasons", "List seasons with their series and brand.", json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1, "default": 4, "description": LIMIT_DESC },
                "cursor": { "type": "string", "description": CURSOR_DESC }
            }
        })),
        mcp_tool("get_series_episodes", "Get the episodes of a series by name, sorted by date or episode number.", json!({
            "type": "object",
            "properties": {
                "seriesName": { "type": "string", "description": "Series name, e.g. 'Die Anstalt'" },
                "limit": { "type": "integer", "minimum": 1, "default": 10, "description": LIMIT_DESC },
                "sortBy": {
                    "type": "string",
                    "enum": ["date_desc", "date_asc", "episode_desc", "episode_asc"],
                    "default": "date_desc",
                    "description": "Sort order of the episodes"
                },
                "cursor": { "type": "string", "description": CURSOR_DESC }
            },
            "required": ["seriesName"]
        })),
    ]
}

/// Helper to build a single MCP tool object.
fn mcp_tool(name: &str, description: &str, input_schema: Value) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": input_schema,
    })
}

// ── JSON-RPC error helper ───────────────────────────────────────────────────

fn json_rpc_error(id: Value, code: i32, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_an_object_schema() {
        let tools = build_mcp_tool_list();
        assert_eq!(tools.len(), 7);
        for tool in &tools {
            assert_eq!(tool["inputSchema"]["type"], "object", "{}", tool["name"]);
            assert!(!tool["description"].as_str().unwrap_or("").is_empty());
        }
    }

    #[test]
    fn error_envelope_keeps_id() {
        let err = json_rpc_error(json!(7), METHOD_NOT_FOUND, "Method not found: foo");
        assert_eq!(err["id"], 7);
        assert_eq!(err["error"]["code"], -32601);
        assert!(err.get("result").is_none());
    }

    #[test]
    fn search_cursor_asks_for_the_limit_again() {
        let tools = build_mcp_tool_list();
        let search = tools
            .iter()
            .find(|t| t["name"] == "search_content")
            .unwrap();
        let desc = search["inputSchema"]["properties"]["cursor"]["description"]
            .as_str()
            .unwrap();
        assert!(desc.contains("'limit'"));
    }
}
