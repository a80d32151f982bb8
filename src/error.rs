// ---------------------------------------------------------------------------
// error.rs -- error kinds shared by tools, the upstream client and startup
// ---------------------------------------------------------------------------

use reqwest::StatusCode;

use crate::pagination::CursorError;

/// Failure of a single tool call.
///
/// `InvalidInput` is detected before any upstream I/O and maps to a JSON-RPC
/// "invalid params" error. `Upstream` wraps everything that went wrong after
/// the request left this process and maps to a tool result with `isError`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{operation}: {source}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidInput(message.into())
    }

    /// Returns a closure suitable for `map_err` that tags an upstream failure
    /// with the caller-visible operation summary.
    pub fn upstream(operation: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| ToolError::Upstream { operation, source }
    }

    /// Machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::InvalidInput(_) => "INVALID_INPUT",
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
            ToolError::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }
}

impl From<CursorError> for ToolError {
    fn from(e: CursorError) -> Self {
        ToolError::InvalidInput(format!("Invalid cursor: {}", e))
    }
}

/// Anything that failed between us and the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("GraphQL query failed: {0}")]
    GraphQl(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Startup configuration problems, collected so they can be reported together.
#[derive(Debug, thiserror::Error)]
#[error("Required environment variables are not configured:\n{}", .problems.join("\n"))]
pub struct ConfigError {
    pub problems: Vec<String>,
}
