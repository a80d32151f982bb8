//! Cursor-based pagination for MCP tool results.
//!
//! Two cursor formats travel through the tool surface and must never be mixed:
//!
//! - [`LocalCursor`]: minted here for REST-backed tools. Wire format is
//!   `base64(JSON {"page": int, "limit": int|null})`; unknown JSON fields are
//!   ignored so older and newer servers can read each other's cursors.
//! - [`RemoteCursor`]: the upstream GraphQL `endCursor`, passed through verbatim
//!   and handed back as the `after` variable.
//!
//! [`PagingPolicy`] captures how a REST endpoint decides whether a next page
//! exists. None of the REST endpoints report a total count, so the decision is
//! a best-effort heuristic: a full page means "maybe more". It can produce a
//! cursor that leads to an empty page, but it never withholds one when more
//! data exists.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

// ── Local cursor (page + limit) ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCursor {
    pub page: u32,
    pub limit: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("not valid base64 ({0})")]
    Base64(#[from] base64::DecodeError),

    #[error("not a valid cursor payload ({0})")]
    Json(#[from] serde_json::Error),

    #[error("cursor payload is not a JSON object")]
    NotAnObject,

    #[error("page and limit must be at least 1")]
    OutOfRange,
}

#[derive(Deserialize)]
struct CursorPayload {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default)]
    limit: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl LocalCursor {
    pub fn new(page: u32, limit: Option<u32>) -> Self {
        Self { page, limit }
    }

    pub fn encode(&self) -> String {
        let payload = json!({ "page": self.page, "limit": self.limit });
        STANDARD.encode(payload.to_string())
    }

    /// Decode a cursor produced by [`LocalCursor::encode`].
    ///
    /// A missing `page` defaults to 1. Anything else that is not a JSON object
    /// with non-negative integer `page`/`limit` is rejected.
    pub fn decode(cursor: &str) -> Result<Self, CursorError> {
        let bytes = STANDARD.decode(cursor.trim())?;
        let value: Value = serde_json::from_slice(&bytes)?;
        if !value.is_object() {
            return Err(CursorError::NotAnObject);
        }
        let payload: CursorPayload = serde_json::from_value(value)?;
        if payload.page == 0 || payload.limit == Some(0) {
            return Err(CursorError::OutOfRange);
        }
        Ok(Self {
            page: payload.page,
            limit: payload.limit,
        })
    }
}

impl Serialize for LocalCursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

// ── Remote cursor (opaque GraphQL endCursor) ────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemoteCursor(String);

impl RemoteCursor {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self(cursor.into())
    }

    /// Wraps a caller-supplied cursor argument; blank means "first page".
    pub fn from_arg(cursor: Option<&str>) -> Option<Self> {
        cursor
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ── Paged result ────────────────────────────────────────────────────────────

/// Uniform `{resources, nextCursor}` shape returned by every paged tool.
/// `nextCursor` is `null` once the producer decided there is nothing more.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T, C> {
    pub resources: Vec<T>,
    pub next_cursor: Option<C>,
}

impl<T, C> PagedResult<T, C> {
    pub fn new(resources: Vec<T>, next_cursor: Option<C>) -> Self {
        Self {
            resources,
            next_cursor,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }
}

// ── Paging policies ─────────────────────────────────────────────────────────

/// Upstream signals that count as "there may be another page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoreSignal {
    /// Only the returned item count is available.
    FullPage,
    /// A full page, or a next link in the response (the link alone is unreliable).
    FullPageOrNextLink,
}

/// Where the page size of a continuation request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    /// The cursor's limit wins once pagination has started.
    Cursor,
    /// Always the limit of the current request; the cursor only carries the page.
    Request,
}

/// Page and page size sent upstream for one tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub signal: MoreSignal,
    pub limit_source: LimitSource,
}

impl PagingPolicy {
    pub const FULL_PAGE: Self = Self {
        signal: MoreSignal::FullPage,
        limit_source: LimitSource::Cursor,
    };

    pub const FULL_PAGE_OR_NEXT_LINK: Self = Self {
        signal: MoreSignal::FullPageOrNextLink,
        limit_source: LimitSource::Cursor,
    };

    pub const fn with_limit_from(self, limit_source: LimitSource) -> Self {
        Self {
            signal: self.signal,
            limit_source,
        }
    }

    /// Resolve the upstream page/limit from the requested limit and an
    /// optional caller cursor. A blank cursor is the same as no cursor.
    pub fn resolve(
        &self,
        requested_limit: u32,
        cursor: Option<&str>,
    ) -> Result<PageRequest, CursorError> {
        let Some(raw) = cursor.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(PageRequest {
                page: 1,
                limit: requested_limit,
            });
        };

        let decoded = LocalCursor::decode(raw)?;
        let limit = match self.limit_source {
            LimitSource::Cursor => decoded.limit.unwrap_or(requested_limit),
            LimitSource::Request => requested_limit,
        };
        Ok(PageRequest {
            page: decoded.page,
            limit,
        })
    }

    /// Decide whether to offer a continuation cursor for `request`.
    pub fn next_cursor(
        &self,
        request: PageRequest,
        returned: usize,
        next_link: Option<&str>,
    ) -> Option<LocalCursor> {
        let full_page = returned >= request.limit as usize;
        let linked = self.signal == MoreSignal::FullPageOrNextLink
            && next_link.is_some_and(|link| !link.trim().is_empty());

        (full_page || linked)
            .then(|| LocalCursor::new(request.page.saturating_add(1), Some(request.limit)))
    }
}
