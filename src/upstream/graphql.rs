// ---------------------------------------------------------------------------
// upstream/graphql.rs -- series episode query: document, variables, payloads
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::pagination::RemoteCursor;

/// Searches for one series-like collection and pulls its episodes, either
/// directly or through its seasons. `$first` bounds the episode connections.
pub const SERIES_EPISODES_QUERY: &str = r#"
query GetSeriesEpisodes($query: String!, $first: Int, $after: Cursor, $sortBy: [VideosConnectionSortByInput!]) {
  searchDocuments(query: $query, first: 1) {
    results {
      item {
        __typename
        ... on DefaultNoSectionsSmartCollection {
          title
          episodes(first: $first, after: $after, sortBy: $sortBy) {
            nodes {
              title
              editorialDate
              sharingUrl
              episodeInfo { seasonNumber episodeNumber }
            }
            pageInfo { hasNextPage endCursor }
          }
        }
        ... on DefaultWithSectionsSmartCollection {
          title
          episodes(first: $first, after: $after, sortBy: $sortBy) {
            nodes {
              title
              editorialDate
              sharingUrl
              episodeInfo { seasonNumber episodeNumber }
            }
            pageInfo { hasNextPage endCursor }
          }
        }
        ... on MiniSeriesSmartCollection {
          title
          episodes(first: $first, after: $after, sortBy: $sortBy) {
            nodes {
              title
              editorialDate
              sharingUrl
              episodeInfo { seasonNumber episodeNumber }
            }
            pageInfo { hasNextPage endCursor }
          }
        }
        ... on EndlessSeriesSmartCollection {
          title
          episodes(first: $first, after: $after, sortBy: $sortBy) {
            nodes {
              title
              editorialDate
              sharingUrl
              episodeInfo { seasonNumber episodeNumber }
            }
            pageInfo { hasNextPage endCursor }
          }
        }
        ... on SeasonSeriesSmartCollection {
          title
          seasons {
            nodes {
              seasonNumber
              episodes(first: $first, after: $after, sortBy: $sortBy) {
                nodes {
                  title
                  editorialDate
                  sharingUrl
                  episodeInfo { seasonNumber episodeNumber }
                }
                pageInfo { hasNextPage endCursor }
              }
            }
          }
        }
      }
    }
  }
}
"#;

// ── Sort order ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortField {
    EditorialDate,
    EpisodeNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortBy {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortBy {
    fn default() -> Self {
        Self {
            field: SortField::EditorialDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortBy {
    /// Parse the tool's `sortBy` argument (`date_desc`, `date_asc`,
    /// `episode_desc`, `episode_asc`, any case). Blank means the default;
    /// unknown values fall back to the default with a warning.
    pub fn from_arg(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        let (field, direction) = match value.to_lowercase().as_str() {
            "date_desc" => (SortField::EditorialDate, SortDirection::Desc),
            "date_asc" => (SortField::EditorialDate, SortDirection::Asc),
            "episode_desc" => (SortField::EpisodeNumber, SortDirection::Desc),
            "episode_asc" => (SortField::EpisodeNumber, SortDirection::Asc),
            _ => {
                tracing::warn!(sort_by = %value, "unknown sortBy value, defaulting to date_desc");
                return Self::default();
            }
        };
        Self { field, direction }
    }
}

// ── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeQuery {
    pub series_name: String,
    pub first: u32,
    pub sort_by: SortBy,
    pub after: Option<RemoteCursor>,
}

impl EpisodeQuery {
    /// GraphQL variables; `after` is only sent when continuing.
    pub fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("query".into(), json!(self.series_name));
        vars.insert("first".into(), json!(self.first));
        vars.insert("sortBy".into(), json!([self.sort_by]));
        if let Some(after) = &self.after {
            vars.insert("after".into(), json!(after.as_str()));
        }
        Value::Object(vars)
    }

    pub fn request_body(&self) -> Value {
        json!({
            "query": SERIES_EPISODES_QUERY,
            "operationName": "GetSeriesEpisodes",
            "variables": self.variables(),
        })
    }
}

// ── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocumentsData {
    #[serde(default)]
    pub search_documents: Option<SearchDocumentsResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchDocumentsResult {
    #[serde(default)]
    pub results: Vec<SearchResultWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultWrapper {
    #[serde(default)]
    pub item: Option<SearchItem>,
}

/// One union member of a search hit, before it is classified.
/// Non-series members (e.g. `Video`) keep only their type name here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "__typename", default)]
    pub typename: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub episodes: Option<EpisodeConnection>,
    #[serde(default)]
    pub seasons: Option<SeasonConnection>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeConnection {
    #[serde(default)]
    pub nodes: Vec<Episode>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeasonConnection {
    #[serde(default)]
    pub nodes: Vec<SeasonNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonNode {
    #[serde(default)]
    pub season_number: Option<i32>,
    #[serde(default)]
    pub episodes: Option<EpisodeConnection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub editorial_date: Option<String>,
    #[serde(default)]
    pub sharing_url: Option<String>,
    #[serde(default)]
    pub episode_info: Option<EpisodeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeInfo {
    #[serde(default)]
    pub season_number: Option<i32>,
    #[serde(default)]
    pub episode_number: Option<i32>,
}

impl SearchDocumentsData {
    /// The first matched item. A series name resolves to at most one
    /// collection.
    pub fn into_first_item(self) -> Option<SearchItem> {
        self.search_documents?
            .results
            .into_iter()
            .next()
            .and_then(|r| r.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_parses_known_values_case_insensitively() {
        assert_eq!(SortBy::from_arg(None), SortBy::default());
        assert_eq!(SortBy::from_arg(Some("")), SortBy::default());
        assert_eq!(
            SortBy::from_arg(Some("EPISODE_ASC")),
            SortBy {
                field: SortField::EpisodeNumber,
                direction: SortDirection::Asc
            }
        );
        assert_eq!(
            SortBy::from_arg(Some("date_asc")),
            SortBy {
                field: SortField::EditorialDate,
                direction: SortDirection::Asc
            }
        );
        assert_eq!(SortBy::from_arg(Some("by_mood")), SortBy::default());
    }

    #[test]
    fn variables_carry_sort_and_optional_after() {
        let mut query = EpisodeQuery {
            series_name: "heute-show".into(),
            first: 10,
            sort_by: SortBy::default(),
            after: None,
        };
        let vars = query.variables();
        assert_eq!(vars["query"], "heute-show");
        assert_eq!(vars["first"], 10);
        assert_eq!(
            vars["sortBy"],
            json!([{ "field": "EDITORIAL_DATE", "direction": "DESC" }])
        );
        assert!(vars.get("after").is_none());

        query.after = Some(RemoteCursor::new("Y3Vyc29y"));
        assert_eq!(query.variables()["after"], "Y3Vyc29y");
    }

    #[test]
    fn first_item_is_taken_from_search_results() {
        let data: SearchDocumentsData = serde_json::from_value(json!({
            "searchDocuments": { "results": [
                { "item": { "__typename": "Video", "title": "Clip" } },
                { "item": { "__typename": "MiniSeriesSmartCollection", "title": "Later" } }
            ]}
        }))
        .unwrap();
        let item = data.into_first_item().unwrap();
        assert_eq!(item.typename, "Video");
    }
}
