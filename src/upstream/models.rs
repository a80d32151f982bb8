// ---------------------------------------------------------------------------
// upstream/models.rs -- REST payloads of the catalog API (HAL+JSON)
// ---------------------------------------------------------------------------
//
// Collections live under link-relation keys (`http://zdf.de/rels/...`).
// Every collection defaults to empty and unknown fields are ignored.
// Types that are also returned to MCP callers serialize with plain
// camelCase names instead of the relation URIs.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total_results_count: u64,
    /// Link to the next result page, when the search service offers one.
    /// Logged for diagnostics; paging uses the full-page rule.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(rename = "http://zdf.de/rels/search/results", default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_result_type")]
    pub result_type: String,
    #[serde(
        rename(deserialize = "http://zdf.de/rels/target", serialize = "target"),
        default
    )]
    pub target: Option<Document>,
}

fn default_result_type() -> String {
    "default".to_string()
}

/// Target document of a search hit. `web_canonical` is the public URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: String,
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub teasertext: Option<String>,
    pub editorial_date: Option<DateTime<FixedOffset>>,
    pub content_type: Option<String>,
    pub has_video: bool,
    pub web_canonical: Option<String>,
    pub tv_service: Option<String>,
    pub end_date: Option<DateTime<FixedOffset>>,
}

// ── EPG ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastScheduleResponse {
    #[serde(rename = "http://zdf.de/rels/cmdm/broadcasts", default)]
    pub broadcasts: Vec<Broadcast>,
    #[serde(rename = "next-archive", default)]
    pub next_archive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub airtime_begin: DateTime<FixedOffset>,
    pub airtime_end: DateTime<FixedOffset>,
    /// Seconds.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub tv_service: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(
        rename(
            deserialize = "http://zdf.de/rels/cmdm/programme-item",
            serialize = "programmeItem"
        ),
        default
    )]
    pub programme_item: Option<String>,
}

// ── Brands / series / seasons ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandApiResponse {
    #[serde(rename = "http://zdf.de/rels/cmdm/brands", default)]
    pub brands: Vec<Brand>,
    #[serde(rename = "next-archive", default)]
    pub next_archive: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brand {
    pub uuid: String,
    pub brand_name: String,
    pub brand_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesResponse {
    #[serde(rename = "http://zdf.de/rels/cmdm/series", default)]
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Series {
    pub series_uuid: String,
    pub series_title: String,
    pub series_description: Option<String>,
    pub series_imdb_id: Option<String>,
    pub series_index_page_id: Option<String>,
    #[serde(rename = "http://zdf.de/rels/cmdm/brand")]
    pub brand: Option<BrandReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonResponse {
    #[serde(rename = "http://zdf.de/rels/cmdm/seasons", default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Season {
    pub season_uuid: String,
    pub season_number: Option<i32>,
    pub season_title: String,
    #[serde(rename = "http://zdf.de/rels/cmdm/series")]
    pub series: Option<Series>,
    #[serde(rename = "http://zdf.de/rels/cmdm/brand")]
    pub brand: Option<BrandReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandReference {
    pub brand_uuid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_result_exposes_target_under_plain_key() {
        let raw = json!({
            "score": 1.5,
            "id": "tagesschau-100",
            "type": "page",
            "title": "Tagesschau",
            "http://zdf.de/rels/target": {
                "id": "doc-1",
                "webCanonical": "https://www.zdf.de/nachrichten/tagesschau-100.html",
                "hasVideo": true,
                "unknownField": 42
            }
        });
        let result: SearchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.result_type, "default");

        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["type"], "page");
        assert_eq!(
            out["target"]["webCanonical"],
            "https://www.zdf.de/nachrichten/tagesschau-100.html"
        );
        assert!(out.get("http://zdf.de/rels/target").is_none());
    }

    #[test]
    fn broadcast_schedule_reads_relation_keys() {
        let raw = json!({
            "http://zdf.de/rels/cmdm/broadcasts": [{
                "airtimeBegin": "2025-12-27T20:15:00+01:00",
                "airtimeEnd": "2025-12-27T21:45:00+01:00",
                "duration": 5400,
                "tvService": "ZDF",
                "title": "Der Krimi",
                "subtitle": null,
                "text": "Spannung",
                "http://zdf.de/rels/cmdm/programme-item": "/cmdm/programme-items/abc"
            }],
            "next-archive": "/cmdm/epg/broadcasts?page=2"
        });
        let response: BroadcastScheduleResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.broadcasts.len(), 1);
        assert_eq!(response.next_archive.as_deref(), Some("/cmdm/epg/broadcasts?page=2"));

        let out = serde_json::to_value(&response.broadcasts[0]).unwrap();
        assert_eq!(out["programmeItem"], "/cmdm/programme-items/abc");
        assert_eq!(out["tvService"], "ZDF");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let brands: BrandApiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(brands.brands.is_empty());
        assert!(brands.next_archive.is_none());

        let seasons: SeasonResponse = serde_json::from_value(json!({ "foo": 1 })).unwrap();
        assert!(seasons.seasons.is_empty());
    }

    #[test]
    fn search_response_keeps_next_link() {
        let response: SearchResponse = serde_json::from_value(json!({
            "totalResultsCount": 3104,
            "next": "/search/documents?q=Tagesschau&page=2",
            "http://zdf.de/rels/search/results": []
        }))
        .unwrap();
        assert_eq!(response.total_results_count, 3104);
        assert_eq!(response.next.as_deref(), Some("/search/documents?q=Tagesschau&page=2"));
    }
}
