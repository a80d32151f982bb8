use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::upstream::models::{Brand, Broadcast, Season, Series};

const SERIES_PAGE_BASE_URL: &str = "https://www.zdf.de";

// ---------------------------------------------------------------------------
// Catalog summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    pub uuid: String,
    pub brand_name: String,
    pub brand_description: Option<String>,
}

impl From<Brand> for BrandSummary {
    fn from(brand: Brand) -> Self {
        Self {
            uuid: brand.uuid,
            brand_name: brand.brand_name,
            brand_description: brand.brand_description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub series_uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub brand_id: Option<String>,
    pub imdb_url: Option<String>,
    /// Public series page, when the catalog knows its index page.
    pub url: Option<String>,
}

impl From<&Series> for SeriesSummary {
    fn from(series: &Series) -> Self {
        Self {
            series_uuid: series.series_uuid.clone(),
            title: series.series_title.clone(),
            description: series.series_description.clone(),
            brand_id: series.brand.as_ref().and_then(|b| b.brand_uuid.clone()),
            imdb_url: series.series_imdb_id.clone(),
            url: series
                .series_index_page_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(|id| format!("{}/{}", SERIES_PAGE_BASE_URL, id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub season_uuid: String,
    pub season_number: Option<i32>,
    pub title: String,
    pub series: Option<SeriesSummary>,
    pub brand_id: Option<String>,
}

impl From<&Season> for SeasonSummary {
    fn from(season: &Season) -> Self {
        // The season's own brand wins; older seasons only carry it on the series.
        let brand_id = season
            .brand
            .as_ref()
            .and_then(|b| b.brand_uuid.clone())
            .or_else(|| {
                season
                    .series
                    .as_ref()
                    .and_then(|s| s.brand.as_ref())
                    .and_then(|b| b.brand_uuid.clone())
            });
        Self {
            season_uuid: season.season_uuid.clone(),
            season_number: season.season_number,
            title: season.season_title.clone(),
            series: season.series.as_ref().map(SeriesSummary::from),
            brand_id,
        }
    }
}

// ---------------------------------------------------------------------------
// EPG
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBroadcastResponse {
    pub tv_service: String,
    pub current_broadcast: Option<Broadcast>,
    pub queried_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub app: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::models::BrandReference;
    use serde_json::json;

    fn brand(id: &str) -> Option<BrandReference> {
        Some(BrandReference {
            brand_uuid: Some(id.to_string()),
        })
    }

    fn series() -> Series {
        Series {
            series_uuid: "s-1".into(),
            series_title: "Der Bergdoktor".into(),
            series_imdb_id: Some("https://www.imdb.com/title/tt0396337".into()),
            series_index_page_id: Some("serien/der-bergdoktor".into()),
            brand: brand("b-series"),
            ..Default::default()
        }
    }

    #[test]
    fn series_summary_derives_public_url() {
        let summary = SeriesSummary::from(&series());
        assert_eq!(
            summary.url.as_deref(),
            Some("https://www.zdf.de/serien/der-bergdoktor")
        );
        assert_eq!(summary.brand_id.as_deref(), Some("b-series"));

        let without_page = SeriesSummary::from(&Series::default());
        assert_eq!(without_page.url, None);
    }

    #[test]
    fn season_brand_prefers_own_then_series() {
        let own = Season {
            season_uuid: "se-1".into(),
            brand: brand("b-season"),
            series: Some(series()),
            ..Default::default()
        };
        assert_eq!(SeasonSummary::from(&own).brand_id.as_deref(), Some("b-season"));

        let inherited = Season {
            brand: None,
            ..own.clone()
        };
        assert_eq!(
            SeasonSummary::from(&inherited).brand_id.as_deref(),
            Some("b-series")
        );

        let orphan = Season::default();
        assert_eq!(SeasonSummary::from(&orphan).brand_id, None);
    }

    #[test]
    fn summaries_serialize_camel_case() {
        let value = serde_json::to_value(SeriesSummary::from(&series())).unwrap();
        assert_eq!(value["seriesUuid"], "s-1");
        assert_eq!(value["imdbUrl"], "https://www.imdb.com/title/tt0396337");
        assert_eq!(value["description"], json!(null));
    }
}
