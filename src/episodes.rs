//! Episode extraction from the series GraphQL search.
//!
//! A search hit is one of several union members. Series-like collections
//! carry episodes either directly or grouped by season; everything else (a
//! single `Video`, say) has no episodes. Paging is the upstream's own: the
//! `endCursor` of the connection we read from is passed back unchanged.

use crate::pagination::{PagedResult, RemoteCursor};
use crate::upstream::graphql::{Episode, EpisodeConnection, SearchItem, SeasonNode};

/// The series-like union members of a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    SeasonSeries,
    DefaultNoSections,
    DefaultWithSections,
    MiniSeries,
    EndlessSeries,
    /// Interface type; reported by some hits instead of a concrete type.
    Series,
}

impl SeriesKind {
    pub fn from_typename(typename: &str) -> Option<Self> {
        match typename {
            "SeasonSeriesSmartCollection" => Some(Self::SeasonSeries),
            "DefaultNoSectionsSmartCollection" => Some(Self::DefaultNoSections),
            "DefaultWithSectionsSmartCollection" => Some(Self::DefaultWithSections),
            "MiniSeriesSmartCollection" => Some(Self::MiniSeries),
            "EndlessSeriesSmartCollection" => Some(Self::EndlessSeries),
            "ISeriesSmartCollection" => Some(Self::Series),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesContent {
    DirectEpisodes(EpisodeConnection),
    SeasonedEpisodes(Vec<SeasonNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLikeItem {
    pub kind: SeriesKind,
    pub title: Option<String>,
    pub content: SeriesContent,
}

impl SeriesLikeItem {
    /// Classify a raw search item. Returns `None` for non-series members.
    ///
    /// A non-empty direct episode connection wins; otherwise the seasons
    /// (possibly none) are used.
    pub fn from_search_item(item: SearchItem) -> Option<Self> {
        let kind = SeriesKind::from_typename(&item.typename)?;
        let content = match item.episodes {
            Some(connection) if !connection.nodes.is_empty() => {
                SeriesContent::DirectEpisodes(connection)
            }
            _ => SeriesContent::SeasonedEpisodes(
                item.seasons.map(|s| s.nodes).unwrap_or_default(),
            ),
        };
        Some(Self {
            kind,
            title: item.title,
            content,
        })
    }
}

/// Episodes of one connection plus its continuation cursor, if the upstream
/// reports another page.
fn page_of(connection: EpisodeConnection) -> PagedResult<Episode, RemoteCursor> {
    let next = connection
        .page_info
        .filter(|info| info.has_next_page)
        .and_then(|info| info.end_cursor)
        .filter(|cursor| !cursor.is_empty())
        .map(RemoteCursor::new);
    PagedResult::new(connection.nodes, next)
}

/// Turn a classified search hit into a page of episodes. No hit, or a hit
/// that is not a series, is an empty page.
///
/// Several seasons are flattened into one list in season order. Each season
/// paginates on its own, so a flattened list has no single cursor to offer
/// and `nextCursor` is `null`.
pub fn extract_episodes(series: Option<SeriesLikeItem>) -> PagedResult<Episode, RemoteCursor> {
    let Some(series) = series else {
        return PagedResult::empty();
    };

    match series.content {
        SeriesContent::DirectEpisodes(connection) => page_of(connection),
        SeriesContent::SeasonedEpisodes(mut seasons) => match seasons.len() {
            0 => PagedResult::empty(),
            1 => seasons
                .pop()
                .and_then(|season| season.episodes)
                .map(page_of)
                .unwrap_or_else(PagedResult::empty),
            _ => {
                let numbers: Vec<Option<i32>> = seasons.iter().map(|s| s.season_number).collect();
                tracing::debug!(seasons = ?numbers, "flattening seasons, paging dropped");
                let episodes = seasons
                    .into_iter()
                    .filter_map(|season| season.episodes)
                    .flat_map(|connection| connection.nodes)
                    .collect();
                PagedResult::new(episodes, None)
            }
        },
    }
}
