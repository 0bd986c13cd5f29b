//! Catalog trait and the normalized record shape.
//!
//! Every backend converts its wire format into [`AnimeRecord`] so the
//! watchlist and recommendation code never depend on a specific API.

use std::future::Future;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A read-only anime catalog.
pub trait Catalog: Send + Sync {
    /// Text search. An absent or blank query lists the current season instead.
    ///
    /// Results keep the catalog's own ordering.
    fn search(
        &self,
        query: Option<&str>,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, CatalogError>> + Send;

    /// Fetch a single full record, including synopsis, studios and air dates.
    fn get_by_id(&self, id: u64) -> impl Future<Output = Result<AnimeRecord, CatalogError>> + Send;

    /// Top-ranked titles that have not been released yet.
    fn upcoming(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, CatalogError>> + Send;

    /// Titles tagged with `genre_id`, sorted server-side by `order`.
    fn by_genre(
        &self,
        genre_id: u64,
        limit: u32,
        order: GenreOrder,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, CatalogError>> + Send;
}

/// Normalized anime record as returned by any catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: Option<String>,
    pub score: Option<f64>,
    pub genres: Vec<Genre>,
    pub studios: Vec<Studio>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub media_type: Option<String>,
    pub aired: Option<String>,
    pub synopsis: Option<String>,
    pub streaming: Vec<StreamingLink>,
    pub season: Option<String>,
    pub year: Option<u32>,
    pub source: Option<String>,
    pub rating: Option<String>,
}

impl AnimeRecord {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    /// English title when known, otherwise the primary title.
    pub fn display_title(&self) -> &str {
        self.title_english
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(Some(self.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or("Unknown Title")
    }

    pub fn has_genre(&self, name: &str) -> bool {
        self.genres
            .iter()
            .any(|g| g.name.to_lowercase() == name.to_lowercase())
    }

    /// "Fall 2026", or `None` when the season has not been announced.
    pub fn season_label(&self) -> Option<String> {
        let season = self.season.as_deref()?;
        let mut chars = season.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => return None,
        };
        Some(match self.year {
            Some(year) => format!("{capitalized} {year}"),
            None => capitalized,
        })
    }
}

/// A genre tag. Serialized as `{mal_id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "mal_id", default)]
    pub id: u64,
    pub name: String,
}

impl Genre {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
}

/// A streaming service carrying the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingLink {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Field a genre listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Score,
    Popularity,
    Rank,
    Title,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Popularity => "popularity",
            Self::Rank => "rank",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordering for [`Catalog::by_genre`]. Defaults to score, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenreOrder {
    pub by: OrderBy,
    pub direction: SortDirection,
}

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl AnimeSeason {
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        Self::from_month(chrono::Utc::now().month())
    }

    /// Label for the season listing shown when no query is given, e.g. "Fall 2026".
    pub fn current_label() -> String {
        format!("{} {}", Self::current(), chrono::Utc::now().year())
    }
}

impl std::fmt::Display for AnimeSeason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}
