//! Genre-based recommendations drawn from the watchlist.
//!
//! The user's most frequent watchlist genre is looked up in the catalog,
//! anything already tracked is dropped, and the first few results are kept
//! in the catalog's own order.

use hanami_api::{AnimeRecord, Catalog, CatalogError, Genre, GenreOrder};

use crate::config::RecommendationConfig;
use crate::error::HanamiError;
use crate::models::WatchlistEntry;
use crate::storage::WatchlistStorage;
use crate::watchlist::Watchlist;

/// Records requested from the catalog, leaving room for filtering.
pub const DEFAULT_FETCH_LIMIT: u32 = 12;
/// Recommendations kept after filtering.
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    /// The watchlist carries no genre information to rank.
    InsufficientData,
    /// Results for the top genre. Empty means nothing new was found.
    Found(Vec<AnimeRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: usize,
}

/// Genres across all entries, most frequent first.
///
/// Ties keep the order in which genres first appear scanning the list
/// front to back. Genres without an id are skipped.
pub fn genre_ranking(entries: &[WatchlistEntry]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    for genre in entries.iter().flat_map(|e| &e.genres) {
        if genre.id == 0 {
            continue;
        }
        match counts.iter_mut().find(|c| c.genre.id == genre.id) {
            Some(existing) => existing.count += 1,
            None => counts.push(GenreCount {
                genre: genre.clone(),
                count: 1,
            }),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone)]
pub struct Recommender {
    pub fetch_limit: u32,
    pub max_results: usize,
    pub order: GenreOrder,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_LIMIT, DEFAULT_MAX_RESULTS)
    }
}

impl Recommender {
    pub fn new(fetch_limit: u32, max_results: usize) -> Self {
        Self {
            fetch_limit,
            max_results,
            order: GenreOrder::default(),
        }
    }

    pub fn from_config(config: &RecommendationConfig) -> Self {
        Self::new(config.fetch_limit, config.max_results)
    }

    pub async fn recommend<C, S>(
        &self,
        watchlist: &Watchlist<S>,
        catalog: &C,
    ) -> Result<Recommendations, CatalogError>
    where
        C: Catalog,
        S: WatchlistStorage,
    {
        let Some(top) = genre_ranking(watchlist.entries()).into_iter().next() else {
            tracing::debug!("No genres on watchlist, skipping recommendations");
            return Ok(Recommendations::InsufficientData);
        };

        tracing::debug!(genre_id = top.genre.id, genre = %top.genre.name, count = top.count, "Top watchlist genre");
        let candidates = catalog
            .by_genre(top.genre.id, self.fetch_limit, self.order)
            .await?;

        let fetched = candidates.len();
        let picks: Vec<AnimeRecord> = candidates
            .into_iter()
            .filter(|a| !watchlist.contains(a.id))
            .take(self.max_results)
            .collect();

        tracing::info!(
            genre_id = top.genre.id,
            fetched,
            kept = picks.len(),
            "Recommendations ready"
        );
        Ok(Recommendations::Found(picks))
    }

    /// Add `anime` to the watchlist, then recompute against the updated list.
    ///
    /// The flag is `false` when the anime was already tracked; the
    /// recommendations are recomputed either way.
    pub async fn add_and_refresh<C, S>(
        &self,
        watchlist: &mut Watchlist<S>,
        catalog: &C,
        anime: &AnimeRecord,
    ) -> Result<(bool, Recommendations), HanamiError>
    where
        C: Catalog,
        S: WatchlistStorage,
    {
        let added = watchlist.add(anime)?;
        let recommendations = self.recommend(watchlist, catalog).await?;
        Ok((added, recommendations))
    }
}
