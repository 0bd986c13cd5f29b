use hanami_api::{AnimeRecord, Genre, StreamingLink};
use serde::{Deserialize, Serialize};

use super::Score;

/// Image stored for titles the catalog has no artwork for.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

/// The persisted projection of an [`AnimeRecord`], taken when it is added.
///
/// Field names match the on-disk format: `mal_id`, `title`, `image`,
/// `score`, `genres`, `streaming`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(rename = "mal_id")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default = "placeholder_image")]
    pub image: String,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub streaming: Vec<StreamingLink>,
}

impl From<&AnimeRecord> for WatchlistEntry {
    fn from(anime: &AnimeRecord) -> Self {
        Self {
            id: anime.id,
            title: anime.title.clone(),
            image: anime.image_url.clone().unwrap_or_else(placeholder_image),
            score: Score::from(anime.score),
            genres: anime.genres.clone(),
            streaming: anime.streaming.clone(),
        }
    }
}
