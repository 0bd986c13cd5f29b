use serde::Deserialize;

use crate::traits::{AnimeRecord, Genre, StreamingLink, Studio};

// ── Response envelopes ──────────────────────────────────────────

/// List endpoints. A missing or null `data` is an empty page.
#[derive(Debug, Deserialize)]
pub struct JikanList {
    #[serde(default)]
    pub data: Option<Vec<JikanAnime>>,
}

#[derive(Debug, Deserialize)]
pub struct JikanSingle {
    #[serde(default)]
    pub data: Option<JikanAnime>,
}

// ── Anime resource ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    #[serde(default)]
    pub title: String,
    pub title_english: Option<String>,
    pub images: Option<JikanImages>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub genres: Option<Vec<JikanGenre>>,
    pub studios: Option<Vec<JikanStudio>>,
    pub aired: Option<JikanAired>,
    pub synopsis: Option<String>,
    pub streaming: Option<Vec<JikanStreaming>>,
    pub season: Option<String>,
    pub year: Option<u32>,
    pub source: Option<String>,
    pub rating: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanGenre {
    #[serde(default)]
    pub mal_id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JikanStudio {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    pub string: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanStreaming {
    pub name: String,
    pub url: Option<String>,
}

// ── Conversions to shared trait types ───────────────────────────

impl JikanAnime {
    pub fn into_record(self) -> AnimeRecord {
        AnimeRecord {
            id: self.mal_id,
            title: self.title,
            title_english: self.title_english,
            image_url: self
                .images
                .and_then(|i| i.jpg)
                .and_then(|jpg| jpg.image_url),
            score: self.score,
            genres: self
                .genres
                .map(|g| g.into_iter().map(|x| Genre::new(x.mal_id, x.name)).collect())
                .unwrap_or_default(),
            studios: self
                .studios
                .map(|s| s.into_iter().map(|x| Studio { name: x.name }).collect())
                .unwrap_or_default(),
            episodes: self.episodes,
            status: self.status,
            media_type: self.media_type,
            aired: self.aired.and_then(|a| a.string),
            synopsis: self.synopsis,
            streaming: self
                .streaming
                .map(|s| {
                    s.into_iter()
                        .map(|x| StreamingLink {
                            name: x.name,
                            url: x.url,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            season: self.season,
            year: self.year,
            source: self.source,
            rating: self.rating,
        }
    }
}

impl JikanList {
    pub fn into_records(self) -> Vec<AnimeRecord> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(JikanAnime::into_record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRIEREN: &str = r#"{
        "mal_id": 52991,
        "url": "https://myanimelist.net/anime/52991/Sousou_no_Frieren",
        "images": {
            "jpg": {
                "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg",
                "small_image_url": "https://cdn.myanimelist.net/images/anime/1015/138006t.jpg"
            },
            "webp": {
                "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.webp"
            }
        },
        "title": "Sousou no Frieren",
        "title_english": "Frieren: Beyond Journey's End",
        "type": "TV",
        "source": "Manga",
        "episodes": 28,
        "status": "Finished Airing",
        "aired": {
            "from": "2023-09-29T00:00:00+00:00",
            "to": "2024-03-22T00:00:00+00:00",
            "string": "Sep 29, 2023 to Mar 22, 2024"
        },
        "rating": "PG-13 - Teens 13 or older",
        "score": 9.3,
        "synopsis": "During their decade-long quest to defeat the Demon King...",
        "season": "fall",
        "year": 2023,
        "studios": [
            {"mal_id": 11, "type": "anime", "name": "Madhouse", "url": "https://myanimelist.net/anime/producer/11/Madhouse"}
        ],
        "genres": [
            {"mal_id": 2, "type": "anime", "name": "Adventure", "url": "https://myanimelist.net/anime/genre/2/Adventure"},
            {"mal_id": 8, "type": "anime", "name": "Drama", "url": "https://myanimelist.net/anime/genre/8/Drama"},
            {"mal_id": 10, "type": "anime", "name": "Fantasy", "url": "https://myanimelist.net/anime/genre/10/Fantasy"}
        ],
        "streaming": [
            {"name": "Crunchyroll", "url": "http://www.crunchyroll.com/series/GG5H5XQX4"}
        ]
    }"#;

    #[test]
    fn test_deserialize_full_record() {
        let json = format!(r#"{{"data": {FRIEREN}}}"#);
        let single: JikanSingle = serde_json::from_str(&json).unwrap();
        let record = single.data.unwrap().into_record();

        assert_eq!(record.id, 52991);
        assert_eq!(record.title, "Sousou no Frieren");
        assert_eq!(record.display_title(), "Frieren: Beyond Journey's End");
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/1015/138006.jpg")
        );
        assert_eq!(record.score, Some(9.3));
        assert_eq!(record.episodes, Some(28));
        assert_eq!(record.media_type.as_deref(), Some("TV"));
        assert_eq!(record.aired.as_deref(), Some("Sep 29, 2023 to Mar 22, 2024"));
        assert_eq!(record.studios[0].name, "Madhouse");
        assert_eq!(
            record.genres,
            vec![
                Genre::new(2, "Adventure"),
                Genre::new(8, "Drama"),
                Genre::new(10, "Fantasy")
            ]
        );
        assert_eq!(record.streaming[0].name, "Crunchyroll");
        assert_eq!(record.season_label().as_deref(), Some("Fall 2023"));
    }

    #[test]
    fn test_deserialize_list_response() {
        let json = format!(
            r#"{{
                "pagination": {{"last_visible_page": 1, "has_next_page": false}},
                "data": [{FRIEREN}, {{"mal_id": 1, "title": "Cowboy Bebop", "score": null}}]
            }}"#
        );
        let list: JikanList = serde_json::from_str(&json).unwrap();
        let records = list.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 52991);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].score, None);
    }

    #[test]
    fn test_missing_data_is_empty_list() {
        let list: JikanList = serde_json::from_str("{}").unwrap();
        assert!(list.into_records().is_empty());

        let list: JikanList = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(list.into_records().is_empty());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{ "mal_id": 1, "title": "Test" }"#;
        let record = serde_json::from_str::<JikanAnime>(json).unwrap().into_record();
        assert_eq!(record.id, 1);
        assert!(record.image_url.is_none());
        assert!(record.genres.is_empty());
        assert!(record.streaming.is_empty());
        assert!(record.title_english.is_none());
    }
}
