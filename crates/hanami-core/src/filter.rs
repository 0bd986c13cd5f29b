use hanami_api::AnimeRecord;

/// Client-side filter over an already-fetched result list.
///
/// All present fields must match. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimeFilter {
    /// Genre name, exact match ignoring case.
    pub genre: Option<String>,
    /// Substring of the airing status, ignoring case.
    pub status: Option<String>,
    /// Media type ("TV", "Movie", ...), exact match ignoring case.
    pub media_type: Option<String>,
    /// Minimum score; records without a score never pass.
    pub min_score: Option<f64>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl AnimeFilter {
    pub fn is_empty(&self) -> bool {
        present(&self.genre).is_none()
            && present(&self.status).is_none()
            && present(&self.media_type).is_none()
            && self.min_score.is_none()
    }

    pub fn matches(&self, anime: &AnimeRecord) -> bool {
        if let Some(genre) = present(&self.genre) {
            if !anime.has_genre(genre) {
                return false;
            }
        }

        if let Some(status) = present(&self.status) {
            let wanted = status.to_lowercase();
            match &anime.status {
                Some(s) if s.to_lowercase().contains(&wanted) => {}
                _ => return false,
            }
        }

        if let Some(media_type) = present(&self.media_type) {
            match &anime.media_type {
                Some(t) if t.eq_ignore_ascii_case(media_type) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_score {
            match anime.score {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }

        true
    }

    /// Matching records in their original order.
    pub fn apply(&self, records: &[AnimeRecord]) -> Vec<AnimeRecord> {
        records
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use hanami_api::Genre;

    use super::*;

    fn record(id: u64, score: Option<f64>, status: &str, media_type: &str, genres: &[&str]) -> AnimeRecord {
        let mut a = AnimeRecord::new(id, format!("Anime {id}"));
        a.score = score;
        a.status = Some(status.into());
        a.media_type = Some(media_type.into());
        a.genres = genres
            .iter()
            .enumerate()
            .map(|(i, name)| Genre::new(i as u64 + 1, *name))
            .collect();
        a
    }

    fn sample() -> Vec<AnimeRecord> {
        vec![
            record(1, Some(8.75), "Finished Airing", "TV", &["Action", "Sci-Fi"]),
            record(2, Some(7.9), "Currently Airing", "TV", &["Comedy"]),
            record(3, None, "Not yet aired", "Movie", &["Action"]),
            record(4, Some(8.0), "Currently Airing", "ONA", &["Drama"]),
            record(5, Some(9.1), "Finished Airing", "Movie", &["Drama", "Romance"]),
        ]
    }

    fn ids(records: &[AnimeRecord]) -> Vec<u64> {
        records.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_empty_filter_returns_input_unchanged() {
        let filter = AnimeFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()), sample());

        let blank = AnimeFilter {
            genre: Some(String::new()),
            status: Some("  ".into()),
            media_type: Some(String::new()),
            min_score: None,
        };
        assert!(blank.is_empty());
        assert_eq!(blank.apply(&sample()), sample());
    }

    #[test]
    fn test_min_score_boundary() {
        let filter = AnimeFilter {
            min_score: Some(8.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 4, 5]);
    }

    #[test]
    fn test_genre_is_case_insensitive_exact() {
        let filter = AnimeFilter {
            genre: Some("action".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 3]);

        let partial = AnimeFilter {
            genre: Some("act".into()),
            ..Default::default()
        };
        assert!(partial.apply(&sample()).is_empty());
    }

    #[test]
    fn test_status_is_substring() {
        let filter = AnimeFilter {
            status: Some("airing".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 2, 4, 5]);

        let currently = AnimeFilter {
            status: Some("CURRENTLY".into()),
            ..Default::default()
        };
        assert_eq!(ids(&currently.apply(&sample())), vec![2, 4]);
    }

    #[test]
    fn test_fields_are_anded() {
        let filter = AnimeFilter {
            genre: Some("Drama".into()),
            media_type: Some("movie".into()),
            min_score: Some(9.0),
            status: Some("finished".into()),
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![5]);
    }

    #[test]
    fn test_missing_fields_fail_present_filters() {
        let bare = AnimeRecord::new(9, "Bare");
        let filter = AnimeFilter {
            media_type: Some("TV".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&bare));
        assert!(AnimeFilter::default().matches(&bare));
    }
}
