use url::Url;

use crate::error::CatalogError;
use crate::traits::GenreOrder;

/// One Jikan v4 GET request.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Search { query: String, limit: u32 },
    SeasonNow { limit: u32 },
    Anime { id: u64 },
    TopUpcoming { limit: u32 },
    ByGenre {
        genre_id: u64,
        limit: u32,
        order: GenreOrder,
    },
}

impl Endpoint {
    /// Text search for a non-blank query, the current season otherwise.
    pub fn search(query: Option<&str>, limit: u32) -> Self {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Self::Search {
                query: q.to_string(),
                limit,
            },
            None => Self::SeasonNow { limit },
        }
    }

    /// Short name used in logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::SeasonNow { .. } => "season_now",
            Self::Anime { .. } => "anime",
            Self::TopUpcoming { .. } => "top_upcoming",
            Self::ByGenre { .. } => "by_genre",
        }
    }

    fn path(&self) -> String {
        match self {
            Self::Search { .. } | Self::ByGenre { .. } => "anime".to_string(),
            Self::SeasonNow { .. } => "seasons/now".to_string(),
            Self::Anime { id } => format!("anime/{id}"),
            Self::TopUpcoming { .. } => "top/anime".to_string(),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Search { query, limit } => {
                vec![("q", query.clone()), ("limit", limit.to_string())]
            }
            Self::SeasonNow { limit } => vec![("limit", limit.to_string())],
            Self::Anime { .. } => Vec::new(),
            Self::TopUpcoming { limit } => vec![
                ("filter", "upcoming".to_string()),
                ("limit", limit.to_string()),
            ],
            Self::ByGenre {
                genre_id,
                limit,
                order,
            } => vec![
                ("genres", genre_id.to_string()),
                ("limit", limit.to_string()),
                ("order_by", order.by.as_str().to_string()),
                ("sort", order.direction.as_str().to_string()),
            ],
        }
    }

    /// Absolute request URL under `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url, CatalogError> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), self.path());
        let params = self.params();
        let url = if params.is_empty() {
            Url::parse(&raw)?
        } else {
            Url::parse_with_params(&raw, &params)?
        };
        Ok(url)
    }
}
