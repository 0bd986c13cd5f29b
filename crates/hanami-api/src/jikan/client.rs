use reqwest::Client;
use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::types::{JikanList, JikanSingle};
use crate::error::CatalogError;
use crate::traits::{AnimeRecord, Catalog, GenreOrder};

pub const BASE_URL: &str = "https://api.jikan.moe/v4";

/// Jikan v4 REST client.
///
/// One request per call: no retries, no caching, no timeout beyond reqwest's defaults.
pub struct JikanClient {
    base_url: String,
    http: Client,
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JikanClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Jikan API error");
            Err(CatalogError::Api {
                status,
                message: body,
            })
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, CatalogError> {
        let url = endpoint.url(&self.base_url)?;
        let operation = endpoint.operation();
        tracing::debug!(operation, %url, "Jikan request");

        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn fetch_list(&self, endpoint: Endpoint) -> Result<Vec<AnimeRecord>, CatalogError> {
        let page: JikanList = self.fetch(&endpoint).await?;
        let records = page.into_records();
        tracing::info!(
            operation = endpoint.operation(),
            results = records.len(),
            "Catalog query completed"
        );
        Ok(records)
    }
}

impl Catalog for JikanClient {
    async fn search(
        &self,
        query: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AnimeRecord>, CatalogError> {
        self.fetch_list(Endpoint::search(query, limit)).await
    }

    async fn get_by_id(&self, id: u64) -> Result<AnimeRecord, CatalogError> {
        let single: JikanSingle = self.fetch(&Endpoint::Anime { id }).await?;
        single
            .data
            .map(|anime| anime.into_record())
            .ok_or_else(|| CatalogError::Parse(format!("no anime in response for id {id}")))
    }

    async fn upcoming(&self, limit: u32) -> Result<Vec<AnimeRecord>, CatalogError> {
        self.fetch_list(Endpoint::TopUpcoming { limit }).await
    }

    async fn by_genre(
        &self,
        genre_id: u64,
        limit: u32,
        order: GenreOrder,
    ) -> Result<Vec<AnimeRecord>, CatalogError> {
        self.fetch_list(Endpoint::ByGenre {
            genre_id,
            limit,
            order,
        })
        .await
    }
}
