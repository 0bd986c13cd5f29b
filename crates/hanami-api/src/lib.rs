//! Read-only client for the Jikan anime catalog.
//!
//! [`Catalog`] is the seam the rest of hanami programs against; [`JikanClient`]
//! is the production implementation backed by `https://api.jikan.moe/v4`.

pub mod error;
pub mod jikan;
pub mod traits;

pub use error::CatalogError;
pub use jikan::JikanClient;
pub use traits::{
    AnimeRecord, AnimeSeason, Catalog, Genre, GenreOrder, OrderBy, SortDirection, StreamingLink,
    Studio,
};
