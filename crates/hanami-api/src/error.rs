use thiserror::Error;

/// A failed catalog fetch.
///
/// Every variant means the call produced no data; callers never receive a
/// partial list alongside an error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}
