//! Error types for the DuckDuckGo client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while querying DuckDuckGo.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed (DNS, timeout, connection reset).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The bootstrap page carried no `vqd` session token.
    #[error("Session token not found in bootstrap response")]
    TokenNotFound,

    /// A response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    /// The geocoder returned no candidates for the address.
    #[error("Geocoder found no match for {0}")]
    GeocodeLookupFailure(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
