//! # ddg-search
//!
//! A client for DuckDuckGo's web, image, news, maps and translation
//! endpoints that turns their JSON into typed records.
//!
//! - Session token (`vqd`) acquisition per search
//! - Offset pagination with per-call deduplication
//! - Quadrant subdivision for maps searches larger than one page
//! - Pluggable request pacing and geocoding
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddg_search::{DdgClient, SearchQuery, TimeLimit};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DdgClient::new()?;
//!
//!     let query = SearchQuery::new("rust programming").with_time_limit(TimeLimit::Week);
//!     for article in client.search_news(&query).await? {
//!         println!("{} {}: {}", article.date, article.title, article.url);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod pacing;
mod query;
mod result;
mod token;

pub mod engines;
pub mod geo;
pub mod geocode;
pub mod normalize;
pub mod paginate;

pub use client::DdgClient;
pub use config::{ClientConfig, Endpoints, PacingConfig};
pub use error::{Result, SearchError};
pub use geo::BoundingBox;
pub use geocode::{FixedGeocoder, Geocoder, NominatimGeocoder};
pub use pacing::{FixedInterval, PaceStep, RateLimiter, Unpaced};
pub use query::{
    Address, ImageColor, ImageFilters, ImageLayout, ImageLicense, ImageSize, ImageType,
    PlaceQuery, SafeSearch, SearchQuery, TimeLimit,
};
pub use result::{ImageResult, NewsResult, PlaceResult, TextResult, Translation};
pub use token::{extract_vqd, SessionToken};
