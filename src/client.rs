//! The shared DuckDuckGo client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Proxy};
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::pacing::{FixedInterval, PaceStep, RateLimiter};
use crate::{Result, SearchError};

/// Client for DuckDuckGo's web, image, news, maps and translation endpoints.
///
/// Holds one connection pool and the headers common to every request. All
/// operations issue their requests one after another; none runs requests in
/// parallel.
///
/// ```rust,no_run
/// use ddg_search::{DdgClient, SearchQuery};
///
/// # async fn run() -> ddg_search::Result<()> {
/// let client = DdgClient::new()?;
/// let results = client.search_text(&SearchQuery::new("rust").with_max_results(10)).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.href);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DdgClient {
    http: Client,
    config: ClientConfig,
    limiter: Arc<dyn RateLimiter>,
    geocoder: Arc<dyn Geocoder>,
}

impl DdgClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from a configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout));

        if let Some(proxy) = &config.proxy {
            url::Url::parse(proxy)?;
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
            debug!("Using proxy: {}", proxy);
        }

        let http = builder.build()?;
        let geocoder = NominatimGeocoder::new(http.clone(), config.endpoints.geocoder.clone());
        let limiter = FixedInterval::new(config.pacing.clone());

        Ok(Self {
            http,
            config,
            limiter: Arc::new(limiter),
            geocoder: Arc::new(geocoder),
        })
    }

    /// Replaces the rate limiter.
    pub fn with_rate_limiter<L: RateLimiter + 'static>(mut self, limiter: L) -> Self {
        self.limiter = Arc::new(limiter);
        self
    }

    /// Replaces the geocoder used by place search.
    pub fn with_geocoder<G: Geocoder + 'static>(mut self, geocoder: G) -> Self {
        self.geocoder = Arc::new(geocoder);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    pub(crate) async fn pace(&self, step: PaceStep) {
        self.limiter.pace(step).await;
    }

    /// Fetches a page body with a GET request.
    pub(crate) async fn get_page<P: Serialize + ?Sized>(&self, url: &str, params: &P) -> Result<String> {
        let response = self.http.get(url).query(params).send().await?;
        debug!("GET {} -> {}", url, response.status());
        Ok(response.text().await?)
    }
}

/// Rejects blank keywords before any request is made.
pub(crate) fn ensure_keywords(keywords: &str) -> Result<()> {
    if keywords.trim().is_empty() {
        return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
    }
    Ok(())
}
