//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pacing::PaceStep;

/// URLs of every endpoint the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Bootstrap page that hands out the `vqd` token.
    pub root: String,
    /// Web results (`d.js`).
    pub links: String,
    /// Image results (`i.js`).
    pub images: String,
    /// News results (`news.js`).
    pub news: String,
    /// Local places (`local.js`).
    pub local: String,
    /// Machine translation (`translation.js`).
    pub translation: String,
    /// Nominatim search endpoint used to geocode addresses.
    pub geocoder: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            root: "https://duckduckgo.com".to_string(),
            links: "https://links.duckduckgo.com/d.js".to_string(),
            images: "https://duckduckgo.com/i.js".to_string(),
            news: "https://duckduckgo.com/news.js".to_string(),
            local: "https://duckduckgo.com/local.js".to_string(),
            translation: "https://duckduckgo.com/translation.js".to_string(),
            geocoder: "https://nominatim.openstreetmap.org/search.php".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at a single host, keeping the upstream paths.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            root: format!("{}/", base),
            links: format!("{}/d.js", base),
            images: format!("{}/i.js", base),
            news: format!("{}/news.js", base),
            local: format!("{}/local.js", base),
            translation: format!("{}/translation.js", base),
            geocoder: format!("{}/search.php", base),
        }
    }
}

/// Delay applied after each kind of request, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub token_ms: u64,
    pub text_page_ms: u64,
    pub image_page_ms: u64,
    pub news_page_ms: u64,
    pub place_box_ms: u64,
    pub translation_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            token_ms: 750,
            text_page_ms: 750,
            image_page_ms: 0,
            news_page_ms: 200,
            place_box_ms: 0,
            translation_ms: 0,
        }
    }
}

impl PacingConfig {
    /// A configuration that never waits.
    pub fn none() -> Self {
        Self {
            token_ms: 0,
            text_page_ms: 0,
            image_page_ms: 0,
            news_page_ms: 0,
            place_box_ms: 0,
            translation_ms: 0,
        }
    }

    /// Returns the delay for a pacing step.
    pub fn delay(&self, step: PaceStep) -> Duration {
        let ms = match step {
            PaceStep::Token => self.token_ms,
            PaceStep::TextPage => self.text_page_ms,
            PaceStep::ImagePage => self.image_page_ms,
            PaceStep::NewsPage => self.news_page_ms,
            PaceStep::PlaceBox => self.place_box_ms,
            PaceStep::Translation => self.translation_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Configuration for [`DdgClient`](crate::DdgClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Proxy URL (http, https or socks5).
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Deepest quadrant level the place search may split to. `None` never stops splitting.
    #[serde(default = "default_max_subdivision_depth")]
    pub max_subdivision_depth: Option<u32>,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; rv:91.0) Gecko/20100101 Firefox/91.0".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_subdivision_depth() -> Option<u32> {
    Some(6)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            proxy: None,
            endpoints: Endpoints::default(),
            pacing: PacingConfig::default(),
            max_subdivision_depth: default_max_subdivision_depth(),
        }
    }
}

impl ClientConfig {
    /// Sets the endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the proxy URL.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pacing delays.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the subdivision depth limit.
    pub fn with_max_subdivision_depth(mut self, depth: Option<u32>) -> Self {
        self.max_subdivision_depth = depth;
        self
    }
}
