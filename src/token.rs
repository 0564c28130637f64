//! Session token (`vqd`) acquisition.
//!
//! Every JSON endpoint rejects requests without a `vqd` value bound to the
//! query text. The token is embedded in an inline script of the page returned
//! when the query is posted to the root endpoint.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::{DdgClient, PaceStep, Result, SearchError};

/// A `vqd` token and the query that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
    query: String,
}

impl SessionToken {
    pub fn new(value: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            query: query.into(),
        }
    }

    /// Token value sent as the `vqd` parameter.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Query text the token was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

static VQD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"vqd=['"]([^'"]+)['"]"#).unwrap());

/// Extracts the `vqd` token from the bootstrap page.
pub fn extract_vqd(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script")
        .map_err(|e| SearchError::MalformedResponse(format!("Failed to parse selector: {:?}", e)))?;

    document
        .select(&script_selector)
        .map(|script| script.text().collect::<String>())
        .filter(|text| text.contains("vqd="))
        .find_map(|text| {
            VQD_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .ok_or(SearchError::TokenNotFound)
}

impl DdgClient {
    /// Requests a session token for `keywords`.
    ///
    /// Waits for the token cooldown before returning. Fails with
    /// [`SearchError::TokenNotFound`] when the page carries no token; no retry
    /// is attempted.
    pub async fn acquire_token(&self, keywords: &str) -> Result<SessionToken> {
        let response = self
            .http()
            .post(&self.config().endpoints.root)
            .form(&[("q", keywords)])
            .send()
            .await?;
        debug!("Token request returned status {}", response.status());
        let html = response.text().await?;

        let value = extract_vqd(&html)?;
        debug!("Acquired vqd for '{}'", keywords);
        self.pace(PaceStep::Token).await;

        Ok(SessionToken::new(value, keywords))
    }
}
