//! Result records returned by each operation.

use serde::{Deserialize, Serialize};

/// A web search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResult {
    /// Result title, plain text.
    pub title: String,
    /// Result URL. Dedup key.
    pub href: String,
    /// Snippet, plain text.
    pub body: String,
}

impl TextResult {
    pub fn new(title: impl Into<String>, href: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            body: body.into(),
        }
    }
}

/// An image search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub title: String,
    /// Full-size image URL. Dedup key.
    pub image: String,
    pub thumbnail: String,
    /// Page the image was found on.
    pub url: String,
    pub height: u32,
    pub width: u32,
    /// Upstream provider (e.g. "Bing").
    pub source: String,
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResult {
    /// UTC ISO-8601 publication time (`YYYY-MM-DDTHH:MM:SS`).
    pub date: String,
    /// Headline. Dedup key.
    pub title: String,
    /// Excerpt, plain text.
    pub body: String,
    pub url: String,
    pub image: Option<String>,
    /// Publisher name.
    pub source: String,
}

/// A local business from maps search.
///
/// `image`, `links` and `description` are only filled when the place carries
/// an embedded knowledge panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Business website.
    pub url: Option<String>,
    pub phone: Option<String>,
    /// Attribution URL of the listing.
    pub source: Option<String>,
    pub image: Option<String>,
    pub links: Option<serde_json::Value>,
    pub description: Option<String>,
    /// Opening hours keyed by day, as returned upstream.
    pub hours: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PlaceResult {
    /// Key used to drop repeated places across boxes.
    pub fn dedup_key(&self) -> String {
        format!("{}{}", self.title, self.address)
    }
}

/// A translated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// The input text.
    pub original: String,
    /// The translated text.
    pub translated: String,
    /// Source language detected upstream when none was given.
    pub detected_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_result_new() {
        let result = TextResult::new("Title", "https://example.com", "Body");
        assert_eq!(result.title, "Title");
        assert_eq!(result.href, "https://example.com");
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn test_place_dedup_key() {
        let place = PlaceResult {
            title: "Cafe".to_string(),
            address: "1 Main St".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            url: None,
            phone: None,
            source: None,
            image: None,
            links: None,
            description: None,
            hours: None,
        };
        assert_eq!(place.dedup_key(), "Cafe1 Main St");
    }

    #[test]
    fn test_news_result_serialization_keeps_null_image() {
        let news = NewsResult {
            date: "2024-01-15T10:00:00".to_string(),
            title: "Title".to_string(),
            body: "Body".to_string(),
            url: "https://news.example".to_string(),
            image: None,
            source: "Example".to_string(),
        };
        let json = serde_json::to_string(&news).unwrap();
        assert!(json.contains("\"image\":null"));
    }

    #[test]
    fn test_translation_deserialization() {
        let json = r#"{"original":"hallo","translated":"hello","detected_language":"de"}"#;
        let translation: Translation = serde_json::from_str(json).unwrap();
        assert_eq!(translation.translated, "hello");
        assert_eq!(translation.detected_language.as_deref(), Some("de"));
    }
}
