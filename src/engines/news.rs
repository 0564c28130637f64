//! News search over the `news.js` endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ensure_keywords;
use crate::normalize::normalize_html;
use crate::paginate::{decode_page, DedupCache, Pagination};
use crate::{DdgClient, NewsResult, PaceStep, Result, SearchQuery};

pub const DEFAULT_MAX_RESULTS: usize = 30;
pub const OFFSET_CEILING: usize = 240;
pub const PAGE_SIZE: usize = 30;

#[derive(Debug, Deserialize)]
struct RawNews {
    date: i64,
    title: String,
    #[serde(default)]
    excerpt: String,
    url: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    source: String,
}

/// Formats a unix timestamp as `YYYY-MM-DDTHH:MM:SS` in UTC.
fn iso_date(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn to_result(raw: RawNews) -> Option<NewsResult> {
    let date = iso_date(raw.date)?;
    Some(NewsResult {
        date,
        title: raw.title,
        body: normalize_html(&raw.excerpt),
        url: raw.url,
        image: raw.image.filter(|image| !image.is_empty()),
        source: raw.source,
    })
}

/// Sorts newest first. Articles with equal dates keep their discovery order.
fn sort_by_date_desc(results: &mut [NewsResult]) {
    results.sort_by(|a, b| b.date.cmp(&a.date));
}

impl DdgClient {
    /// News search.
    ///
    /// Articles are deduplicated by title and returned newest first. The
    /// search stops early when the endpoint repeats the previous page.
    pub async fn search_news(&self, query: &SearchQuery) -> Result<Vec<NewsResult>> {
        ensure_keywords(&query.keywords)?;
        let token = self.acquire_token(&query.keywords).await?;

        let kp = query.safesearch.kp().to_string();
        let target = query.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let mut pagination = Pagination::new(OFFSET_CEILING, PAGE_SIZE, target);
        let mut cache = DedupCache::new();
        let mut previous: Option<Vec<Value>> = None;
        let mut results = Vec::new();

        while pagination.has_next(results.len()) {
            let offset = pagination.offset().to_string();
            let mut params = vec![
                ("l", query.region.as_str()),
                ("o", "json"),
                ("noamp", "1"),
                ("q", query.keywords.as_str()),
                ("vqd", token.value()),
                ("p", kp.as_str()),
                ("s", offset.as_str()),
            ];
            if let Some(limit) = query.time_limit {
                params.push(("df", limit.as_param()));
            }

            let body = self.get_page(&self.config().endpoints.news, &params).await?;
            let Some(page) = decode_page::<Value>("news.js", &body) else {
                break;
            };
            if page.is_empty() {
                break;
            }
            if previous.as_ref() == Some(&page) {
                debug!("News page at offset {} repeats the previous one", offset);
                break;
            }

            for entry in &page {
                let raw = match RawNews::deserialize(entry) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("Skipping malformed news entry: {}", e);
                        continue;
                    }
                };
                if !cache.insert_new(raw.title.clone()) {
                    continue;
                }
                match to_result(raw) {
                    Some(news) => results.push(news),
                    None => warn!("Skipping news entry with out-of-range date"),
                }
            }
            debug!(
                "News search at offset {}/{} has {} results",
                offset,
                pagination.ceiling(),
                results.len()
            );

            previous = Some(page);
            pagination.advance();
            self.pace(PaceStep::NewsPage).await;
        }

        sort_by_date_desc(&mut results);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(date: &str, title: &str) -> NewsResult {
        NewsResult {
            date: date.to_string(),
            title: title.to_string(),
            body: String::new(),
            url: String::new(),
            image: None,
            source: String::new(),
        }
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(iso_date(0).as_deref(), Some("1970-01-01T00:00:00"));
        assert_eq!(iso_date(1_700_000_000).as_deref(), Some("2023-11-14T22:13:20"));
    }

    #[test]
    fn test_to_result_normalizes_excerpt() {
        let raw: RawNews = serde_json::from_str(
            r#"{
                "date": 1700000000,
                "title": "Rust 2.0",
                "excerpt": "<b>Rust</b> &amp; friends",
                "url": "https://news.test/rust",
                "image": "",
                "source": "Example Times",
                "relative_time": "1 day ago"
            }"#,
        )
        .unwrap();
        let result = to_result(raw).unwrap();
        assert_eq!(result.body, "Rust & friends");
        assert_eq!(result.date, "2023-11-14T22:13:20");
        assert!(result.image.is_none());
        assert_eq!(result.source, "Example Times");
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut results = vec![
            news("2023-01-01T00:00:00", "old"),
            news("2024-06-01T00:00:00", "new"),
            news("2023-06-01T00:00:00", "mid"),
            news("2024-06-01T00:00:00", "new2"),
        ];
        sort_by_date_desc(&mut results);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "new2", "mid", "old"]);
        assert!(results.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }
}
