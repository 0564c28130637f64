//! Web search over the `d.js` endpoint.

use serde::Deserialize;
use tracing::debug;

use crate::client::ensure_keywords;
use crate::normalize::normalize_html;
use crate::paginate::{decode_page, DedupCache, Pagination};
use crate::{DdgClient, PaceStep, Result, SearchQuery, TextResult};

/// Results requested when the query does not say.
pub const DEFAULT_MAX_RESULTS: usize = 28;
/// The endpoint serves nothing past this offset.
pub const OFFSET_CEILING: usize = 200;
/// Step used when a page carries no next-page marker.
pub const PAGE_SIZE: usize = 30;

/// One entry of a `d.js` results array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WebEntry {
    /// Next-page marker; `n` is a relative URL carrying the next offset.
    Cursor { n: String },
    Hit {
        t: String,
        u: String,
        #[serde(default)]
        a: String,
    },
    Other(serde_json::Value),
}

/// Reads the `s` offset from a marker URL, rounded down to an even number.
fn marker_offset(marker: &str) -> Option<usize> {
    let base = url::Url::parse("https://links.duckduckgo.com/").ok()?;
    let url = base.join(marker).ok()?;
    let offset: usize = url
        .query_pairs()
        .find(|(key, _)| key == "s")
        .and_then(|(_, value)| value.parse().ok())?;
    Some(offset - offset % 2)
}

/// Adds the new hits of a page to `results`.
///
/// Returns the offset announced by the page's marker, if any. Entries after
/// the marker are ignored.
fn collect_page(
    entries: Vec<WebEntry>,
    cache: &mut DedupCache<String>,
    results: &mut Vec<TextResult>,
) -> Option<usize> {
    for entry in entries {
        match entry {
            WebEntry::Cursor { n } => match marker_offset(&n) {
                Some(offset) => return Some(offset),
                None => debug!("Ignoring marker without offset: {}", n),
            },
            WebEntry::Hit { t, u, a } => {
                if cache.insert_new(u.clone()) {
                    results.push(TextResult::new(normalize_html(&t), u, normalize_html(&a)));
                }
            }
            WebEntry::Other(_) => {}
        }
    }
    None
}

impl DdgClient {
    /// Web search.
    ///
    /// Collects pages until at least `max_results` hits (default 28) are
    /// gathered or the endpoint runs out. A page that is not valid JSON ends
    /// the search with the hits collected so far.
    pub async fn search_text(&self, query: &SearchQuery) -> Result<Vec<TextResult>> {
        ensure_keywords(&query.keywords)?;
        let token = self.acquire_token(&query.keywords).await?;

        let kp = query.safesearch.kp().to_string();
        let target = query.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let mut pagination = Pagination::new(OFFSET_CEILING, PAGE_SIZE, target);
        let mut cache = DedupCache::new();
        let mut results = Vec::new();

        while pagination.has_next(results.len()) {
            let offset = pagination.offset().to_string();
            let mut params = vec![
                ("q", query.keywords.as_str()),
                ("l", query.region.as_str()),
                ("p", kp.as_str()),
                ("s", offset.as_str()),
                ("o", "json"),
                ("vqd", token.value()),
            ];
            if let Some(limit) = query.time_limit {
                params.push(("df", limit.as_param()));
            }

            let body = self.get_page(&self.config().endpoints.links, &params).await?;
            let Some(entries) = decode_page::<WebEntry>("d.js", &body) else {
                return Ok(results);
            };
            if entries.is_empty() {
                break;
            }

            match collect_page(entries, &mut cache, &mut results) {
                Some(next) => pagination.jump_to(next),
                None => pagination.advance(),
            }
            debug!(
                "Web search at offset {}/{} has {} results",
                offset,
                pagination.ceiling(),
                results.len()
            );
            self.pace(PaceStep::TextPage).await;
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(json: &str) -> Vec<WebEntry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_marker_offset_rounds_down() {
        assert_eq!(marker_offset("/d.js?q=rust&l=wt-wt&s=23&dl=en&vqd=4-1"), Some(22));
        assert_eq!(marker_offset("/d.js?q=rust&s=50"), Some(50));
    }

    #[test]
    fn test_marker_offset_missing() {
        assert_eq!(marker_offset("/d.js?q=rust&vqd=4-1"), None);
        assert_eq!(marker_offset("/d.js?q=rust&s=abc"), None);
    }

    #[test]
    fn test_marker_offset_ignores_similar_keys() {
        assert_eq!(marker_offset("/d.js?ss=5&s=12"), Some(12));
    }

    #[test]
    fn test_entries_discriminated() {
        let parsed = entries(
            r#"[
                {"t": "Title", "u": "https://a.test", "a": "Body"},
                {"n": "/d.js?s=30"},
                {"something": "else"}
            ]"#,
        );
        assert!(matches!(parsed[0], WebEntry::Hit { .. }));
        assert!(matches!(parsed[1], WebEntry::Cursor { .. }));
        assert!(matches!(parsed[2], WebEntry::Other(_)));
    }

    #[test]
    fn test_collect_page_dedups_and_normalizes() {
        let page = entries(
            r#"[
                {"t": "<b>Rust</b>", "u": "https://rust-lang.org", "a": "Fast &amp; safe"},
                {"t": "Rust again", "u": "https://rust-lang.org", "a": "dup"},
                {"t": "Book", "u": "https://doc.rust-lang.org/book", "a": "Learn"}
            ]"#,
        );
        let mut cache = DedupCache::new();
        let mut results = Vec::new();
        let next = collect_page(page, &mut cache, &mut results);

        assert_eq!(next, None);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], TextResult::new("Rust", "https://rust-lang.org", "Fast & safe"));
        assert_eq!(results[1].href, "https://doc.rust-lang.org/book");
    }

    #[test]
    fn test_collect_page_stops_at_marker() {
        let page = entries(
            r#"[
                {"t": "One", "u": "https://one.test", "a": ""},
                {"n": "/d.js?q=x&s=27"},
                {"t": "After", "u": "https://after.test", "a": ""}
            ]"#,
        );
        let mut cache = DedupCache::new();
        let mut results = Vec::new();
        let next = collect_page(page, &mut cache, &mut results);

        assert_eq!(next, Some(26));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_collect_page_across_pages() {
        let mut cache = DedupCache::new();
        let mut results = Vec::new();
        collect_page(
            entries(r#"[{"t": "A", "u": "https://a.test"}]"#),
            &mut cache,
            &mut results,
        );
        collect_page(
            entries(r#"[{"t": "A", "u": "https://a.test"}, {"t": "B", "u": "https://b.test"}]"#),
            &mut cache,
            &mut results,
        );
        let urls: Vec<&str> = results.iter().map(|r| r.href.as_str()).collect();
        assert_eq!(urls, vec!["https://a.test", "https://b.test"]);
    }
}
