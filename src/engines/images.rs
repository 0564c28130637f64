//! Image search over the `i.js` endpoint.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ensure_keywords;
use crate::normalize::normalize_html;
use crate::paginate::{decode_page, DedupCache, Pagination};
use crate::{DdgClient, ImageFilters, ImageResult, PaceStep, Result, SearchQuery};

pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const OFFSET_CEILING: usize = 1000;
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    title: String,
    image: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    source: String,
}

impl From<RawImage> for ImageResult {
    fn from(raw: RawImage) -> Self {
        Self {
            title: normalize_html(&raw.title),
            image: raw.image,
            thumbnail: raw.thumbnail,
            url: raw.url,
            height: raw.height,
            width: raw.width,
            source: raw.source,
        }
    }
}

/// Adds the new images of a page to `results`, skipping undecodable entries.
fn collect_images(page: &[Value], cache: &mut DedupCache<String>, results: &mut Vec<ImageResult>) {
    for entry in page {
        let raw = match RawImage::deserialize(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed image entry: {}", e);
                continue;
            }
        };
        if cache.insert_new(raw.image.clone()) {
            results.push(ImageResult::from(raw));
        }
    }
}

impl DdgClient {
    /// Image search.
    ///
    /// Pages through the endpoint 100 images at a time until `max_results`
    /// (default 100) images are collected or offset 1000 is reached.
    pub async fn search_images(
        &self,
        query: &SearchQuery,
        filters: &ImageFilters,
    ) -> Result<Vec<ImageResult>> {
        ensure_keywords(&query.keywords)?;
        let token = self.acquire_token(&query.keywords).await?;

        let kp = query.safesearch.kp().to_string();
        let filter_param = filters.to_param(query.time_limit);
        let target = query.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let mut pagination = Pagination::new(OFFSET_CEILING, PAGE_SIZE, target);
        let mut cache = DedupCache::new();
        let mut results = Vec::new();

        while pagination.has_next(results.len()) {
            let offset = pagination.offset().to_string();
            let params = [
                ("l", query.region.as_str()),
                ("o", "json"),
                ("s", offset.as_str()),
                ("q", query.keywords.as_str()),
                ("vqd", token.value()),
                ("f", filter_param.as_str()),
                ("p", kp.as_str()),
            ];

            let body = self.get_page(&self.config().endpoints.images, &params).await?;
            let Some(page) = decode_page::<Value>("i.js", &body) else {
                return Ok(results);
            };
            if page.is_empty() {
                break;
            }

            collect_images(&page, &mut cache, &mut results);
            debug!("Image search at offset {} has {} results", offset, results.len());

            pagination.advance();
            self.pace(PaceStep::ImagePage).await;
        }

        Ok(results)
    }
}
