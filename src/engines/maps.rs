//! Local places search over the `local.js` endpoint.
//!
//! The endpoint returns at most [`PAGE_CAP`] places per bounding box. A box
//! that comes back full is split into quadrants and each quadrant is searched
//! again, until every box is below the cap or the depth limit is reached.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::ensure_keywords;
use crate::geo::{BoundingBox, SubdivisionQueue};
use crate::paginate::{decode_page, DedupCache};
use crate::token::SessionToken;
use crate::{DdgClient, PaceStep, PlaceQuery, PlaceResult, Result, SearchError};

/// Most places the endpoint returns for one box.
pub const PAGE_CAP: usize = 20;

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawEmbed {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    third_party_links: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    coordinates: RawCoordinates,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    embed: Option<RawEmbed>,
    #[serde(default)]
    hours: Option<Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<RawPlace> for PlaceResult {
    fn from(raw: RawPlace) -> Self {
        let embed = raw.embed.unwrap_or_default();
        Self {
            title: raw.name,
            address: raw.address.unwrap_or_default(),
            latitude: raw.coordinates.latitude,
            longitude: raw.coordinates.longitude,
            url: non_empty(raw.website),
            phone: non_empty(raw.phone),
            source: non_empty(raw.url),
            image: non_empty(embed.image),
            links: embed.third_party_links.filter(|links| !links.is_null()),
            description: non_empty(embed.description),
            hours: match raw.hours {
                Some(Value::Object(hours)) => Some(hours),
                _ => None,
            },
        }
    }
}

/// Adds the new places of one box to `results`.
fn collect_places(
    page: &[Value],
    cache: &mut DedupCache<String>,
    results: &mut Vec<PlaceResult>,
) {
    for entry in page {
        let raw = match RawPlace::deserialize(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed place entry: {}", e);
                continue;
            }
        };
        let place = PlaceResult::from(raw);
        if cache.insert_new(place.dedup_key()) {
            results.push(place);
        }
    }
}

impl DdgClient {
    /// Local places search.
    ///
    /// Geocodes the address, grows the box by `radius_km` and searches it,
    /// splitting every box that returns a full page. Places are deduplicated by
    /// title and address.
    pub async fn search_places(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>> {
        ensure_keywords(&query.keywords)?;
        if query.address.is_empty() {
            return Err(SearchError::InvalidQuery("Address cannot be empty".into()));
        }
        let token = self.acquire_token(&query.keywords).await?;

        let area = self
            .geocoder()
            .bounding_box(&query.address)
            .await?
            .expand(query.radius_km);
        debug!(
            "Searching places in {} / {}",
            area.top_left_param(),
            area.bottom_right_param()
        );

        let mut queue = SubdivisionQueue::new(area, self.config().max_subdivision_depth);
        let mut cache = DedupCache::new();
        let mut results = Vec::new();

        while let Some(index) = queue.pop() {
            let bbox = queue.node(index).bbox;
            let page = self.fetch_places(&token, &bbox).await?;
            collect_places(&page, &mut cache, &mut results);

            if page.len() == PAGE_CAP && !queue.subdivide(index) {
                warn!(
                    "Box {} / {} is full at depth {}, not splitting further",
                    bbox.top_left_param(),
                    bbox.bottom_right_param(),
                    queue.node(index).depth
                );
            }

            info!("Found {} places", results.len());
            debug!("{} boxes left to search", queue.pending());
            self.pace(PaceStep::PlaceBox).await;
        }

        debug!(
            "Searched {} boxes, {} without splitting",
            queue.nodes().len(),
            queue.leaves().len()
        );
        Ok(results)
    }

    /// Fetches the raw entries for one box. A malformed page counts as empty.
    async fn fetch_places(&self, token: &SessionToken, bbox: &BoundingBox) -> Result<Vec<Value>> {
        let bbox_tl = bbox.top_left_param();
        let bbox_br = bbox.bottom_right_param();
        let params = [
            ("q", token.query()),
            ("vqd", token.value()),
            ("tg", "maps_places"),
            ("rt", "D"),
            ("mkexp", "b"),
            ("wiki_info", "1"),
            ("is_requery", "1"),
            ("bbox_tl", bbox_tl.as_str()),
            ("bbox_br", bbox_br.as_str()),
            ("strict_bbox", "1"),
        ];

        let body = self.get_page(&self.config().endpoints.local, &params).await?;
        Ok(decode_page::<Value>("local.js", &body).unwrap_or_default())
    }
}
