//! Address geocoding for place search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::geo::BoundingBox;
use crate::query::Address;
use crate::{Result, SearchError};

/// Resolves an address to the bounding box of its best match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn bounding_box(&self, address: &Address) -> Result<BoundingBox>;
}

/// Geocoder backed by the OpenStreetMap Nominatim search API.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder that sends requests through `client` to `endpoint`.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Deserialize)]
struct NominatimPlace {
    boundingbox: Vec<String>,
}

fn first_bounding_box(address: &Address, body: &str) -> Result<BoundingBox> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("geocoder: {}", e)))?;
    let place = places
        .first()
        .ok_or_else(|| SearchError::GeocodeLookupFailure(address.to_string()))?;
    BoundingBox::from_nominatim(&place.boundingbox)
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn bounding_box(&self, address: &Address) -> Result<BoundingBox> {
        let mut params = address.components();
        params.push(("polygon_geojson", "0"));
        params.push(("format", "jsonv2"));

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let body = response.text().await?;

        let bbox = first_bounding_box(address, &body)?;
        debug!(
            "Geocoded '{}' to {} / {}",
            address,
            bbox.top_left_param(),
            bbox.bottom_right_param()
        );
        Ok(bbox)
    }
}

/// Geocoder that always returns the same box.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeocoder(pub BoundingBox);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn bounding_box(&self, _address: &Address) -> Result<BoundingBox> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Address {
        Address {
            city: Some("Paris".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_bounding_box() {
        let body = r#"[
            {"place_id": 1, "boundingbox": ["48.8155755", "48.9021560", "2.2241220", "2.4697602"]},
            {"place_id": 2, "boundingbox": ["0", "1", "0", "1"]}
        ]"#;
        let bbox = first_bounding_box(&paris(), body).unwrap();
        assert_eq!(bbox.lat_tl, 48.9021560);
        assert_eq!(bbox.lon_tl, 2.2241220);
        assert_eq!(bbox.lat_br, 48.8155755);
        assert_eq!(bbox.lon_br, 2.4697602);
    }

    #[test]
    fn test_first_bounding_box_no_candidates() {
        let err = first_bounding_box(&paris(), "[]").unwrap_err();
        match err {
            SearchError::GeocodeLookupFailure(msg) => assert_eq!(msg, "city=Paris"),
            other => panic!("Expected GeocodeLookupFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_first_bounding_box_malformed() {
        let err = first_bounding_box(&paris(), "<html></html>").unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_fixed_geocoder() {
        let bbox = BoundingBox::new(1.0, 2.0, 0.0, 3.0);
        let geocoder = FixedGeocoder(bbox);
        assert_eq!(geocoder.bounding_box(&paris()).await.unwrap(), bbox);
    }
}
