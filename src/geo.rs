//! Bounding boxes and the quadrant work queue used by place search.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Degrees added per kilometer of radius. An approximation that ignores
/// latitude; good enough for growing a search area.
pub const DEGREES_PER_KM: f64 = 0.09;

/// A rectangle given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_tl: f64,
    pub lon_tl: f64,
    pub lat_br: f64,
    pub lon_br: f64,
}

impl BoundingBox {
    pub fn new(lat_tl: f64, lon_tl: f64, lat_br: f64, lon_br: f64) -> Self {
        Self {
            lat_tl,
            lon_tl,
            lat_br,
            lon_br,
        }
    }

    /// Builds a box from a Nominatim `boundingbox` array
    /// (`[lat_min, lat_max, lon_min, lon_max]` as strings).
    pub fn from_nominatim<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.len() != 4 {
            return Err(SearchError::MalformedResponse(format!(
                "bounding box has {} values, expected 4",
                values.len()
            )));
        }
        let mut parsed = [0.0f64; 4];
        for (slot, raw) in parsed.iter_mut().zip(values) {
            let raw = raw.as_ref();
            *slot = raw.trim().parse().map_err(|_| {
                SearchError::MalformedResponse(format!("invalid coordinate '{}'", raw))
            })?;
        }
        let [lat_min, lat_max, lon_min, lon_max] = parsed;
        Ok(Self::new(lat_max, lon_min, lat_min, lon_max))
    }

    /// Grows every edge outward by `radius_km`.
    pub fn expand(self, radius_km: f64) -> Self {
        let delta = radius_km * DEGREES_PER_KM;
        Self {
            lat_tl: self.lat_tl + delta,
            lon_tl: self.lon_tl - delta,
            lat_br: self.lat_br - delta,
            lon_br: self.lon_br + delta,
        }
    }

    /// Splits the box into top-left, top-right, bottom-left and bottom-right quadrants.
    pub fn quarter(&self) -> [BoundingBox; 4] {
        let lat_mid = (self.lat_tl + self.lat_br) / 2.0;
        let lon_mid = (self.lon_tl + self.lon_br) / 2.0;
        [
            Self::new(self.lat_tl, self.lon_tl, lat_mid, lon_mid),
            Self::new(self.lat_tl, lon_mid, lat_mid, self.lon_br),
            Self::new(lat_mid, self.lon_tl, self.lat_br, lon_mid),
            Self::new(lat_mid, lon_mid, self.lat_br, self.lon_br),
        ]
    }

    /// Area in square degrees.
    pub fn area(&self) -> f64 {
        (self.lat_tl - self.lat_br).abs() * (self.lon_br - self.lon_tl).abs()
    }

    /// Whether a point lies inside the box or on its edge.
    #[cfg(test)]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat <= self.lat_tl && lat >= self.lat_br && lon >= self.lon_tl && lon <= self.lon_br
    }

    /// `bbox_tl` request value (`lat,lon`).
    pub fn top_left_param(&self) -> String {
        format!("{},{}", self.lat_tl, self.lon_tl)
    }

    /// `bbox_br` request value (`lat,lon`).
    pub fn bottom_right_param(&self) -> String {
        format!("{},{}", self.lat_br, self.lon_br)
    }
}

/// A box in the subdivision arena.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxNode {
    pub bbox: BoundingBox,
    /// 0 for the initial box.
    pub depth: u32,
    /// Arena index of the box this one was split from.
    pub parent: Option<usize>,
}

/// Depth-first work queue of boxes still to be searched.
///
/// Every box ever queued stays in the arena; the stack holds indices of the
/// ones not yet visited.
#[derive(Debug)]
pub struct SubdivisionQueue {
    nodes: Vec<BoxNode>,
    stack: Vec<usize>,
    max_depth: Option<u32>,
}

impl SubdivisionQueue {
    pub fn new(root: BoundingBox, max_depth: Option<u32>) -> Self {
        Self {
            nodes: vec![BoxNode {
                bbox: root,
                depth: 0,
                parent: None,
            }],
            stack: vec![0],
            max_depth,
        }
    }

    /// Takes the most recently queued box.
    pub fn pop(&mut self) -> Option<usize> {
        self.stack.pop()
    }

    pub fn node(&self, index: usize) -> &BoxNode {
        &self.nodes[index]
    }

    /// All boxes queued so far, in creation order.
    pub fn nodes(&self) -> &[BoxNode] {
        &self.nodes
    }

    /// Number of boxes still waiting.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Queues the four quadrants of a box.
    ///
    /// Returns false, queuing nothing, if the children would exceed the
    /// depth limit.
    pub fn subdivide(&mut self, index: usize) -> bool {
        let parent = self.nodes[index].bbox;
        let depth = self.nodes[index].depth + 1;
        if self.max_depth.is_some_and(|max| depth > max) {
            return false;
        }
        for bbox in parent.quarter() {
            self.nodes.push(BoxNode {
                bbox,
                depth,
                parent: Some(index),
            });
            self.stack.push(self.nodes.len() - 1);
        }
        true
    }

    /// Boxes that were searched without being split further.
    pub fn leaves(&self) -> Vec<&BoxNode> {
        let mut has_children = vec![false; self.nodes.len()];
        for node in &self.nodes {
            if let Some(parent) = node.parent {
                has_children[parent] = true;
            }
        }
        self.nodes
            .iter()
            .zip(has_children)
            .filter(|(_, split)| !split)
            .map(|(node, _)| node)
            .collect()
    }
}
