//! Building blocks shared by the offset-paginated endpoints.

use std::collections::HashSet;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// Offset cursor for one paginated call.
///
/// The offset only moves forward and a request is only issued while it is
/// below the ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    offset: usize,
    ceiling: usize,
    page_size: usize,
    target: usize,
}

impl Pagination {
    pub fn new(ceiling: usize, page_size: usize, target: usize) -> Self {
        Self {
            offset: 0,
            ceiling,
            page_size,
            target,
        }
    }

    /// Offset of the next page to request.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Whether another page should be requested given `collected` records.
    pub fn has_next(&self, collected: usize) -> bool {
        self.offset < self.ceiling && collected < self.target
    }

    /// Moves to the next page by the fixed page size.
    pub fn advance(&mut self) {
        self.offset += self.page_size;
    }

    /// Moves to an offset announced by the server.
    ///
    /// Offsets at or behind the cursor fall back to [`advance`](Self::advance).
    pub fn jump_to(&mut self, offset: usize) {
        if offset > self.offset {
            self.offset = offset;
        } else {
            self.advance();
        }
    }
}

/// Keys already emitted during one call.
#[derive(Debug)]
pub struct DedupCache<K> {
    seen: HashSet<K>,
}

impl<K: Eq + Hash> DedupCache<K> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Records `key`, returning true if it had not been seen before.
    pub fn insert_new(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<K: Eq + Hash> Default for DedupCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

/// Decodes the `results` array of a page body.
///
/// Returns `None` when the body is not the expected JSON; callers stop and
/// keep what they collected so far.
pub fn decode_page<T: DeserializeOwned>(endpoint: &str, body: &str) -> Option<Vec<T>> {
    match serde_json::from_str::<Page<T>>(body) {
        Ok(page) => Some(page.results),
        Err(e) => {
            warn!("Malformed page from {}: {}", endpoint, e);
            None
        }
    }
}
