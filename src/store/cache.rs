use std::collections::{HashMap, VecDeque};

use crate::api::City;

/// Query → results cache with optional insertion-order eviction.
///
/// Keys are matched exactly; there is no prefix reuse between queries.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, Vec<City>>,
    /// Keys in insertion order, oldest first
    order: VecDeque<String>,
    /// `None` = unbounded
    capacity: Option<usize>,
}

impl QueryCache {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` queries. Zero means unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: (capacity > 0).then_some(capacity),
            ..Self::default()
        }
    }

    pub fn get(&self, query: &str) -> Option<&[City]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Store results for `query`. Re-inserting an existing key replaces its
    /// value but keeps its original position in the eviction order.
    pub fn insert(&mut self, query: String, cities: Vec<City>) {
        if let Some(slot) = self.entries.get_mut(&query) {
            *slot = cities;
            return;
        }

        self.order.push_back(query.clone());
        self.entries.insert(query, cities);

        if let Some(capacity) = self.capacity {
            while self.order.len() > capacity {
                if let Some(oldest) = self.order.pop_front() {
                    tracing::debug!("Evicting cached query {:?}", oldest);
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
