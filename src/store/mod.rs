pub mod cache;

use std::sync::Arc;

use crate::api::{ApiError, City, CityLookup, LookupFuture, LookupOutcome};
use crate::config::SuggestionsConfig;
use cache::QueryCache;

/// What the synchronous half of a fetch decided to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Query too short: suggestions cleared, nothing to fetch
    Cleared,
    /// Served from cache
    Cached,
    /// Needs a network lookup; hand the result back to [`SuggestionStore::complete`]
    Request { seq: u64, query: String },
}

/// Owns the current suggestion list and the query cache, and mediates
/// between the input component and the city lookup.
pub struct SuggestionStore {
    lookup: Arc<dyn CityLookup>,
    cities: Vec<City>,
    cache: QueryCache,
    min_query_len: usize,
    discard_stale: bool,
    /// Sequence number of the most recent state change; completions tagged
    /// with anything older are stale
    latest_seq: u64,
    last_failure: Option<ApiError>,
}

impl SuggestionStore {
    pub fn new(lookup: Arc<dyn CityLookup>, config: &SuggestionsConfig) -> Self {
        Self {
            lookup,
            cities: Vec::new(),
            cache: QueryCache::with_capacity(config.cache_capacity),
            min_query_len: config.min_query_len,
            discard_stale: config.discard_stale,
            latest_seq: 0,
            last_failure: None,
        }
    }

    /// Current suggestions
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Failure behind the current (empty) list, if the last lookup failed
    pub fn last_failure(&self) -> Option<&ApiError> {
        self.last_failure.as_ref()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Fetch suggestions for `query` and wait for them.
    pub async fn fetch_city_suggestions(&mut self, query: &str) {
        if let FetchPlan::Request { seq, query } = self.begin(query) {
            let outcome = self.lookup(query.clone()).await;
            self.complete(seq, query, outcome);
        }
    }

    /// Run the length gate and the cache lookup for `query`.
    ///
    /// The length is measured on the raw input; the cache key and the
    /// outgoing query are the trimmed input.
    pub fn begin(&mut self, query: &str) -> FetchPlan {
        if query.chars().count() < self.min_query_len {
            self.cities.clear();
            self.last_failure = None;
            self.supersede();
            return FetchPlan::Cleared;
        }

        let trimmed = query.trim();
        if let Some(hit) = self.cache.get(trimmed) {
            tracing::debug!("Cache hit for {:?}", trimmed);
            self.cities = hit.to_vec();
            self.last_failure = None;
            self.supersede();
            return FetchPlan::Cached;
        }

        tracing::debug!("Cache miss for {:?}", trimmed);
        // Rows for the previous input must not stay pickable while waiting
        self.cities.clear();
        self.last_failure = None;
        self.latest_seq += 1;
        FetchPlan::Request {
            seq: self.latest_seq,
            query: trimmed.to_string(),
        }
    }

    /// Start the network lookup for a [`FetchPlan::Request`].
    pub fn lookup(&self, query: String) -> LookupFuture {
        self.lookup.lookup(query)
    }

    /// Record the outcome of request `seq` for `query`.
    ///
    /// The result is always cached (failures as an empty list). Returns
    /// whether the displayed suggestions were replaced.
    pub fn complete(&mut self, seq: u64, query: String, outcome: LookupOutcome) -> bool {
        self.cache.insert(query.clone(), outcome.cities().to_vec());

        if self.discard_stale && seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale results for {:?} (seq {}, latest {})",
                query,
                seq,
                self.latest_seq
            );
            return false;
        }

        match outcome {
            LookupOutcome::Found(cities) => {
                self.cities = cities;
                self.last_failure = None;
            }
            LookupOutcome::Failed(e) => {
                self.cities.clear();
                self.last_failure = Some(e);
            }
        }
        true
    }

    /// Empty the suggestion list, keeping the cache.
    pub fn clear(&mut self) {
        self.cities.clear();
        self.supersede();
    }

    // Any request still in flight no longer matches the input.
    fn supersede(&mut self) {
        self.latest_seq += 1;
    }
}
