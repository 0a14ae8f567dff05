#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cityfill::api::{ApiError, City, CityLookup, LookupFuture, LookupOutcome};

/// Lookup with canned answers that records every query it is asked for.
#[derive(Default)]
pub struct Canned {
    answers: HashMap<String, LookupOutcome>,
    calls: Mutex<Vec<String>>,
}

impl Canned {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, cities: Vec<City>) -> Self {
        self.answers
            .insert(query.to_string(), LookupOutcome::Found(cities));
        self
    }

    pub fn failing(mut self, query: &str, error: ApiError) -> Self {
        self.answers
            .insert(query.to_string(), LookupOutcome::Failed(error));
        self
    }

    /// Answer for `query` without recording a call
    pub fn answer(&self, query: &str) -> LookupOutcome {
        self.answers
            .get(query)
            .cloned()
            .unwrap_or(LookupOutcome::Found(Vec::new()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl CityLookup for Canned {
    fn lookup(&self, query: String) -> LookupFuture {
        self.calls.lock().unwrap().push(query.clone());
        let outcome = self.answer(&query);
        Box::pin(async move { outcome })
    }
}

pub fn moscow() -> City {
    City::new("1", "Moscow", "Russia")
}

pub fn new_york() -> City {
    City::new("2", "New York", "United States of America")
}

pub fn dubai() -> City {
    City::new("3", "Dubai", "United Arab Emirates")
}
