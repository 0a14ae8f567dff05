pub mod client;
pub mod error;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Deserializer};

pub use client::GeoDbClient;
pub use error::ApiError;

/// A single city suggestion returned by the geo lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub country: String,
}

impl City {
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
        }
    }

    /// Display label used for list rows and for the confirmed input value
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// GeoDB hands out numeric ids; other mirrors use strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Result of one lookup, keeping "no matches" apart from "lookup failed"
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<City>),
    Failed(ApiError),
}

impl LookupOutcome {
    /// Cities found, or an empty slice on failure
    pub fn cities(&self) -> &[City] {
        match self {
            LookupOutcome::Found(cities) => cities,
            LookupOutcome::Failed(_) => &[],
        }
    }

    pub fn into_cities(self) -> Vec<City> {
        match self {
            LookupOutcome::Found(cities) => cities,
            LookupOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }
}

pub type LookupFuture = Pin<Box<dyn Future<Output = LookupOutcome> + Send>>;

/// Anything that can resolve a name prefix into city suggestions
pub trait CityLookup: Send + Sync {
    /// Look up cities whose name starts with `query`.
    /// Implementations must never panic on I/O failures; they report them
    /// as [`LookupOutcome::Failed`].
    fn lookup(&self, query: String) -> LookupFuture;
}
