//! Service endpoints and query strings.

use std::fmt;

/// One of the five NS resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Departures,
    Stations,
    Disruptions,
    Fares,
    TripRecommendations,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Departures,
        Endpoint::Stations,
        Endpoint::Disruptions,
        Endpoint::Fares,
        Endpoint::TripRecommendations,
    ];

    /// Path below the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Departures => "/ns-api-avt",
            Endpoint::Stations => "/ns-api-stations-v2",
            Endpoint::Disruptions => "/ns-api-storingen",
            Endpoint::Fares => "/ns-api-prijzen-v3",
            Endpoint::TripRecommendations => "/ns-api-treinplanner",
        }
    }

    /// File stem used by the fixture gateway, e.g. `stations` for `stations.xml`.
    pub fn fixture_name(self) -> &'static str {
        match self {
            Endpoint::Departures => "departures",
            Endpoint::Stations => "stations",
            Endpoint::Disruptions => "disruptions",
            Endpoint::Fares => "fares",
            Endpoint::TripRecommendations => "trip_recommendations",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fixture_name())
    }
}

/// Ordered query options for one request.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pairs: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value for `key`.
    pub fn insert(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Set an option if `value` is present.
    pub fn insert_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder form of [`QueryOptions::insert`].
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `?k1=v1&k2=v2`.
    ///
    /// Values are written as given, without percent-encoding; callers must
    /// escape `&`, `=` and `#` themselves. No options encode to a bare `?`.
    pub fn encode(&self) -> String {
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}
