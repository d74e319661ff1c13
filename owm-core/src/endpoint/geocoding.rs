//! Direct (name → coordinates) and reverse (coordinates → names) geocoding.

use std::collections::HashMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::{Endpoint, FailureBody},
    error::QueryError,
    model::Presence,
    query::{BuiltQuery, QueryBuilder},
};

pub const DIRECT_PATH: &str = "/geo/1.0/direct";
pub const REVERSE_PATH: &str = "/geo/1.0/reverse";

/// Sent when the caller asks for `limit = 0`. The API requires the parameter
/// and has no default of its own.
pub const DEFAULT_LIMIT: u32 = 5;

fn effective_limit(limit: u32) -> u32 {
    if limit == 0 { DEFAULT_LIMIT } else { limit }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectGeocodingRequest {
    pub city: String,
    pub state: String,
    /// ISO 3166 country code.
    pub country_code: String,
    /// Maximum number of matches, `0` for [`DEFAULT_LIMIT`].
    pub limit: u32,
}

impl DirectGeocodingRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// `city,state,country`, without trailing empty parts.
    fn place_query(&self) -> Result<String, QueryError> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(QueryError::MissingField("city"));
        }

        let mut parts = vec![city, self.state.trim(), self.country_code.trim()];
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        Ok(parts.join(","))
    }
}

impl Endpoint for DirectGeocodingRequest {
    type Success = Vec<Place>;
    type Failure = FailureBody;

    const NAME: &'static str = "geocoding/direct";

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError> {
        QueryBuilder::new(base, DIRECT_PATH)
            .param("q", self.place_query()?)
            .param("limit", effective_limit(self.limit).to_string())
            .api_key(api_key)
            .map(QueryBuilder::finish)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocodingRequest {
    pub lat: f64,
    pub lon: f64,
    /// Maximum number of matches, `0` for [`DEFAULT_LIMIT`].
    pub limit: u32,
}

impl ReverseGeocodingRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, limit: 0 }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Endpoint for ReverseGeocodingRequest {
    type Success = Vec<Place>;
    type Failure = FailureBody;

    const NAME: &'static str = "geocoding/reverse";

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError> {
        QueryBuilder::new(base, REVERSE_PATH)
            .coordinate("lat", self.lat)?
            .coordinate("lon", self.lon)?
            .param("limit", effective_limit(self.limit).to_string())
            .api_key(api_key)
            .map(QueryBuilder::finish)
    }
}

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,

    /// Locale code (e.g. `de`, `ascii`, `feature_name`) to localized name.
    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub local_names: Presence<HashMap<String, String>>,

    pub lat: f64,
    pub lon: f64,
    pub country: String,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub state: Presence<String>,
}

impl Place {
    pub fn local_name(&self, locale: &str) -> Option<&str> {
        self.local_names
            .as_option()
            .and_then(|names| names.get(locale))
            .map(String::as_str)
    }
}
