//! URL construction shared by all endpoints.

use std::fmt;

use reqwest::Url;

use crate::error::QueryError;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const API_KEY_PARAM: &str = "appid";

/// A complete request URL: base, endpoint path and query parameters.
///
/// The `Display` form masks the API key so the value can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    url: Url,
}

impl BuiltQuery {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.url.query_pairs().any(|(k, _)| k == key)
    }

    /// Decoded parameters in the order they appear in the URL.
    pub fn params(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn redacted(&self) -> Url {
        let mut url = self.url.clone();
        let pairs = self.params();
        url.query_pairs_mut().clear().extend_pairs(pairs.iter().map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.as_str(), "***")
            } else {
                (k.as_str(), v.as_str())
            }
        }));
        url
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

/// Parse and check a base URL such as [`DEFAULT_BASE_URL`].
pub fn parse_base_url(raw: &str) -> Result<Url, QueryError> {
    let url = Url::parse(raw).map_err(|e| QueryError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(QueryError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http or https URL".to_string(),
        });
    }

    Ok(url)
}

/// Incrementally appends parameters onto `base + path`.
///
/// Optional values are skipped when `None` or empty, which leaves the API to
/// apply its own default.
#[derive(Debug)]
pub(crate) struct QueryBuilder {
    url: Url,
}

impl QueryBuilder {
    pub(crate) fn new(base: &Url, path: &str) -> Self {
        let mut url = base.clone();
        let prefix = base.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        url.set_fragment(None);
        Self { url }
    }

    pub(crate) fn param(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.url.query_pairs_mut().append_pair(key, value.as_ref());
        self
    }

    pub(crate) fn optional<S: AsRef<str>>(self, key: &str, value: Option<S>) -> Self {
        match value {
            Some(v) if !v.as_ref().is_empty() => self.param(key, v),
            _ => self,
        }
    }

    /// Coordinate in its shortest round-trippable form.
    pub(crate) fn coordinate(self, key: &'static str, value: f64) -> Result<Self, QueryError> {
        let value = finite(key, value)?;
        Ok(self.param(key, format_decimal(value)))
    }

    /// Coordinate with a fixed number of decimals.
    pub(crate) fn fixed_coordinate(
        self,
        key: &'static str,
        value: f64,
        decimals: usize,
    ) -> Result<Self, QueryError> {
        let value = finite(key, value)?;
        Ok(self.param(key, format!("{value:.decimals$}")))
    }

    pub(crate) fn api_key(self, api_key: &str) -> Result<Self, QueryError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(QueryError::MissingApiKey);
        }
        Ok(self.param(API_KEY_PARAM, api_key))
    }

    pub(crate) fn finish(self) -> BuiltQuery {
        BuiltQuery { url: self.url }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, QueryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QueryError::NonFiniteCoordinate { field, value })
    }
}

/// Shortest decimal that parses back to the same `f64`, never in exponent form.
pub(crate) fn format_decimal(value: f64) -> String {
    value.to_string()
}
