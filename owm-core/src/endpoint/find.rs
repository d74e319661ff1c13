//! The undocumented `find` method of the data API: places matching a name,
//! each with a short summary of its current weather.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::Endpoint,
    error::{ApiError, ApiErrorCode, QueryError},
    model::{Accumulation, Coord, Presence, WeatherCondition},
    params::Units,
    query::{BuiltQuery, QueryBuilder},
};

pub const PATH: &str = "/data/2.5/find";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub query: String,
    pub units: Option<Units>,
}

impl FindRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            units: None,
        }
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }
}

impl Endpoint for FindRequest {
    type Success = FindReport;
    type Failure = FindFailureBody;

    const NAME: &'static str = "find";

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(QueryError::MissingField("q"));
        }

        QueryBuilder::new(base, PATH)
            .param("q", query)
            .optional("units", self.units.map(|u| u.as_str()))
            .api_key(api_key)
            .map(QueryBuilder::finish)
    }
}

/// Failure body of `find`, whose `cod` is a string (`{"cod": "400", ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FindFailureBody {
    pub cod: String,
    pub message: String,
}

impl From<FindFailureBody> for ApiError {
    fn from(body: FindFailureBody) -> Self {
        ApiError::new(ApiErrorCode::Text(body.cod), body.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindReport {
    pub cod: String,
    #[serde(default)]
    pub message: String,
    pub count: u32,
    #[serde(default)]
    pub list: Vec<FindEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindEntry {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    pub main: FindMain,
    pub dt: i64,
    pub wind: FindWind,
    pub sys: FindSys,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub rain: Presence<Accumulation>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub snow: Presence<Accumulation>,

    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FindMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FindWind {
    pub speed: f64,
    pub deg: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindSys {
    pub country: String,
}
