use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::{Endpoint, FailureBody},
    error::QueryError,
    model::Coord,
    query::{BuiltQuery, QueryBuilder},
};

pub const PATH: &str = "/data/2.5/air_pollution";

/// Parameters for the air pollution endpoint. `start`/`end` bound the
/// sampled period and are sent as UNIX timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AirPollutionRequest {
    pub lat: f64,
    pub lon: f64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl AirPollutionRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            start: None,
            end: None,
        }
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

impl Endpoint for AirPollutionRequest {
    type Success = AirPollutionReport;
    type Failure = FailureBody;

    const NAME: &'static str = "air_pollution";

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError> {
        QueryBuilder::new(base, PATH)
            .coordinate("lat", self.lat)?
            .coordinate("lon", self.lon)?
            .optional("start", self.start.map(|t| t.timestamp().to_string()))
            .optional("end", self.end.map(|t| t.timestamp().to_string()))
            .api_key(api_key)
            .map(QueryBuilder::finish)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirPollutionReport {
    pub coord: Coord,
    #[serde(default)]
    pub list: Vec<PollutionSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionSample {
    pub dt: i64,
    pub main: AirQuality,
    pub components: Components,
}

impl PollutionSample {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

/// Air quality index, 1 (good) to 5 (very poor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u8,
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DEFAULT_BASE_URL, parse_base_url};

    fn build(req: &AirPollutionRequest) -> BuiltQuery {
        req.build(&parse_base_url(DEFAULT_BASE_URL).unwrap(), "KEY").unwrap()
    }

    #[test]
    fn without_period_only_coordinates_and_key_are_sent() {
        let query = build(&AirPollutionRequest::new(45.0, 7.0));

        let mut keys: Vec<String> = query.params().into_iter().map(|(k, _)| k).collect();
        keys.sort();
        assert_eq!(keys, ["appid", "lat", "lon"]);
        assert_eq!(query.param("lat").as_deref(), Some("45"));
        assert_eq!(query.param("lon").as_deref(), Some("7"));
    }

    #[test]
    fn period_is_sent_as_unix_timestamps() {
        let start = DateTime::from_timestamp(1_606_223_802, 0).unwrap();
        let end = DateTime::from_timestamp(1_606_482_999, 0).unwrap();
        let query = build(&AirPollutionRequest::new(50.0, 50.0).between(start, end));

        assert_eq!(query.path(), PATH);
        assert_eq!(query.param("start").as_deref(), Some("1606223802"));
        assert_eq!(query.param("end").as_deref(), Some("1606482999"));
    }

    #[test]
    fn decodes_samples_in_order() {
        let body = r#"{
            "coord": {"lon": 7.0, "lat": 45.0},
            "list": [
                {"dt": 1606147200, "main": {"aqi": 4},
                 "components": {"co": 203.609, "no": 0, "no2": 0.396, "o3": 75.102,
                                "so2": 0.648, "pm2_5": 23.253, "pm10": 92.214, "nh3": 0.117}},
                {"dt": 1606150800, "main": {"aqi": 2},
                 "components": {"co": 200.1, "no": 0.1, "no2": 0.5, "o3": 70.0,
                                "so2": 0.6, "pm2_5": 12.0, "pm10": 30.0, "nh3": 0.2}}
            ]
        }"#;
        let report: AirPollutionReport = serde_json::from_str(body).unwrap();

        assert_eq!(report.coord, Coord { lat: 45.0, lon: 7.0 });
        assert_eq!(report.list.len(), 2);
        assert_eq!(report.list[0].main.aqi, 4);
        assert_eq!(report.list[0].components.pm2_5, 23.253);
        assert_eq!(report.list[1].main.aqi, 2);
        assert_eq!(
            report.list[0].observed_at().map(|t| t.timestamp()),
            Some(1_606_147_200)
        );
    }
}
