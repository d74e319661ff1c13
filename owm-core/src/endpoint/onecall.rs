use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::{Endpoint, FailureBody},
    error::QueryError,
    model::{Accumulation, Presence, WeatherCondition},
    params::{Exclude, Lang, Units},
    query::{BuiltQuery, QueryBuilder},
};

pub const PATH: &str = "/data/2.5/onecall";

/// The one-call endpoint expects coordinates with exactly this many decimals.
const COORDINATE_DECIMALS: usize = 3;

/// Parameters for the one-call weather endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCallRequest {
    pub lat: f64,
    pub lon: f64,
    /// Blocks to leave out of the response, sent in this order.
    pub exclude: Vec<Exclude>,
    pub units: Option<Units>,
    pub lang: Option<Lang>,
}

impl OneCallRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            exclude: Vec::new(),
            units: None,
            lang: None,
        }
    }

    pub fn exclude(mut self, sections: impl IntoIterator<Item = Exclude>) -> Self {
        self.exclude.extend(sections);
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }
}

impl Endpoint for OneCallRequest {
    type Success = WeatherReport;
    type Failure = FailureBody;

    const NAME: &'static str = "onecall";

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError> {
        let exclude = (!self.exclude.is_empty()).then(|| {
            self.exclude
                .iter()
                .map(Exclude::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });

        Ok(QueryBuilder::new(base, PATH)
            .fixed_coordinate("lat", self.lat, COORDINATE_DECIMALS)?
            .fixed_coordinate("lon", self.lon, COORDINATE_DECIMALS)?
            .api_key(api_key)?
            .optional("exclude", exclude)
            .optional("units", self.units.map(|u| u.as_str()))
            .optional("lang", self.lang.as_ref().map(Lang::as_str))
            .finish())
    }
}

/// Decoded one-call body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    /// Seconds east of UTC.
    pub timezone_offset: i32,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub current: Presence<PointWeather>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub minutely: Presence<Vec<MinutelyPrecipitation>>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub hourly: Presence<Vec<PointWeather>>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub daily: Presence<Vec<DailyWeather>>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub alerts: Presence<Vec<Alert>>,
}

/// Fields shared by the current, hourly and daily blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub dt: i64,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub sunrise: Presence<i64>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub sunset: Presence<i64>,

    /// hPa
    pub pressure: i64,
    /// %
    pub humidity: i64,
    pub dew_point: f64,
    pub uvi: f64,
    /// %
    pub clouds: i64,

    /// Metres. Not reported for daily entries.
    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub visibility: Presence<i64>,

    pub wind_speed: f64,
    pub wind_deg: i64,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub wind_gust: Presence<f64>,

    /// Probability of precipitation, 0..=1. Not reported for current conditions.
    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub pop: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub rain: Presence<Accumulation>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub snow: Presence<Accumulation>,

    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// Current conditions, or one hourly forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointWeather {
    #[serde(flatten)]
    pub summary: WeatherSummary,
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    #[serde(flatten)]
    pub summary: WeatherSummary,
    pub temp: DailyTemperature,
    pub feels_like: DailyFeelsLike,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub moonrise: Presence<i64>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub moonset: Presence<i64>,

    #[serde(default, skip_serializing_if = "Presence::is_omitted")]
    pub moon_phase: Presence<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFeelsLike {
    pub day: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinutelyPrecipitation {
    pub dt: i64,
    /// mm/h
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
