//! Fixed vocabularies accepted by the API's `units`, `exclude` and `lang` parameters.

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

/// Measurement system used by the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Standard, Units::Metric, Units::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Standard | Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        Units::all()
            .iter()
            .copied()
            .find(|u| u.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown units '{value}'. Supported units: standard, metric, imperial."
                )
            })
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// A block of the one-call response that can be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclude {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

impl Exclude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclude::Current => "current",
            Exclude::Minutely => "minutely",
            Exclude::Hourly => "hourly",
            Exclude::Daily => "daily",
            Exclude::Alerts => "alerts",
        }
    }

    pub const fn all() -> &'static [Exclude] {
        &[
            Exclude::Current,
            Exclude::Minutely,
            Exclude::Hourly,
            Exclude::Daily,
            Exclude::Alerts,
        ]
    }
}

impl fmt::Display for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Exclude {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        Exclude::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown section '{value}'. Sections that can be excluded: \
                     current, minutely, hourly, daily, alerts."
                )
            })
    }
}

impl FromStr for Exclude {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exclude::try_from(s)
    }
}

/// Language codes documented by OpenWeatherMap, with their English names.
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("al", "Albanian"),
    ("ar", "Arabic"),
    ("az", "Azerbaijani"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("cz", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("eu", "Basque"),
    ("fa", "Persian (Farsi)"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kr", "Korean"),
    ("la", "Latvian"),
    ("lt", "Lithuanian"),
    ("mk", "Macedonian"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt_br", "Português Brasil"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("se", "Swedish"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sp", "Spanish"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("ua", "Ukrainian"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh_cn", "Chinese Simplified"),
    ("zh_tw", "Chinese Traditional"),
    ("zu", "Zulu"),
];

/// Response language, e.g. `en` or `pt_br`.
///
/// Any code is accepted so that languages added upstream keep working;
/// [`Lang::is_known`] checks against [`KNOWN_LANGUAGES`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_LANGUAGES.iter().any(|(code, _)| *code == self.0)
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::new("en")
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Lang {
    fn from(value: &str) -> Self {
        Lang::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!("Metric".parse::<Units>().unwrap(), Units::Metric);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn exclude_as_str_roundtrip() {
        for section in Exclude::all() {
            assert_eq!(Exclude::try_from(section.as_str()).unwrap(), *section);
        }
        assert!(Exclude::try_from("weekly").is_err());
    }

    #[test]
    fn lang_is_normalised() {
        let lang = Lang::new(" PT_BR ");
        assert_eq!(lang.as_str(), "pt_br");
        assert!(lang.is_known());
        assert!(!Lang::new("xx").is_known());
    }
}
