use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional member of an API response body.
///
/// OpenWeatherMap drops whole blocks depending on the request (`exclude`) and
/// on the location (no snow in the tropics), and some endpoints send an
/// explicit `null` instead. `Presence` keeps those cases apart so that a
/// missing accumulation is never read as `0 mm`.
///
/// Use it together with `#[serde(default, skip_serializing_if = "Presence::is_omitted")]`:
/// the `default` turns an absent key into [`Presence::Omitted`], while the
/// deserializer maps `null` to [`Presence::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Presence<T> {
    /// The key was not part of the body.
    Omitted,
    /// The key was present with a `null` value.
    Null,
    Value(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Omitted
    }
}

impl<T> Presence<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Presence::Omitted)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Presence::Null)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Presence::Value(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Presence::Value(v) => Some(v),
            Presence::Omitted | Presence::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Presence::Value(v) => Some(v),
            Presence::Omitted | Presence::Null => None,
        }
    }
}

impl<T> Presence<Vec<T>> {
    /// Entries of a sequence block, empty when the block is absent.
    pub fn entries(&self) -> &[T] {
        self.as_option().map(Vec::as_slice).unwrap_or_default()
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Presence::Value(v),
            None => Presence::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Presence<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Presence::from)
    }
}

impl<T> Serialize for Presence<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Presence::Value(v) => v.serialize(serializer),
            Presence::Omitted | Presence::Null => serializer.serialize_none(),
        }
    }
}

/// Geographic coordinates in degrees, as returned in `coord` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One entry of the `weather` array shared by the one-call and find bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Rain or snow volume in millimetres.
///
/// Point-in-time blocks report `{"1h": mm}`, daily blocks a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accumulation {
    LastHour {
        #[serde(rename = "1h")]
        one_hour: f64,
    },
    Total(f64),
}

impl Accumulation {
    pub fn millimetres(&self) -> f64 {
        match *self {
            Accumulation::LastHour { one_hour } => one_hour,
            Accumulation::Total(mm) => mm,
        }
    }
}
