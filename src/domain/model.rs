use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got \"{}\"", s))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude \"{}\": {}", lat.trim(), e))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude \"{}\": {}", lng.trim(), e))?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
        }
    }
}

/// What joins the `key` parameter to the rest of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySeparator {
    #[default]
    Ampersand,
    /// `...&mode=driving?key=...`, as the Android client sent it.
    Legacy,
}

impl KeySeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySeparator::Ampersand => "&",
            KeySeparator::Legacy => "?",
        }
    }
}

/// How points of consecutive legs end up in the flattened path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegPolicy {
    /// Every leg is appended to the same buffer.
    #[default]
    Accumulate,
    /// Each leg starts a fresh buffer, so only the final leg is kept.
    RestartPerLeg,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub travel_mode: TravelMode,
    pub units: Units,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Driving,
            units: Units::Imperial,
        }
    }
}

/// A provider quantity: display text plus the raw value (metres or seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distance {
    pub text: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub distance: Distance,
    pub duration: Option<Distance>,
    pub instructions: Option<String>,
    /// `None` when the step carried no polyline.
    pub points: Option<Vec<Coordinate>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leg {
    pub distance: Option<Distance>,
    pub duration: Option<Distance>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    pub steps: Vec<Step>,
}

/// The first route of a directions response, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRoute {
    pub status: Option<String>,
    pub summary: Option<String>,
    pub legs: Vec<Leg>,
}

/// What the map draws: one continuous line and a distance caption.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlattenedPath {
    pub points: Vec<Coordinate>,
    pub distance_label: String,
}
