use foundation::{LatLng, ZoomLevel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1-based day index within an itinerary.
pub type DayNumber = u32;

/// Which point-of-interest layer a place belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    Hotel,
    Restaurant,
}

impl PoiKind {
    pub const ALL: [PoiKind; 2] = [PoiKind::Hotel, PoiKind::Restaurant];

    pub fn as_str(self) -> &'static str {
        match self {
            PoiKind::Hotel => "hotel",
            PoiKind::Restaurant => "restaurant",
        }
    }
}

impl std::fmt::Display for PoiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown POI kind '{0}' (expected 'hotel' or 'restaurant')")]
pub struct UnknownPoiKind(pub String);

impl std::str::FromStr for PoiKind {
    type Err = UnknownPoiKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(PoiKind::Hotel),
            "restaurant" => Ok(PoiKind::Restaurant),
            other => Err(UnknownPoiKind(other.to_string())),
        }
    }
}

/// A named place shown on the map for a day (lodging or dining).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub name: String,
    #[serde(flatten)]
    pub position: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0..=5, fractional values allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl PlaceInfo {
    pub fn new(name: impl Into<String>, position: LatLng) -> Self {
        Self {
            name: name.into(),
            position,
            address: None,
            description: None,
            rating: None,
        }
    }

    /// Five-slot star string, e.g. `★★★★☆` for 4.6.
    pub fn star_rating(&self) -> Option<String> {
        let rating = self.rating?;
        let filled = (rating.floor().clamp(0.0, 5.0)) as usize;
        Some(format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)))
    }
}

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub day: DayNumber,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weekday: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(flatten)]
    pub position: LatLng,
    #[serde(rename = "zoom")]
    pub target_zoom: ZoomLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub transport: String,
    #[serde(default)]
    pub activities: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<PlaceInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restaurants: Vec<PlaceInfo>,
}

impl DayEntry {
    pub fn new(day: DayNumber, position: LatLng, target_zoom: ZoomLevel) -> Self {
        Self {
            day,
            date: String::new(),
            weekday: String::new(),
            title: String::new(),
            city: String::new(),
            country: String::new(),
            position,
            target_zoom,
            image: None,
            transport: String::new(),
            activities: String::new(),
            hotel: None,
            restaurants: Vec::new(),
        }
    }

    /// Places of `kind` for this day: the hotel (zero or one) or the
    /// restaurants in listed order.
    pub fn places(&self, kind: PoiKind) -> &[PlaceInfo] {
        match kind {
            PoiKind::Hotel => self.hotel.as_slice(),
            PoiKind::Restaurant => &self.restaurants,
        }
    }

    pub fn has_places(&self, kind: PoiKind) -> bool {
        !self.places(kind).is_empty()
    }
}
