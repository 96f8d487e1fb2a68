use std::path::Path;

use foundation::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

use crate::error::ItineraryError;
use crate::model::{DayEntry, DayNumber, PlaceInfo, PoiKind};
use crate::route::{RouteMarker, route_markers, route_path};
use crate::summary::TripSummary;

const BUILTIN_JSON: &str = include_str!("../data/schedule.json");

/// On-disk representation of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItineraryFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    days: Vec<DayEntry>,
}

/// Validated, immutable trip schedule plus its derived route projections.
///
/// Route markers and the route path are computed once at construction and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    title: String,
    subtitle: String,
    entries: Vec<DayEntry>,
    route_markers: Vec<RouteMarker>,
    route_path: Vec<LatLng>,
}

impl Itinerary {
    pub fn new(title: impl Into<String>, entries: Vec<DayEntry>) -> Result<Self, ItineraryError> {
        validate(&entries)?;
        Ok(Self {
            title: title.into(),
            subtitle: String::new(),
            route_markers: route_markers(&entries),
            route_path: route_path(&entries),
            entries,
        })
    }

    /// The trip bundled with the viewer.
    pub fn builtin() -> Result<Self, ItineraryError> {
        Self::from_json(BUILTIN_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ItineraryError> {
        let file: ItineraryFile = serde_json::from_str(json)?;
        let mut itinerary = Self::new(file.title, file.days)?;
        itinerary.subtitle = file.subtitle;
        Ok(itinerary)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ItineraryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ItineraryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn day(&self, day: DayNumber) -> Option<&DayEntry> {
        let index = usize::try_from(day.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }

    /// Places of `kind` for `day`; empty for unknown days.
    pub fn places(&self, day: DayNumber, kind: PoiKind) -> &[PlaceInfo] {
        match self.day(day) {
            Some(entry) => entry.places(kind),
            None => &[],
        }
    }

    pub fn route_markers(&self) -> &[RouteMarker] {
        &self.route_markers
    }

    pub fn route_path(&self) -> &[LatLng] {
        &self.route_path
    }

    pub fn route_bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.route_path.iter().copied())
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary::from_entries(&self.entries)
    }
}

fn validate(entries: &[DayEntry]) -> Result<(), ItineraryError> {
    if entries.is_empty() {
        return Err(ItineraryError::Empty);
    }

    for (expected, entry) in (1..).zip(entries) {
        if entry.day != expected {
            return Err(ItineraryError::NonContiguousDay {
                expected,
                found: entry.day,
            });
        }
        if entry.target_zoom == 0 {
            return Err(ItineraryError::ZeroZoom { day: entry.day });
        }
        if !entry.position.is_valid() {
            return Err(ItineraryError::InvalidCoordinate {
                day: entry.day,
                what: format!("day {}", entry.day),
            });
        }
        for kind in PoiKind::ALL {
            for place in entry.places(kind) {
                validate_place(entry.day, place)?;
            }
        }
    }
    Ok(())
}

fn validate_place(day: DayNumber, place: &PlaceInfo) -> Result<(), ItineraryError> {
    if !place.position.is_valid() {
        return Err(ItineraryError::InvalidCoordinate {
            day,
            what: place.name.clone(),
        });
    }
    if let Some(rating) = place.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ItineraryError::RatingOutOfRange {
                day,
                name: place.name.clone(),
                rating: rating.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Itinerary;
    use crate::error::ItineraryError;
    use crate::model::{DayEntry, PlaceInfo, PoiKind};
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    fn day(n: u32, lat: f64, lng: f64, zoom: u32) -> DayEntry {
        DayEntry::new(n, LatLng::new(lat, lng), zoom)
    }

    #[test]
    fn builtin_trip_loads() {
        let trip = Itinerary::builtin().expect("builtin dataset");
        assert_eq!(trip.len(), 14);
        assert_eq!(trip.route_path().len(), 14);
        assert_eq!(trip.day(1).map(|d| d.target_zoom), Some(13));
        assert!(trip.day(0).is_none());
        assert!(trip.day(15).is_none());
    }

    #[test]
    fn builtin_trip_merges_revisited_cities() {
        let trip = Itinerary::builtin().expect("builtin dataset");
        let labels: Vec<&str> = trip.route_markers().iter().map(|m| m.label.as_str()).collect();
        assert!(labels.contains(&"D5-6"));
        assert!(labels.contains(&"D7-8"));
        assert!(labels.contains(&"D11-14"));
        assert_eq!(labels.first(), Some(&"D1"));
    }

    #[test]
    fn builtin_summary_matches_sidebar_figures() {
        let summary = Itinerary::builtin().expect("builtin dataset").summary();
        assert_eq!(summary.days, 14);
        assert_eq!(summary.cities, 6);
        assert_eq!(summary.countries, 2);
        assert_eq!(summary.first_date.as_deref(), Some("8.15"));
        assert_eq!(summary.last_date.as_deref(), Some("8.28"));
    }

    #[test]
    fn builtin_trip_has_places_for_poi_layers() {
        let trip = Itinerary::builtin().expect("builtin dataset");
        let with_hotel = trip.entries().iter().filter(|d| d.has_places(PoiKind::Hotel)).count();
        let with_food = trip
            .entries()
            .iter()
            .filter(|d| d.has_places(PoiKind::Restaurant))
            .count();
        assert!(with_hotel > 0);
        assert!(with_food > 0);
        assert!(trip.places(99, PoiKind::Hotel).is_empty());
    }

    #[test]
    fn rejects_gaps_in_day_numbers() {
        let err = Itinerary::new("t", vec![day(1, 50.0, 14.0, 13), day(3, 49.0, 15.0, 14)])
            .unwrap_err();
        assert_eq!(
            err,
            ItineraryError::NonContiguousDay {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_empty_and_zero_zoom() {
        assert_eq!(Itinerary::new("t", vec![]).unwrap_err(), ItineraryError::Empty);
        assert_eq!(
            Itinerary::new("t", vec![day(1, 50.0, 14.0, 0)]).unwrap_err(),
            ItineraryError::ZeroZoom { day: 1 }
        );
    }

    #[test]
    fn rejects_rating_out_of_range() {
        let mut d = day(1, 50.0, 14.0, 13);
        let mut place = PlaceInfo::new("Somewhere", LatLng::new(50.0, 14.0));
        place.rating = Some(6.5);
        d.restaurants.push(place);
        assert!(matches!(
            Itinerary::new("t", vec![d]),
            Err(ItineraryError::RatingOutOfRange { day: 1, .. })
        ));
    }

    #[test]
    fn reports_malformed_json() {
        assert!(matches!(
            Itinerary::from_json("{\"days\": [{\"day\": 1}]}"),
            Err(ItineraryError::Json(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        assert!(matches!(
            Itinerary::from_path("/definitely/not/here.json"),
            Err(ItineraryError::Io { .. })
        ));
    }
}
