use foundation::LatLng;
use itinerary::{DayNumber, Itinerary, PlaceInfo, RouteMarker};
use serde::Serialize;

use crate::state::{PlaceRef, ViewState};

/// Pin for the selected day, labelled with its city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMarker<'a> {
    pub day: DayNumber,
    pub position: LatLng,
    pub label: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay<'a> {
    pub path: &'a [LatLng],
    pub markers: &'a [RouteMarker],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiMarker<'a> {
    pub place_ref: PlaceRef,
    pub place: &'a PlaceInfo,
}

/// What the map should draw for a given [`ViewState`]. Pure projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapOverlays<'a> {
    /// Hidden while the route overlay is shown.
    pub day_marker: Option<DayMarker<'a>>,
    pub route: Option<RouteOverlay<'a>>,
    pub poi_markers: Vec<PoiMarker<'a>>,
    pub popup: Option<PoiMarker<'a>>,
}

impl<'a> MapOverlays<'a> {
    pub fn project(state: &ViewState, itinerary: &'a Itinerary) -> Self {
        let day_marker = if state.route_visible {
            None
        } else {
            state
                .selected_day
                .and_then(|day| itinerary.day(day))
                .map(|entry| DayMarker {
                    day: entry.day,
                    position: entry.position,
                    label: &entry.city,
                })
        };

        let route = state.route_visible.then(|| RouteOverlay {
            path: itinerary.route_path(),
            markers: itinerary.route_markers(),
        });

        let poi_markers = match state.active_poi {
            Some(layer) => itinerary
                .places(layer.day, layer.kind)
                .iter()
                .enumerate()
                .map(|(index, place)| PoiMarker {
                    place_ref: PlaceRef {
                        day: layer.day,
                        kind: layer.kind,
                        index,
                    },
                    place,
                })
                .collect(),
            None => Vec::new(),
        };

        let popup = state.selected_place.and_then(|place_ref| {
            poi_markers
                .iter()
                .find(|marker| marker.place_ref == place_ref)
                .cloned()
        });

        Self {
            day_marker,
            route,
            poi_markers,
            popup,
        }
    }
}
