use foundation::{LatLng, LatLngBounds, ZoomLevel};
use itinerary::{DayNumber, PoiKind};
use serde::Serialize;

/// The POI layer currently drawn on the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePoi {
    pub day: DayNumber,
    pub kind: PoiKind,
}

/// Identity of a place: its position in the `(day, kind)` POI list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlaceRef {
    pub day: DayNumber,
    pub kind: PoiKind,
    pub index: usize,
}

impl PlaceRef {
    pub fn layer(&self) -> ActivePoi {
        ActivePoi {
            day: self.day,
            kind: self.kind,
        }
    }
}

/// Everything the user currently has selected.
///
/// Invariants maintained by [`crate::ViewStateStore`]:
/// - `selected_place` is set only while `active_poi` is set, and refers to a
///   place of that layer.
/// - `active_poi` is set only for a non-empty layer of the selected day.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub selected_day: Option<DayNumber>,
    pub route_visible: bool,
    pub active_poi: Option<ActivePoi>,
    pub selected_place: Option<PlaceRef>,
}

impl ViewState {
    /// Switches day and drops every POI selection tied to the previous one.
    pub(crate) fn select_day(&mut self, day: Option<DayNumber>) {
        self.selected_day = day;
        self.active_poi = None;
        self.selected_place = None;
    }
}

/// Camera work requested by a state transition.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum CameraEffect {
    /// Animated zoom-out, pan, zoom-in onto a day.
    FocusDay {
        day: DayNumber,
        center: LatLng,
        zoom: ZoomLevel,
    },
    /// Animated return to the default overview.
    ResetView,
    /// One-shot fit of the full route.
    FitRoute { bounds: LatLngBounds },
}

/// Result of one user event: the state before, the state after, and the
/// camera work it asks for.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub from: ViewState,
    pub to: ViewState,
    pub effect: Option<CameraEffect>,
}

impl Transition {
    pub fn unchanged(state: ViewState) -> Self {
        Self {
            from: state,
            to: state,
            effect: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.effect.is_none()
    }

    pub fn day_changed(&self) -> bool {
        self.from.selected_day != self.to.selected_day
    }
}
