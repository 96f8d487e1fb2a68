use std::sync::Arc;

use itinerary::{DayEntry, DayNumber, Itinerary, PlaceInfo, PoiKind};
use thiserror::Error;
use tracing::{debug, warn};

use crate::overlays::MapOverlays;
use crate::state::{ActivePoi, CameraEffect, PlaceRef, Transition, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("day {0} is not part of the itinerary")]
    UnknownDay(DayNumber),
    #[error("day {day} has no {kind} places")]
    NoPlaces { day: DayNumber, kind: PoiKind },
    #[error("no POI layer is active")]
    NoActivePoi,
    #[error("{kind} #{index} of day {day} is not on the map")]
    PlaceNotDisplayed {
        day: DayNumber,
        kind: PoiKind,
        index: usize,
    },
}

/// Single owner of [`ViewState`].
///
/// Every operation applies its whole change in one step and returns the
/// [`Transition`]; no intermediate state is ever stored. The `try_*` variants
/// reject invalid references, the plain variants log and ignore them.
#[derive(Debug, Clone)]
pub struct ViewStateStore {
    itinerary: Arc<Itinerary>,
    state: ViewState,
}

impl ViewStateStore {
    pub fn new(itinerary: Arc<Itinerary>) -> Self {
        Self {
            itinerary,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn try_select_day(&mut self, day: Option<DayNumber>) -> Result<Transition, ViewError> {
        let effect = match day {
            Some(day) => focus(self.entry(day)?),
            None => CameraEffect::ResetView,
        };
        let mut next = self.state;
        next.select_day(day);
        Ok(self.commit(next, Some(effect)))
    }

    pub fn select_day(&mut self, day: Option<DayNumber>) -> Transition {
        self.lenient(|store| store.try_select_day(day))
    }

    /// Day-card click: selects `day`, or clears the selection if `day` is
    /// already selected.
    pub fn try_toggle_day(&mut self, day: DayNumber) -> Result<Transition, ViewError> {
        if self.state.selected_day == Some(day) {
            self.try_select_day(None)
        } else {
            self.try_select_day(Some(day))
        }
    }

    pub fn toggle_day(&mut self, day: DayNumber) -> Transition {
        self.lenient(|store| store.try_toggle_day(day))
    }

    /// Shows or hides the route overlay. Showing it asks for a fit of the
    /// whole route; hiding it needs no camera work.
    pub fn toggle_route(&mut self) -> Transition {
        let mut next = self.state;
        next.route_visible = !next.route_visible;
        let effect = if next.route_visible {
            self.itinerary
                .route_bounds()
                .map(|bounds| CameraEffect::FitRoute { bounds })
        } else {
            None
        };
        self.commit(next, effect)
    }

    /// Toggles the `(day, kind)` POI layer.
    ///
    /// When `day` is not the selected day the day is selected as part of the
    /// same transition and the layer ends up active.
    pub fn try_toggle_poi(
        &mut self,
        day: DayNumber,
        kind: PoiKind,
    ) -> Result<Transition, ViewError> {
        let entry = self.entry(day)?;
        if !entry.has_places(kind) {
            return Err(ViewError::NoPlaces { day, kind });
        }
        let layer = ActivePoi { day, kind };

        let mut next = self.state;
        let mut effect = None;
        if next.selected_day == Some(day) {
            next.selected_place = None;
            next.active_poi = if next.active_poi == Some(layer) {
                None
            } else {
                Some(layer)
            };
        } else {
            effect = Some(focus(entry));
            next.select_day(Some(day));
            next.active_poi = Some(layer);
        }
        Ok(self.commit(next, effect))
    }

    pub fn toggle_poi(&mut self, day: DayNumber, kind: PoiKind) -> Transition {
        self.lenient(|store| store.try_toggle_poi(day, kind))
    }

    /// Opens the popup for `place`, closes it when `place` is already open or
    /// `None`.
    pub fn try_select_place(&mut self, place: Option<PlaceRef>) -> Result<Transition, ViewError> {
        let mut next = self.state;
        next.selected_place = match place {
            None => None,
            Some(place) => {
                let displayed = self.state.active_poi == Some(place.layer())
                    && place.index < self.itinerary.places(place.day, place.kind).len();
                if !displayed {
                    return Err(ViewError::PlaceNotDisplayed {
                        day: place.day,
                        kind: place.kind,
                        index: place.index,
                    });
                }
                if self.state.selected_place == Some(place) {
                    None
                } else {
                    Some(place)
                }
            }
        };
        Ok(self.commit(next, None))
    }

    pub fn select_place(&mut self, place: Option<PlaceRef>) -> Transition {
        self.lenient(|store| store.try_select_place(place))
    }

    /// [`Self::try_select_place`] addressed by position in the active layer.
    pub fn try_select_active_place(
        &mut self,
        index: Option<usize>,
    ) -> Result<Transition, ViewError> {
        let place = match index {
            None => None,
            Some(index) => {
                let layer = self.state.active_poi.ok_or(ViewError::NoActivePoi)?;
                Some(PlaceRef {
                    day: layer.day,
                    kind: layer.kind,
                    index,
                })
            }
        };
        self.try_select_place(place)
    }

    pub fn select_active_place(&mut self, index: Option<usize>) -> Transition {
        self.lenient(|store| store.try_select_active_place(index))
    }

    /// Places of the active POI layer, empty when none is active.
    pub fn active_places(&self) -> &[PlaceInfo] {
        match self.state.active_poi {
            Some(layer) => self.itinerary.places(layer.day, layer.kind),
            None => &[],
        }
    }

    pub fn selected_place_info(&self) -> Option<&PlaceInfo> {
        let place = self.state.selected_place?;
        self.itinerary.places(place.day, place.kind).get(place.index)
    }

    pub fn overlays(&self) -> MapOverlays<'_> {
        MapOverlays::project(&self.state, &self.itinerary)
    }

    fn entry(&self, day: DayNumber) -> Result<&DayEntry, ViewError> {
        self.itinerary.day(day).ok_or(ViewError::UnknownDay(day))
    }

    fn commit(&mut self, next: ViewState, effect: Option<CameraEffect>) -> Transition {
        let transition = Transition {
            from: self.state,
            to: next,
            effect,
        };
        self.state = next;
        debug!(
            selected_day = ?next.selected_day,
            route_visible = next.route_visible,
            active_poi = ?next.active_poi,
            selected_place = ?next.selected_place,
            "view state updated"
        );
        transition
    }

    fn lenient(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<Transition, ViewError>,
    ) -> Transition {
        match op(self) {
            Ok(transition) => transition,
            Err(err) => {
                warn!("ignoring view event: {err}");
                Transition::unchanged(self.state)
            }
        }
    }
}

fn focus(entry: &DayEntry) -> CameraEffect {
    CameraEffect::FocusDay {
        day: entry.day,
        center: entry.position,
        zoom: entry.target_zoom,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ViewError, ViewStateStore};
    use crate::state::{ActivePoi, CameraEffect, PlaceRef, ViewState};
    use itinerary::{Itinerary, PoiKind};
    use pretty_assertions::assert_eq;

    fn store() -> ViewStateStore {
        ViewStateStore::new(Arc::new(Itinerary::builtin().expect("builtin dataset")))
    }

    #[test]
    fn deselect_is_idempotent() {
        let mut s = store();
        s.select_day(Some(4));
        s.select_day(None);
        let after_first = *s.state();
        let t = s.select_day(None);
        assert_eq!(*s.state(), after_first);
        assert_eq!(t.from, t.to);
        assert_eq!(s.state().active_poi, None);
        assert_eq!(s.state().selected_place, None);
        assert_eq!(t.effect, Some(CameraEffect::ResetView));
    }

    #[test]
    fn poi_toggle_round_trips() {
        let mut s = store();
        s.select_day(Some(2));
        s.toggle_poi(2, PoiKind::Hotel);
        assert_eq!(
            s.state().active_poi,
            Some(ActivePoi {
                day: 2,
                kind: PoiKind::Hotel
            })
        );
        let t = s.toggle_poi(2, PoiKind::Hotel);
        assert_eq!(s.state().active_poi, None);
        assert_eq!(s.state().selected_place, None);
        assert_eq!(t.effect, None);
    }

    #[test]
    fn switching_layers_on_same_day_closes_popup() {
        let mut s = store();
        s.toggle_poi(3, PoiKind::Restaurant);
        s.select_active_place(Some(1));
        assert!(s.state().selected_place.is_some());
        s.toggle_poi(3, PoiKind::Hotel);
        assert_eq!(s.state().selected_place, None);
        assert_eq!(s.state().active_poi.map(|p| p.kind), Some(PoiKind::Hotel));
    }

    #[test]
    fn selecting_another_day_clears_stale_popup() {
        let mut s = store();
        s.toggle_poi(3, PoiKind::Restaurant);
        s.select_place(Some(PlaceRef {
            day: 3,
            kind: PoiKind::Restaurant,
            index: 0,
        }));
        assert!(s.selected_place_info().is_some());

        s.select_day(Some(7));
        assert_eq!(s.state().selected_day, Some(7));
        assert_eq!(s.state().active_poi, None);
        assert_eq!(s.state().selected_place, None);
        assert!(s.selected_place_info().is_none());
    }

    #[test]
    fn cross_day_poi_toggle_is_one_transition() {
        let mut s = store();
        s.select_day(Some(2));
        let t = s.toggle_poi(5, PoiKind::Hotel);

        let expected = ViewState {
            selected_day: Some(5),
            route_visible: false,
            active_poi: Some(ActivePoi {
                day: 5,
                kind: PoiKind::Hotel,
            }),
            selected_place: None,
        };
        assert_eq!(t.to, expected);
        assert_eq!(*s.state(), expected);
        assert!(t.day_changed());
        assert!(matches!(
            t.effect,
            Some(CameraEffect::FocusDay { day: 5, zoom: 14, .. })
        ));
    }

    #[test]
    fn poi_toggle_from_no_selection_selects_day() {
        let mut s = store();
        let t = s.toggle_poi(9, PoiKind::Restaurant);
        assert_eq!(t.from.selected_day, None);
        assert_eq!(s.state().selected_day, Some(9));
        assert!(s.state().active_poi.is_some());
    }

    #[test]
    fn unknown_day_is_rejected_strictly_and_ignored_leniently() {
        let mut s = store();
        s.select_day(Some(3));
        let before = *s.state();

        assert_eq!(s.try_select_day(Some(42)), Err(ViewError::UnknownDay(42)));
        assert_eq!(*s.state(), before);

        let t = s.select_day(Some(42));
        assert!(t.is_noop());
        assert_eq!(*s.state(), before);

        assert!(s.toggle_poi(0, PoiKind::Hotel).is_noop());
    }

    #[test]
    fn empty_poi_layer_never_activates() {
        let mut s = store();
        // The departure day has neither hotel nor restaurants.
        assert_eq!(
            s.try_toggle_poi(14, PoiKind::Hotel),
            Err(ViewError::NoPlaces {
                day: 14,
                kind: PoiKind::Hotel
            })
        );
        assert_eq!(s.state().active_poi, None);
        assert_eq!(s.state().selected_day, None);
    }

    #[test]
    fn place_must_belong_to_active_layer() {
        let mut s = store();
        assert_eq!(s.try_select_active_place(Some(0)), Err(ViewError::NoActivePoi));

        s.toggle_poi(2, PoiKind::Restaurant);
        let other_day = PlaceRef {
            day: 3,
            kind: PoiKind::Restaurant,
            index: 0,
        };
        assert!(s.try_select_place(Some(other_day)).is_err());
        assert!(s.try_select_active_place(Some(99)).is_err());
        assert_eq!(s.state().selected_place, None);
    }

    #[test]
    fn selecting_same_place_twice_closes_popup() {
        let mut s = store();
        s.toggle_poi(2, PoiKind::Restaurant);
        s.select_active_place(Some(1));
        assert_eq!(s.selected_place_info().map(|p| p.name.as_str()), Some("U Fleků"));
        s.select_active_place(Some(1));
        assert_eq!(s.state().selected_place, None);
    }

    #[test]
    fn route_toggle_fits_only_when_shown() {
        let mut s = store();
        s.select_day(Some(6));
        let on = s.toggle_route();
        assert!(matches!(on.effect, Some(CameraEffect::FitRoute { .. })));
        assert!(s.state().route_visible);
        assert_eq!(s.state().selected_day, Some(6));

        let off = s.toggle_route();
        assert_eq!(off.effect, None);
        assert!(!s.state().route_visible);
    }

    #[test]
    fn card_click_toggles_selection() {
        let mut s = store();
        s.toggle_day(8);
        assert_eq!(s.state().selected_day, Some(8));
        let t = s.toggle_day(8);
        assert_eq!(s.state().selected_day, None);
        assert_eq!(t.effect, Some(CameraEffect::ResetView));
    }
}
