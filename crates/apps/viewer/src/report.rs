use camera::{CameraStats, MapCommand, SimulatedMap};
use itinerary::TripSummary;
use serde::Serialize;
use view_state::{MapOverlays, ViewState};

use crate::session::Viewer;

/// End-of-run snapshot printed by `itinerary-viewer`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub summary: TripSummary,
    pub state: ViewState,
    pub overlays: MapOverlays<'a>,
    pub camera: CameraStats,
    pub commands: Vec<MapCommand>,
}

impl<'a> Report<'a> {
    pub fn new(viewer: &'a Viewer, map: &SimulatedMap) -> Self {
        let store = viewer.store();
        let itinerary = store.itinerary();
        Self {
            title: itinerary.title(),
            subtitle: itinerary.subtitle(),
            summary: itinerary.summary(),
            state: *store.state(),
            overlays: store.overlays(),
            camera: viewer.camera().stats(),
            commands: map.commands(),
        }
    }
}
