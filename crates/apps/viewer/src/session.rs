use std::sync::Arc;

use camera::{CameraConfig, CameraController, MapAdapter, SimulatedMap};
use itinerary::{DayNumber, Itinerary, PoiKind};
use tokio::time;
use tracing::{debug, info};
use view_state::{CameraEffect, Transition, ViewState, ViewStateStore};

use crate::script::{ScriptStep, UserEvent};

/// One open viewer: the view state plus the camera that follows it.
///
/// Every user event updates the store first; the camera effect of the
/// resulting transition is then handed to the controller, which may drop it
/// while an earlier animation is still running.
#[derive(Debug)]
pub struct Viewer {
    store: ViewStateStore,
    camera: CameraController,
}

impl Viewer {
    pub fn new(itinerary: Arc<Itinerary>, config: CameraConfig) -> Self {
        Self {
            store: ViewStateStore::new(itinerary),
            camera: CameraController::new(config),
        }
    }

    pub fn attach_map(&mut self, map: Arc<dyn MapAdapter>) {
        self.camera.attach_map(map);
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    pub fn store(&self) -> &ViewStateStore {
        &self.store
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn select_day(&mut self, day: Option<DayNumber>) -> Transition {
        self.dispatch(UserEvent::SelectDay(day))
    }

    pub fn toggle_day(&mut self, day: DayNumber) -> Transition {
        self.dispatch(UserEvent::ToggleDay(day))
    }

    pub fn toggle_route(&mut self) -> Transition {
        self.dispatch(UserEvent::ToggleRoute)
    }

    pub fn toggle_poi(&mut self, day: DayNumber, kind: PoiKind) -> Transition {
        self.dispatch(UserEvent::TogglePoi { day, kind })
    }

    pub fn select_place(&mut self, index: Option<usize>) -> Transition {
        self.dispatch(UserEvent::SelectPlace(index))
    }

    /// Must be called from within a Tokio runtime when the event may start
    /// a camera animation.
    pub fn dispatch(&mut self, event: UserEvent) -> Transition {
        let transition = match event {
            UserEvent::SelectDay(day) => self.store.select_day(day),
            UserEvent::ToggleDay(day) => self.store.toggle_day(day),
            UserEvent::ToggleRoute => self.store.toggle_route(),
            UserEvent::TogglePoi { day, kind } => self.store.toggle_poi(day, kind),
            UserEvent::SelectPlace(index) => self.store.select_active_place(index),
        };
        debug!(?event, noop = transition.is_noop(), "user event");
        if let Some(effect) = transition.effect {
            self.apply(effect);
        }
        transition
    }

    /// Waits until no camera animation is running.
    pub async fn settle(&self) {
        self.camera.wait_idle().await;
    }

    fn apply(&self, effect: CameraEffect) {
        // Animations run detached; the controller owns their bookkeeping.
        match effect {
            CameraEffect::FocusDay { day, center, zoom } => {
                if self.camera.focus(center, zoom).is_some() {
                    debug!(day, zoom, "focusing day");
                }
            }
            CameraEffect::ResetView => {
                self.camera.reset_view();
            }
            CameraEffect::FitRoute { bounds } => {
                self.camera.fit_route(bounds);
            }
        }
    }
}

/// Plays `steps` against `viewer`, using `map` for `load-map`, then waits
/// for the camera to come to rest.
pub async fn play(viewer: &mut Viewer, map: &SimulatedMap, steps: &[ScriptStep]) {
    for step in steps {
        match *step {
            ScriptStep::Event(event) => {
                viewer.dispatch(event);
            }
            ScriptStep::Wait(duration) => time::sleep(duration).await,
            ScriptStep::LoadMap => {
                info!("map loaded");
                map.load();
            }
        }
    }
    viewer.settle().await;
}
