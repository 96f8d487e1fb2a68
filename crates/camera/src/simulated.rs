use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use foundation::{Insets, LatLng, LatLngBounds, ZoomLevel};
use parking_lot::Mutex;
use serde::Serialize;

use crate::adapter::{MapAdapter, SubscriptionHandle, ZoomHandler};

/// A camera command as received by [`SimulatedMap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    SetZoom { level: ZoomLevel },
    PanTo { center: LatLng },
    FitBounds { bounds: LatLngBounds, insets: Insets },
}

#[derive(Debug)]
struct Camera {
    loaded: bool,
    zoom: Option<ZoomLevel>,
    center: LatLng,
    min_zoom: ZoomLevel,
    max_zoom: ZoomLevel,
    log: Vec<MapCommand>,
}

/// In-process map widget.
///
/// Behaves like a web map as far as the camera is concerned: zoom requests are
/// clamped to the allowed range, the zoom-changed event fires synchronously
/// and only when the level actually changed, and every call is ignored until
/// the widget is loaded. Accepted commands are kept in a log.
pub struct SimulatedMap {
    camera: Mutex<Camera>,
    handlers: Mutex<BTreeMap<SubscriptionHandle, Arc<dyn Fn() + Send + Sync>>>,
    next_handle: AtomicU64,
}

impl SimulatedMap {
    pub fn new(center: LatLng, zoom: ZoomLevel) -> Self {
        Self::build(true, Some(zoom), center)
    }

    /// A widget that has not reported a zoom level yet.
    pub fn without_zoom(center: LatLng) -> Self {
        Self::build(true, None, center)
    }

    /// A widget still loading; call [`SimulatedMap::load`] to make it usable.
    pub fn unloaded(center: LatLng, zoom: ZoomLevel) -> Self {
        Self::build(false, Some(zoom), center)
    }

    fn build(loaded: bool, zoom: Option<ZoomLevel>, center: LatLng) -> Self {
        Self {
            camera: Mutex::new(Camera {
                loaded,
                zoom,
                center,
                min_zoom: 0,
                max_zoom: 22,
                log: Vec::new(),
            }),
            handlers: Mutex::new(BTreeMap::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn with_zoom_range(self, min_zoom: ZoomLevel, max_zoom: ZoomLevel) -> Self {
        {
            let mut camera = self.camera.lock();
            camera.min_zoom = min_zoom;
            camera.max_zoom = max_zoom.max(min_zoom);
        }
        self
    }

    pub fn load(&self) {
        self.camera.lock().loaded = true;
    }

    pub fn unload(&self) {
        self.camera.lock().loaded = false;
    }

    pub fn current_zoom(&self) -> Option<ZoomLevel> {
        self.camera.lock().zoom
    }

    pub fn center(&self) -> LatLng {
        self.camera.lock().center
    }

    pub fn commands(&self) -> Vec<MapCommand> {
        self.camera.lock().log.clone()
    }

    pub fn take_commands(&self) -> Vec<MapCommand> {
        std::mem::take(&mut self.camera.lock().log)
    }

    /// Requested zoom levels in order.
    pub fn zoom_trace(&self) -> Vec<ZoomLevel> {
        self.camera
            .lock()
            .log
            .iter()
            .filter_map(|cmd| match cmd {
                MapCommand::SetZoom { level } => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// Handlers run without any lock held so they may call back into the map.
    fn fire_zoom_changed(&self) {
        let handlers: Vec<_> = self.handlers.lock().values().cloned().collect();
        for handler in handlers {
            handler();
        }
    }
}

impl MapAdapter for SimulatedMap {
    fn is_loaded(&self) -> bool {
        self.camera.lock().loaded
    }

    fn zoom(&self) -> Option<ZoomLevel> {
        let camera = self.camera.lock();
        if camera.loaded { camera.zoom } else { None }
    }

    fn set_zoom(&self, level: ZoomLevel) {
        let changed = {
            let mut camera = self.camera.lock();
            if !camera.loaded {
                return;
            }
            camera.log.push(MapCommand::SetZoom { level });
            let clamped = level.clamp(camera.min_zoom, camera.max_zoom);
            let changed = camera.zoom != Some(clamped);
            camera.zoom = Some(clamped);
            changed
        };
        if changed {
            self.fire_zoom_changed();
        }
    }

    fn pan_to(&self, center: LatLng) {
        let mut camera = self.camera.lock();
        if !camera.loaded {
            return;
        }
        camera.log.push(MapCommand::PanTo { center });
        camera.center = center;
    }

    /// Recenters on the box; the zoom level is left as is.
    fn fit_bounds(&self, bounds: LatLngBounds, insets: Insets) {
        let mut camera = self.camera.lock();
        if !camera.loaded {
            return;
        }
        camera.log.push(MapCommand::FitBounds { bounds, insets });
        camera.center = bounds.center();
    }

    fn on_zoom_changed(&self, handler: ZoomHandler) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().insert(handle, Arc::from(handler));
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.handlers.lock().remove(&handle);
    }
}

impl std::fmt::Debug for SimulatedMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedMap")
            .field("camera", &*self.camera.lock())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
