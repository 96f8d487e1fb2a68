use std::sync::Arc;

use foundation::{LatLng, LatLngBounds, ZoomLevel};
use parking_lot::Mutex;
use runtime::busy::{BusyFlag, BusyGuard};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::adapter::MapAdapter;
use crate::config::CameraConfig;
use crate::zoom::{AbandonReason, ensure_loaded, smooth_zoom};

/// How an animated camera sequence ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum AnimationOutcome {
    Completed { zoom_steps: u32 },
    Abandoned(AbandonReason),
}

impl From<Result<u32, AbandonReason>> for AnimationOutcome {
    fn from(result: Result<u32, AbandonReason>) -> Self {
        match result {
            Ok(zoom_steps) => AnimationOutcome::Completed { zoom_steps },
            Err(reason) => AnimationOutcome::Abandoned(reason),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CameraStats {
    pub sequences_started: u64,
    pub sequences_completed: u64,
    pub sequences_abandoned: u64,
    /// Requests that arrived while a sequence was running.
    pub requests_dropped: u64,
    /// Requests made while no loaded map was attached.
    pub requests_without_map: u64,
    /// Zoom levels requested by completed sequences.
    pub zoom_steps: u64,
    pub route_fits: u64,
}

/// Drives the map camera in response to view changes.
///
/// Animated sequences (day focus, reset) are serialized by a single busy flag:
/// a request made while one runs is dropped, never queued. Route fits are
/// one-shot commands and bypass the flag. Without a loaded map every request
/// is a no-op.
///
/// Sequences run as Tokio tasks, so the animated requests must be made from
/// within a Tokio runtime.
#[derive(Clone)]
pub struct CameraController {
    map: Option<Arc<dyn MapAdapter>>,
    config: Arc<CameraConfig>,
    busy: BusyFlag,
    stats: Arc<Mutex<CameraStats>>,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            map: None,
            config: Arc::new(config),
            busy: BusyFlag::new(),
            stats: Arc::new(Mutex::new(CameraStats::default())),
        }
    }

    pub fn attach_map(&mut self, map: Arc<dyn MapAdapter>) {
        self.map = Some(map);
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Resolves once no sequence is running.
    pub async fn wait_idle(&self) {
        self.busy.wait_idle().await;
    }

    pub fn stats(&self) -> CameraStats {
        *self.stats.lock()
    }

    /// Zooms out to overview level, pans to `center`, then zooms in to `zoom`.
    ///
    /// Returns `None` when the request was dropped (busy, or no map).
    pub fn focus(&self, center: LatLng, zoom: ZoomLevel) -> Option<JoinHandle<AnimationOutcome>> {
        let (map, guard) = self.begin("focus")?;
        let config = Arc::clone(&self.config);
        let stats = Arc::clone(&self.stats);
        Some(tokio::spawn(async move {
            let _guard = guard;
            let outcome = focus_sequence(map.as_ref(), center, zoom, &config).await.into();
            finish(&stats, "focus", outcome);
            outcome
        }))
    }

    /// Zooms to the default level, then pans to the default center.
    pub fn reset_view(&self) -> Option<JoinHandle<AnimationOutcome>> {
        let (map, guard) = self.begin("reset")?;
        let config = Arc::clone(&self.config);
        let stats = Arc::clone(&self.stats);
        Some(tokio::spawn(async move {
            let _guard = guard;
            let outcome = reset_sequence(map.as_ref(), &config).await.into();
            finish(&stats, "reset", outcome);
            outcome
        }))
    }

    /// Fits `bounds` with the configured route insets. Not subject to the busy
    /// flag. Returns `false` when no loaded map is attached.
    pub fn fit_route(&self, bounds: LatLngBounds) -> bool {
        let Some(map) = self.loaded_map() else {
            self.stats.lock().requests_without_map += 1;
            debug!("no map loaded; route fit skipped");
            return false;
        };
        map.fit_bounds(bounds, self.config.route_fit_insets);
        self.stats.lock().route_fits += 1;
        debug!(?bounds, "route fit");
        true
    }

    fn loaded_map(&self) -> Option<Arc<dyn MapAdapter>> {
        self.map.as_ref().filter(|map| map.is_loaded()).cloned()
    }

    fn begin(&self, what: &'static str) -> Option<(Arc<dyn MapAdapter>, BusyGuard)> {
        let Some(map) = self.loaded_map() else {
            self.stats.lock().requests_without_map += 1;
            debug!("no map loaded; camera {what} skipped");
            return None;
        };
        let Some(guard) = self.busy.try_acquire() else {
            self.stats.lock().requests_dropped += 1;
            debug!("camera busy; {what} request dropped");
            return None;
        };
        self.stats.lock().sequences_started += 1;
        info!("camera {what} started");
        Some((map, guard))
    }
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("has_map", &self.map.is_some())
            .field("busy", &self.is_busy())
            .field("config", &self.config)
            .finish()
    }
}

async fn focus_sequence(
    map: &dyn MapAdapter,
    center: LatLng,
    target_zoom: ZoomLevel,
    config: &CameraConfig,
) -> Result<u32, AbandonReason> {
    ensure_loaded(map)?;
    let start = map.zoom().unwrap_or(config.default_zoom);
    let overview = start.min(target_zoom).min(config.overview_zoom_cap);

    let mut steps = smooth_zoom(map, overview, config).await?;
    ensure_loaded(map)?;
    map.pan_to(center);
    time::sleep(config.pan_settle).await;
    steps += smooth_zoom(map, target_zoom, config).await?;
    Ok(steps)
}

async fn reset_sequence(map: &dyn MapAdapter, config: &CameraConfig) -> Result<u32, AbandonReason> {
    let steps = smooth_zoom(map, config.default_zoom, config).await?;
    ensure_loaded(map)?;
    map.pan_to(config.default_center);
    Ok(steps)
}

fn finish(stats: &Mutex<CameraStats>, what: &'static str, outcome: AnimationOutcome) {
    let mut stats = stats.lock();
    match outcome {
        AnimationOutcome::Completed { zoom_steps } => {
            stats.sequences_completed += 1;
            stats.zoom_steps += u64::from(zoom_steps);
            info!(zoom_steps, "camera {what} finished");
        }
        AnimationOutcome::Abandoned(reason) => {
            stats.sequences_abandoned += 1;
            warn!(?reason, "camera {what} abandoned");
        }
    }
}
