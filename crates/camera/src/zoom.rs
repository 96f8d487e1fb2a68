use foundation::ZoomLevel;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time;
use tracing::debug;

use crate::adapter::{MapAdapter, ZoomSubscription};
use crate::config::CameraConfig;

/// Why a camera sequence stopped short of its target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum AbandonReason {
    /// The widget went away (or never loaded) mid-sequence.
    WidgetUnavailable,
    /// The widget did not confirm a requested zoom change in time, e.g.
    /// because the level is outside the range it allows.
    ZoomEventTimeout { at: ZoomLevel, target: ZoomLevel },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

impl Direction {
    fn step(self, level: ZoomLevel) -> ZoomLevel {
        match self {
            Direction::In => level.saturating_add(1),
            Direction::Out => level.saturating_sub(1),
        }
    }

    fn short_of(self, level: ZoomLevel, target: ZoomLevel) -> bool {
        match self {
            Direction::In => level < target,
            Direction::Out => level > target,
        }
    }
}

/// Moves the widget's zoom to `target` one level at a time.
///
/// Each level is requested only after the widget confirmed the previous one
/// through its zoom-changed event, followed by `config.step_settle`. The
/// first step is issued immediately. Returns the number of levels requested;
/// zero (with no delay) when the widget is already at `target`.
pub async fn smooth_zoom(
    map: &dyn MapAdapter,
    target: ZoomLevel,
    config: &CameraConfig,
) -> Result<u32, AbandonReason> {
    ensure_loaded(map)?;
    let start = map.zoom().unwrap_or(config.default_zoom);
    if start == target {
        return Ok(0);
    }
    let direction = if target > start {
        Direction::In
    } else {
        Direction::Out
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let _subscription = ZoomSubscription::new(
        map,
        Box::new(move || {
            let _ = tx.send(());
        }),
    );

    let mut level = start;
    let mut steps = 0u32;
    loop {
        // Only confirmations for the request below count.
        while rx.try_recv().is_ok() {}

        let next = direction.step(level);
        debug!(from = level, to = next, target, "zoom step");
        map.set_zoom(next);
        steps += 1;

        match time::timeout(config.zoom_event_timeout, rx.recv()).await {
            Ok(Some(())) => {}
            Ok(None) | Err(_) => {
                return Err(AbandonReason::ZoomEventTimeout { at: level, target });
            }
        }
        ensure_loaded(map)?;

        level = map.zoom().unwrap_or(next);
        if !direction.short_of(level, target) {
            return Ok(steps);
        }
        time::sleep(config.step_settle).await;
    }
}

pub(crate) fn ensure_loaded(map: &dyn MapAdapter) -> Result<(), AbandonReason> {
    if map.is_loaded() {
        Ok(())
    } else {
        Err(AbandonReason::WidgetUnavailable)
    }
}
