use std::time::Duration;

use foundation::{Insets, LatLng, ZoomLevel};

/// Timing and geometry of camera animations.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Where "no day selected" leaves the camera.
    pub default_center: LatLng,
    pub default_zoom: ZoomLevel,
    /// Highest zoom the camera may keep while panning between days.
    pub overview_zoom_cap: ZoomLevel,
    /// Pause after each confirmed zoom level before requesting the next.
    pub step_settle: Duration,
    /// Pause after a pan before zooming back in.
    pub pan_settle: Duration,
    /// A step loop without a zoom-changed confirmation for this long is
    /// abandoned.
    pub zoom_event_timeout: Duration,
    /// Padding for the full-route fit; the wide left inset keeps the route
    /// clear of the day list panel.
    pub route_fit_insets: Insets,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(48.5, 15.0),
            default_zoom: 6,
            overview_zoom_cap: 8,
            step_settle: Duration::from_millis(80),
            pan_settle: Duration::from_millis(400),
            zoom_event_timeout: Duration::from_millis(2000),
            route_fit_insets: Insets::new(60, 60, 400, 60),
        }
    }
}
