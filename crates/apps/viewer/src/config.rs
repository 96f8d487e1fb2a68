use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use camera::CameraConfig;
use foundation::LatLng;
use itinerary::{Itinerary, ItineraryError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("default center ({lat}, {lng}) is not a valid coordinate")]
    InvalidCenter { lat: f64, lng: f64 },
    #[error("{0} must be at least 1")]
    ZeroZoom(&'static str),
}

/// Viewer settings resolved from the environment.
///
/// Unset or unparsable variables fall back to the [`CameraConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerConfig {
    /// JSON itinerary to load instead of the built-in trip.
    pub itinerary_path: Option<PathBuf>,
    pub camera: CameraConfig,
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CameraConfig::default();
        let camera = CameraConfig {
            default_center: LatLng::new(
                var_or(&lookup, "VIEWER_DEFAULT_LAT", defaults.default_center.lat),
                var_or(&lookup, "VIEWER_DEFAULT_LNG", defaults.default_center.lng),
            ),
            default_zoom: var_or(&lookup, "VIEWER_DEFAULT_ZOOM", defaults.default_zoom),
            overview_zoom_cap: var_or(&lookup, "VIEWER_OVERVIEW_ZOOM_CAP", defaults.overview_zoom_cap),
            step_settle: var_ms(&lookup, "VIEWER_STEP_SETTLE_MS", defaults.step_settle),
            pan_settle: var_ms(&lookup, "VIEWER_PAN_SETTLE_MS", defaults.pan_settle),
            zoom_event_timeout: var_ms(
                &lookup,
                "VIEWER_ZOOM_EVENT_TIMEOUT_MS",
                defaults.zoom_event_timeout,
            ),
            route_fit_insets: defaults.route_fit_insets,
        };
        let config = Self {
            itinerary_path: lookup("ITINERARY_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            camera,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let center = self.camera.default_center;
        if !center.is_valid() {
            return Err(ConfigError::InvalidCenter {
                lat: center.lat,
                lng: center.lng,
            });
        }
        if self.camera.default_zoom == 0 {
            return Err(ConfigError::ZeroZoom("default zoom"));
        }
        if self.camera.overview_zoom_cap == 0 {
            return Err(ConfigError::ZeroZoom("overview zoom cap"));
        }
        Ok(())
    }

    pub fn load_itinerary(&self) -> Result<Itinerary, ItineraryError> {
        match &self.itinerary_path {
            Some(path) => Itinerary::from_path(path),
            None => Itinerary::builtin(),
        }
    }
}

fn var_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn var_ms(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{ConfigError, ViewerConfig};
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ViewerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ViewerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = from_pairs(&[
            ("ITINERARY_PATH", "/srv/trip.json"),
            ("VIEWER_DEFAULT_ZOOM", "5"),
            ("VIEWER_OVERVIEW_ZOOM_CAP", "9"),
            ("VIEWER_STEP_SETTLE_MS", "10"),
            ("VIEWER_PAN_SETTLE_MS", " 50 "),
            ("VIEWER_ZOOM_EVENT_TIMEOUT_MS", "500"),
            ("VIEWER_DEFAULT_LAT", "47.0"),
            ("VIEWER_DEFAULT_LNG", "14.0"),
        ])
        .unwrap();

        assert_eq!(config.itinerary_path, Some(PathBuf::from("/srv/trip.json")));
        assert_eq!(config.camera.default_zoom, 5);
        assert_eq!(config.camera.overview_zoom_cap, 9);
        assert_eq!(config.camera.step_settle, Duration::from_millis(10));
        assert_eq!(config.camera.pan_settle, Duration::from_millis(50));
        assert_eq!(config.camera.zoom_event_timeout, Duration::from_millis(500));
        assert_eq!(config.camera.default_center, LatLng::new(47.0, 14.0));
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = from_pairs(&[("VIEWER_DEFAULT_ZOOM", "six"), ("ITINERARY_PATH", "")]).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn rejects_unusable_values() {
        assert_eq!(
            from_pairs(&[("VIEWER_DEFAULT_LAT", "123")]),
            Err(ConfigError::InvalidCenter {
                lat: 123.0,
                lng: 15.0
            })
        );
        assert_eq!(
            from_pairs(&[("VIEWER_OVERVIEW_ZOOM_CAP", "0")]),
            Err(ConfigError::ZeroZoom("overview zoom cap"))
        );
    }
}
