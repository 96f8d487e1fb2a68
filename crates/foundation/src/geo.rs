use serde::{Deserialize, Serialize};

/// Integer web-map zoom level (0 = whole world).
pub type ZoomLevel = u32;

/// Decimal places kept by [`CoordKey`].
pub const COORD_KEY_DECIMALS: i32 = 4;

/// A WGS84 position in degrees, as consumed by web map widgets.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite and inside the geographic range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn key(&self) -> CoordKey {
        CoordKey::from(*self)
    }
}

/// Position rounded to [`COORD_KEY_DECIMALS`] decimal places.
///
/// Two positions with equal keys are treated as the same place on the map
/// (e.g. the same city visited on consecutive days).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordKey {
    lat_e4: i64,
    lng_e4: i64,
}

impl From<LatLng> for CoordKey {
    fn from(p: LatLng) -> Self {
        Self {
            lat_e4: scaled_decimal(p.lat),
            lng_e4: scaled_decimal(p.lng),
        }
    }
}

/// Rounds the exact binary value at the fourth decimal (`48.00015` is
/// stored just below the half and becomes `48.0001`), then drops the point.
/// Non-finite components all map to zero.
fn scaled_decimal(v: f64) -> i64 {
    let precision = COORD_KEY_DECIMALS as usize;
    format!("{v:.precision$}")
        .replace('.', "")
        .parse()
        .unwrap_or_default()
}

impl std::fmt::Display for CoordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scale = 10f64.powi(COORD_KEY_DECIMALS);
        write!(
            f,
            "{:.4},{:.4}",
            self.lat_e4 as f64 / scale,
            self.lng_e4 as f64 / scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::LatLng;

    #[test]
    fn key_ignores_digits_past_fourth_decimal() {
        let a = LatLng::new(48.81271, 14.31749);
        let b = LatLng::new(48.8127, 14.3175);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().to_string(), "48.8127,14.3175");
    }

    #[test]
    fn key_distinguishes_nearby_places() {
        let old_town = LatLng::new(50.0875, 14.4213);
        let castle = LatLng::new(50.0884, 14.4013);
        assert_ne!(old_town.key(), castle.key());
    }

    #[test]
    fn key_rounds_the_stored_binary_value() {
        // 48.00015 and 48.00035 are stored slightly below the half.
        assert_eq!(LatLng::new(48.00015, 14.0).key(), LatLng::new(48.0001, 14.0).key());
        assert_eq!(LatLng::new(48.00035, 14.0).key().to_string(), "48.0003,14.0000");
        assert_eq!(LatLng::new(-0.00004, 0.0).key(), LatLng::new(0.0, 0.0).key());
        assert_eq!(LatLng::new(-16.37379, 0.0).key().to_string(), "-16.3738,0.0000");
    }

    #[test]
    fn validity_rejects_out_of_range() {
        assert!(LatLng::new(47.5622, 13.6493).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::NAN).is_valid());
    }
}
