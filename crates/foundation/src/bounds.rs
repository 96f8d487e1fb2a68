use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Axis-aligned geographic bounding box (south-west / north-east corners).
///
/// Boxes never wrap the antimeridian; `sw.lng <= ne.lng` always holds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl LatLngBounds {
    pub fn from_point(p: LatLng) -> Self {
        Self { sw: p, ne: p }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.sw.lat = self.sw.lat.min(p.lat);
        self.sw.lng = self.sw.lng.min(p.lng);
        self.ne.lat = self.ne.lat.max(p.lat);
        self.ne.lng = self.ne.lng.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.sw.lat..=self.ne.lat).contains(&p.lat) && (self.sw.lng..=self.ne.lng).contains(&p.lng)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.sw.lat + self.ne.lat) * 0.5,
            (self.sw.lng + self.ne.lng) * 0.5,
        )
    }
}

/// Screen-space padding in CSS pixels applied when fitting bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Insets {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LatLngBounds;
    use crate::geo::LatLng;

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(LatLngBounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn bounds_cover_every_point() {
        let pts = [
            LatLng::new(50.0755, 14.4378),
            LatLng::new(47.5622, 13.6493),
            LatLng::new(48.2082, 16.3738),
        ];
        let b = LatLngBounds::from_points(pts).unwrap();
        assert_eq!(b.sw, LatLng::new(47.5622, 13.6493));
        assert_eq!(b.ne, LatLng::new(50.0755, 16.3738));
        assert!(pts.iter().all(|p| b.contains(*p)));
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let p = LatLng::new(48.8127, 14.3175);
        let b = LatLngBounds::from_points([p]).unwrap();
        assert_eq!(b.center(), p);
    }
}
