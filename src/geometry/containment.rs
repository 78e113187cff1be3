use geo::Coord;

use super::Ring;

/// Even-odd ray casting test for a closed ring
///
/// Casts a horizontal ray from `(x, y)` towards +x and toggles on every edge
/// crossing. `x` is longitude and `y` latitude in degrees; no antimeridian
/// handling is done.
///
/// Points exactly on the boundary follow the half-open crossing rule: an
/// edge counts when one endpoint is strictly above `y` and the other is not,
/// and the crossing counts when `x` is strictly left of it. For an
/// axis-aligned square that puts the minimum-x and minimum-y edges inside and
/// the maximum-x and maximum-y edges outside.
pub fn point_in_ring(ring: &[Coord<f64>], x: f64, y: f64) -> bool {
    let Some(last) = ring.len().checked_sub(1) else {
        return false;
    };

    let mut inside = false;
    let mut j = last;
    for (i, pi) in ring.iter().enumerate() {
        let pj = ring[j];
        if (pi.y > y) != (pj.y > y) && x < pi.x + (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Longitude in [-180, 180] and latitude in [-90, 90]; NaN is out of range
pub fn in_wgs84_range(lng: f64, lat: f64) -> bool {
    (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat)
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a bounding box from ring coordinates
    pub fn from_ring(ring: &Ring) -> Option<Self> {
        if ring.is_empty() {
            return None;
        }

        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;

        for c in ring.coords() {
            min_lng = min_lng.min(c.x);
            max_lng = max_lng.max(c.x);
            min_lat = min_lat.min(c.y);
            max_lat = max_lat.max(c.y);
        }

        Some(Self {
            min_lng,
            max_lng,
            min_lat,
            max_lat,
        })
    }

    /// Inclusive containment test
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        (self.min_lng..=self.max_lng).contains(&lng) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}
