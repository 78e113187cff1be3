use geo::{Centroid, GeodesicArea};
use serde::Serialize;
use std::fmt;

use super::Ring;

/// Display metrics for a zone boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneMetrics {
    /// Geodesic area in square kilometres
    pub area_km2: f64,
    /// Centroid as (lng, lat)
    pub centroid: Option<(f64, f64)>,
}

impl ZoneMetrics {
    pub fn from_ring(ring: &Ring) -> Self {
        let polygon = ring.to_polygon();
        let area_m2 = polygon.geodesic_area_unsigned();
        let centroid = polygon.centroid().map(|p| (p.x(), p.y()));

        Self {
            area_km2: area_m2 / 1_000_000.0,
            centroid,
        }
    }
}

impl fmt::Display for ZoneMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} km2", self.area_km2)?;
        if let Some((lng, lat)) = self.centroid {
            write!(f, ", centroid lng {:.5} lat {:.5}", lng, lat)?;
        }
        Ok(())
    }
}
