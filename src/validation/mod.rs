//! Zone boundary validation
//!
//! Gates what enters the zone store. Checks run in a fixed order and the
//! first failure is reported:
//! - Boundary has an outer ring
//! - Ring has at least 4 points
//! - Ring is closed (first point equals last)
//! - Every vertex is a numeric [lng, lat] pair within WGS84 ranges
//! - Ring has at least 3 distinct vertices
//! - Declared type is one of the known zone types

use geo::Coord;
use serde_json::Value;

use crate::domain::ZoneType;
use crate::error::ValidationError;
use crate::geometry::ring::{is_closed, vertex_pair};
use crate::geometry::{GeoJsonPolygon, Ring, in_wgs84_range};

/// Minimum ring length: three distinct vertices plus the closing point
pub const MIN_RING_POINTS: usize = 4;

const MIN_DISTINCT_VERTICES: usize = 3;

/// Stateless boundary and type validator
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a boundary together with its declared type
    pub fn validate(
        &self,
        boundary: &GeoJsonPolygon,
        declared_type: &str,
    ) -> Result<(Ring, ZoneType), ValidationError> {
        let ring = self.validate_boundary(boundary)?;
        let zone_type = declared_type.parse::<ZoneType>()?;
        Ok((ring, zone_type))
    }

    /// Validate a boundary on its own
    pub fn validate_boundary(&self, boundary: &GeoJsonPolygon) -> Result<Ring, ValidationError> {
        let outer = outer_ring(boundary)?;

        if outer.len() < MIN_RING_POINTS {
            return Err(ValidationError::TooFewPoints {
                count: outer.len(),
                minimum: MIN_RING_POINTS,
            });
        }

        if !is_closed(outer) {
            return Err(ValidationError::NotClosed);
        }

        let mut coords = Vec::with_capacity(outer.len());
        for (index, vertex) in outer.iter().enumerate() {
            coords.push(check_vertex(index, vertex)?);
        }

        let distinct = count_distinct(&coords[..coords.len() - 1]);
        if distinct < MIN_DISTINCT_VERTICES {
            return Err(ValidationError::Degenerate { distinct });
        }

        Ok(Ring::from_coords(coords))
    }
}

/// The outer ring, provided the coordinates are a non-empty array of arrays
fn outer_ring(boundary: &GeoJsonPolygon) -> Result<&[Value], ValidationError> {
    let rings = match &boundary.coordinates {
        Value::Null => return Err(ValidationError::EmptyBoundary),
        Value::Array(rings) => rings,
        _ => {
            return Err(ValidationError::MalformedBoundary {
                reason: "coordinates must be an array of rings".to_string(),
            });
        }
    };

    let Some(first) = rings.first() else {
        return Err(ValidationError::EmptyBoundary);
    };
    let Some(ring) = first.as_array() else {
        return Err(ValidationError::MalformedBoundary {
            reason: "outer ring must be an array of vertices".to_string(),
        });
    };
    if ring.is_empty() {
        return Err(ValidationError::EmptyBoundary);
    }

    Ok(ring)
}

/// Check a single vertex for shape and range
fn check_vertex(index: usize, vertex: &Value) -> Result<Coord<f64>, ValidationError> {
    let (lng, lat) = vertex_pair(vertex).ok_or(ValidationError::MalformedVertex { index })?;

    if !in_wgs84_range(lng, lat) {
        return Err(ValidationError::OutOfRange { index, lng, lat });
    }

    Ok(Coord { x: lng, y: lat })
}

fn count_distinct(coords: &[Coord<f64>]) -> usize {
    let mut seen: Vec<Coord<f64>> = Vec::with_capacity(coords.len());
    for c in coords {
        if !seen.contains(c) {
            seen.push(*c);
        }
    }
    seen.len()
}
