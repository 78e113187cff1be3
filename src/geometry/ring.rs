use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{GeometryReadError, ValidationError};

/// Marker for the GeoJSON `"type": "Polygon"` member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolygonTag {
    #[default]
    Polygon,
}

/// GeoJSON Polygon geometry as stored on a zone
///
/// Coordinates are kept as raw JSON so a stored record always loads, even
/// when a vertex is not numeric. Shape and numeric checks happen in the
/// validator and in [`Ring::from_polygon`]. Only the first ring is used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub kind: PolygonTag,
    #[serde(default)]
    pub coordinates: Value,
}

impl GeoJsonPolygon {
    /// Build a single-ring polygon from (lng, lat) pairs
    ///
    /// Non-finite values have no JSON form and become `null`.
    pub fn from_ring(points: &[(f64, f64)]) -> Self {
        let ring: Vec<Value> = points.iter().map(|&(lng, lat)| json!([lng, lat])).collect();
        Self {
            kind: PolygonTag::Polygon,
            coordinates: json!([ring]),
        }
    }

    /// Vertices of the first ring, if the coordinates are an array of arrays
    pub fn outer(&self) -> Option<&[Value]> {
        self.coordinates
            .as_array()?
            .first()?
            .as_array()
            .map(Vec::as_slice)
    }
}

/// Read a vertex as a numeric (lng, lat) pair
pub(crate) fn vertex_pair(vertex: &Value) -> Option<(f64, f64)> {
    match vertex.as_array()?.as_slice() {
        [x, y] => Some((x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}

/// Closure test that treats `[0, 0]` and `[0.0, 0.0]` as the same point
pub(crate) fn is_closed(ring: &[Value]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => match (vertex_pair(first), vertex_pair(last)) {
            (Some(a), Some(b)) => a == b,
            _ => first == last,
        },
        _ => false,
    }
}

/// Legacy `{lat, lng}` vertex sent by older callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyPoint {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

/// Boundary shapes accepted at the zone-management edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryInput {
    GeoJson(GeoJsonPolygon),
    Legacy(Vec<LegacyPoint>),
}

impl BoundaryInput {
    /// Parse a boundary from JSON text in either accepted shape
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(text).map_err(|e| ValidationError::MalformedBoundary {
            reason: format!("expected a GeoJSON Polygon or an array of {{lat, lng}} points ({e})"),
        })
    }

    /// Normalize into the canonical GeoJSON form
    ///
    /// Legacy rings are converted to (lng, lat) order and closed by
    /// appending the first point when it is not already repeated at the end.
    pub fn into_polygon(self) -> GeoJsonPolygon {
        match self {
            BoundaryInput::GeoJson(polygon) => polygon,
            BoundaryInput::Legacy(points) => {
                let mut ring: Vec<(f64, f64)> = points.iter().map(|p| (p.lng, p.lat)).collect();
                if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
                    && first != last
                {
                    ring.push(first);
                }
                if ring.is_empty() {
                    return GeoJsonPolygon {
                        kind: PolygonTag::Polygon,
                        coordinates: json!([]),
                    };
                }
                GeoJsonPolygon::from_ring(&ring)
            }
        }
    }
}

impl From<GeoJsonPolygon> for BoundaryInput {
    fn from(polygon: GeoJsonPolygon) -> Self {
        BoundaryInput::GeoJson(polygon)
    }
}

/// A closed ring of (x = lng, y = lat) coordinates, ready for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    coords: Vec<Coord<f64>>,
}

impl Ring {
    /// Wrap coordinates that are already known to form a closed ring
    pub(crate) fn from_coords(coords: Vec<Coord<f64>>) -> Self {
        Self { coords }
    }

    /// Read the outer ring of a stored polygon
    pub fn from_polygon(polygon: &GeoJsonPolygon) -> Result<Self, GeometryReadError> {
        let outer = polygon.outer().ok_or(GeometryReadError::NoRing)?;
        if outer.len() < 4 {
            return Err(GeometryReadError::TooFewPoints { count: outer.len() });
        }

        let mut coords = Vec::with_capacity(outer.len());
        for (index, vertex) in outer.iter().enumerate() {
            let (x, y) = vertex_pair(vertex).ok_or(GeometryReadError::MalformedVertex { index })?;
            coords.push(Coord { x, y });
        }

        if coords.first() != coords.last() {
            return Err(GeometryReadError::NotClosed);
        }

        Ok(Self { coords })
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.coords.clone()), Vec::new())
    }
}
