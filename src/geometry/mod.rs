pub mod containment;
pub mod metrics;
pub mod ring;

pub use containment::{BoundingBox, in_wgs84_range, point_in_ring};
pub use metrics::ZoneMetrics;
pub use ring::{BoundaryInput, GeoJsonPolygon, LegacyPoint, PolygonTag, Ring};
