use serde_json::{Value, json};

use crate::domain::Zone;

/// Render zones as a GeoJSON FeatureCollection for map layers
pub fn zones_to_feature_collection(zones: &[Zone]) -> Value {
    let features: Vec<Value> = zones.iter().map(zone_feature).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn zone_feature(zone: &Zone) -> Value {
    json!({
        "type": "Feature",
        "id": zone.id,
        "geometry": zone.boundary,
        "properties": {
            "name": zone.name,
            "type": zone.zone_type,
            "description": zone.description,
            "active": zone.active,
            "fill": zone.zone_type.fill_color(),
            "updated_at": zone.updated_at,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZoneType;
    use crate::geometry::GeoJsonPolygon;
    use chrono::Utc;

    #[test]
    fn test_feature_collection() {
        let now = Utc::now();
        let zone = Zone {
            id: "z-1".to_string(),
            name: "Ridge".to_string(),
            zone_type: ZoneType::Danger,
            boundary: GeoJsonPolygon::from_ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
            description: "cliffs".to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        };

        let collection = zones_to_feature_collection(&[zone]);

        assert_eq!(collection["type"], "FeatureCollection");
        let feature = &collection["features"][0];
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert_eq!(feature["geometry"]["coordinates"][0][1][0], 1.0);
        assert_eq!(feature["properties"]["type"], "danger");
        assert_eq!(feature["properties"]["fill"], "#ef4444");
    }
}
