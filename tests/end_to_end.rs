use gosafe_geofence::{
    BoundaryInput, Evaluator, GeoJsonPolygon, JsonZoneStore, LocationSample, MemoryZoneStore,
    NewZone, ResponderClass, ZoneStore, ZoneType, route_escalation,
};
use tempfile::tempdir;

fn delhi_danger_boundary() -> GeoJsonPolygon {
    GeoJsonPolygon::from_ring(&[
        (77.202, 28.61),
        (77.204, 28.61),
        (77.204, 28.612),
        (77.202, 28.612),
        (77.202, 28.61),
    ])
}

#[test]
fn test_point_inside_danger_zone_goes_to_ranger() {
    let mut store = MemoryZoneStore::new();
    let danger = store
        .create_zone(NewZone::new(
            "Ridge",
            "danger",
            delhi_danger_boundary(),
            "loose rock",
        ))
        .unwrap();

    let zones = store.list_active_zones().unwrap();
    let result = Evaluator::default().evaluate_point(77.203, 28.611, &zones);

    assert_eq!(result.matched_zone.map(|z| &z.id), Some(&danger.id));
    assert_eq!(result.matched_zone.unwrap().zone_type, ZoneType::Danger);
    assert_eq!(route_escalation(result.matched_zone), ResponderClass::Ranger);
}

#[test]
fn test_point_outside_all_zones_goes_to_police() {
    let mut store = MemoryZoneStore::new();
    store
        .create_zone(NewZone::new("Ridge", "danger", delhi_danger_boundary(), ""))
        .unwrap();

    let zones = store.list_active_zones().unwrap();
    let result = Evaluator::default().evaluate_point(77.2, 28.6, &zones);

    assert!(result.matched_zone.is_none());
    assert_eq!(route_escalation(result.matched_zone), ResponderClass::Police);
}

#[test]
fn test_restricted_zone_goes_to_police() {
    let mut store = MemoryZoneStore::new();
    store
        .create_zone(NewZone::new(
            "Border post",
            "restricted",
            delhi_danger_boundary(),
            "",
        ))
        .unwrap();

    let zones = store.list_active_zones().unwrap();
    let sample = LocationSample::new("T-7", 28.611, 77.203);
    let decision = Evaluator::default().decide(&sample, &zones);

    assert!(decision.matched_zone.is_some());
    assert_eq!(decision.responder_class, ResponderClass::Police);
}

#[test]
fn test_archived_zone_stops_matching() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zones.json");

    let mut store = JsonZoneStore::open(&path).unwrap();
    let legacy = BoundaryInput::from_json(
        r#"[{"lat":28.61,"lng":77.202},{"lat":28.61,"lng":77.204},
            {"lat":28.612,"lng":77.204},{"lat":28.612,"lng":77.202}]"#,
    )
    .unwrap();
    let zone = store
        .create_zone(NewZone::new("Ridge", "danger", legacy, ""))
        .unwrap();
    store.archive_zone(&zone.id).unwrap();

    let store = JsonZoneStore::open(&path).unwrap();
    let zones = store.list_active_zones().unwrap();
    let result = Evaluator::default().evaluate_point(77.203, 28.611, &zones);

    assert!(result.matched_zone.is_none());
    assert_eq!(route_escalation(result.matched_zone), ResponderClass::Police);

    let history = store.get_zone(&zone.id).unwrap();
    assert!(!history.active);
    assert_eq!(history.zone_type, ZoneType::Danger);
}
