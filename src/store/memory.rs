use chrono::Utc;

use super::{ZoneStore, build_zone, patched_zone};
use crate::domain::{NewZone, Zone, ZonePatch};
use crate::error::ZoneError;
use crate::validation::Validator;

/// In-process zone store, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryZoneStore {
    zones: Vec<Zone>,
    validator: Validator,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with already-persisted records
    ///
    /// Records are trusted as-is; evaluation skips any whose boundary turns
    /// out to be unreadable.
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            validator: Validator::new(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    fn active_index(&self, id: &str) -> Result<usize, ZoneError> {
        self.zones
            .iter()
            .position(|z| z.id == id && z.active)
            .ok_or_else(|| ZoneError::not_found(id))
    }
}

impl ZoneStore for MemoryZoneStore {
    fn list_active_zones(&self) -> Result<Vec<Zone>, ZoneError> {
        Ok(self.zones.iter().filter(|z| z.active).cloned().collect())
    }

    fn list_all_zones(&self) -> Result<Vec<Zone>, ZoneError> {
        Ok(self.zones.clone())
    }

    fn get_zone(&self, id: &str) -> Result<Zone, ZoneError> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .cloned()
            .ok_or_else(|| ZoneError::not_found(id))
    }

    fn create_zone(&mut self, new_zone: NewZone) -> Result<Zone, ZoneError> {
        let zone = build_zone(&self.validator, new_zone)?;
        log::debug!("Created zone '{}' ({}) as {}", zone.name, zone.id, zone.zone_type);
        self.zones.push(zone.clone());
        Ok(zone)
    }

    fn update_zone(&mut self, id: &str, patch: ZonePatch) -> Result<Zone, ZoneError> {
        let index = self.active_index(id)?;
        let updated = patched_zone(&self.validator, &self.zones[index], patch)?;
        log::debug!("Updated zone '{}' ({})", updated.name, updated.id);
        self.zones[index] = updated.clone();
        Ok(updated)
    }

    fn archive_zone(&mut self, id: &str) -> Result<(), ZoneError> {
        let index = self.active_index(id)?;
        let zone = &mut self.zones[index];
        zone.active = false;
        zone.updated_at = Utc::now();
        log::debug!("Archived zone '{}' ({})", zone.name, zone.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZoneType;
    use crate::error::ValidationError;
    use crate::geometry::{BoundaryInput, GeoJsonPolygon, LegacyPoint};

    fn square() -> GeoJsonPolygon {
        GeoJsonPolygon::from_ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)])
    }

    fn create(store: &mut MemoryZoneStore, name: &str, zone_type: &str) -> Zone {
        store
            .create_zone(NewZone::new(name, zone_type, square(), "test zone"))
            .unwrap()
    }

    #[test]
    fn test_create_and_list() {
        let mut store = MemoryZoneStore::new();
        let a = create(&mut store, "Ridge", "danger");
        let b = create(&mut store, "Market", "tourist_zone");

        assert_ne!(a.id, b.id);
        assert!(a.active);
        assert_eq!(a.zone_type, ZoneType::Danger);

        let active = store.list_active_zones().unwrap();
        let ids: Vec<&str> = active.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let mut store = MemoryZoneStore::new();

        let err = store
            .create_zone(NewZone::new("Ridge", "swamp", square(), ""))
            .unwrap_err();
        assert!(matches!(
            err,
            ZoneError::Validation(ValidationError::UnknownType { .. })
        ));

        let open = GeoJsonPolygon::from_ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let err = store
            .create_zone(NewZone::new("Ridge", "danger", open, ""))
            .unwrap_err();
        assert!(matches!(err, ZoneError::Validation(ValidationError::NotClosed)));

        let err = store
            .create_zone(NewZone::new("  ", "danger", square(), ""))
            .unwrap_err();
        assert!(matches!(err, ZoneError::Validation(ValidationError::EmptyName)));

        assert!(store.is_empty());
    }

    #[test]
    fn test_create_from_legacy_boundary() {
        let mut store = MemoryZoneStore::new();
        let legacy = BoundaryInput::Legacy(vec![
            LegacyPoint { lat: 0.0, lng: 0.0 },
            LegacyPoint { lat: 1.0, lng: 0.0 },
            LegacyPoint { lat: 1.0, lng: 1.0 },
        ]);

        let zone = store
            .create_zone(NewZone::new("Old form", "safe", legacy, ""))
            .unwrap();
        assert_eq!(zone.boundary.outer().unwrap().len(), 4);
    }

    #[test]
    fn test_update_zone() {
        let mut store = MemoryZoneStore::new();
        let zone = create(&mut store, "Ridge", "danger");

        let patch = ZonePatch {
            name: Some("North Ridge".to_string()),
            zone_type: Some("restricted".to_string()),
            ..Default::default()
        };
        let updated = store.update_zone(&zone.id, patch).unwrap();

        assert_eq!(updated.name, "North Ridge");
        assert_eq!(updated.zone_type, ZoneType::Restricted);
        assert_eq!(updated.description, "test zone");
        assert_eq!(updated.created_at, zone.created_at);
        assert_eq!(store.get_zone(&zone.id).unwrap(), updated);
    }

    #[test]
    fn test_rejected_update_leaves_zone_unchanged() {
        let mut store = MemoryZoneStore::new();
        let zone = create(&mut store, "Ridge", "danger");

        let patch = ZonePatch {
            name: Some("Renamed".to_string()),
            boundary: Some(
                GeoJsonPolygon::from_ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
                    .into(),
            ),
            ..Default::default()
        };
        assert!(store.update_zone(&zone.id, patch).is_err());
        assert_eq!(store.get_zone(&zone.id).unwrap(), zone);
    }

    #[test]
    fn test_update_unknown_zone() {
        let mut store = MemoryZoneStore::new();
        let err = store.update_zone("missing", ZonePatch::default()).unwrap_err();
        assert!(matches!(err, ZoneError::NotFound { .. }));
    }

    #[test]
    fn test_archive_keeps_history() {
        let mut store = MemoryZoneStore::new();
        let zone = create(&mut store, "Ridge", "danger");
        create(&mut store, "Market", "safe");

        store.archive_zone(&zone.id).unwrap();

        let active = store.list_active_zones().unwrap();
        assert_eq!(active.len(), 1);
        assert!(active.iter().all(|z| z.id != zone.id));

        let archived = store.get_zone(&zone.id).unwrap();
        assert!(!archived.active);
        assert_eq!(store.list_all_zones().unwrap().len(), 2);
    }

    #[test]
    fn test_archived_zone_is_not_found_for_writes() {
        let mut store = MemoryZoneStore::new();
        let zone = create(&mut store, "Ridge", "danger");
        store.archive_zone(&zone.id).unwrap();

        assert!(matches!(
            store.archive_zone(&zone.id),
            Err(ZoneError::NotFound { .. })
        ));
        assert!(matches!(
            store.update_zone(&zone.id, ZonePatch::default()),
            Err(ZoneError::NotFound { .. })
        ));
    }
}
