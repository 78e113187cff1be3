//! Zone persistence contract and implementations
//!
//! Stores only admit zones that pass the [`Validator`]. Zones are never
//! physically removed: archiving clears `active`, which hides the zone from
//! [`ZoneStore::list_active_zones`] while keeping the record for history.

pub mod json;
pub mod memory;

pub use json::JsonZoneStore;
pub use memory::MemoryZoneStore;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewZone, Zone, ZonePatch};
use crate::error::{ValidationError, ZoneError};
use crate::validation::Validator;

/// Zone-management operations
pub trait ZoneStore {
    /// Snapshot of active zones in store order
    fn list_active_zones(&self) -> Result<Vec<Zone>, ZoneError>;

    /// Every zone including archived ones
    fn list_all_zones(&self) -> Result<Vec<Zone>, ZoneError>;

    /// Look up a zone by id, archived or not
    fn get_zone(&self, id: &str) -> Result<Zone, ZoneError>;

    fn create_zone(&mut self, new_zone: NewZone) -> Result<Zone, ZoneError>;

    /// Apply a partial update to an active zone
    fn update_zone(&mut self, id: &str, patch: ZonePatch) -> Result<Zone, ZoneError>;

    /// Soft-delete an active zone
    fn archive_zone(&mut self, id: &str) -> Result<(), ZoneError>;
}

/// Validate a submission and build the zone record
pub(crate) fn build_zone(validator: &Validator, new_zone: NewZone) -> Result<Zone, ValidationError> {
    let name = checked_name(new_zone.name)?;
    let boundary = new_zone.boundary.into_polygon();
    let (_, zone_type) = validator.validate(&boundary, &new_zone.zone_type)?;
    let now = Utc::now();

    Ok(Zone {
        id: Uuid::new_v4().to_string(),
        name,
        zone_type,
        boundary,
        description: new_zone.description,
        active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Produce the updated record without touching the original
///
/// The merged zone is validated as a whole so a patch can never leave a
/// record that would have been rejected at creation.
pub(crate) fn patched_zone(
    validator: &Validator,
    zone: &Zone,
    patch: ZonePatch,
) -> Result<Zone, ValidationError> {
    let mut updated = zone.clone();

    if let Some(name) = patch.name {
        updated.name = checked_name(name)?;
    }
    if let Some(description) = patch.description {
        updated.description = description;
    }
    if let Some(boundary) = patch.boundary {
        updated.boundary = boundary.into_polygon();
    }

    let declared_type = patch
        .zone_type
        .unwrap_or_else(|| zone.zone_type.as_str().to_string());
    let (_, zone_type) = validator.validate(&updated.boundary, &declared_type)?;
    updated.zone_type = zone_type;
    updated.updated_at = Utc::now();

    Ok(updated)
}

fn checked_name(name: String) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
