use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::geometry::{BoundaryInput, GeoJsonPolygon};

/// Risk category of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Safe,
    Restricted,
    Danger,
    TouristZone,
}

impl ZoneType {
    pub const ALL: [ZoneType; 4] = [
        ZoneType::Safe,
        ZoneType::Restricted,
        ZoneType::Danger,
        ZoneType::TouristZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Safe => "safe",
            ZoneType::Restricted => "restricted",
            ZoneType::Danger => "danger",
            ZoneType::TouristZone => "tourist_zone",
        }
    }

    /// Map fill color used by dashboards
    pub fn fill_color(&self) -> &'static str {
        match self {
            ZoneType::Safe => "#22c55e",
            ZoneType::Restricted => "#f59e0b",
            ZoneType::Danger => "#ef4444",
            ZoneType::TouristZone => "#3b82f6",
        }
    }
}

impl FromStr for ZoneType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownType {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named geofence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub boundary: GeoJsonPolygon,
    #[serde(default)]
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted when creating a zone
///
/// The type is kept as the raw submitted string so unknown values surface as
/// a validation error instead of a parse failure upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewZone {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub boundary: BoundaryInput,
    #[serde(default)]
    pub description: String,
}

impl NewZone {
    pub fn new(
        name: impl Into<String>,
        zone_type: impl Into<String>,
        boundary: impl Into<BoundaryInput>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            zone_type: zone_type.into(),
            boundary: boundary.into(),
            description: description.into(),
        }
    }
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub zone_type: Option<String>,
    #[serde(default)]
    pub boundary: Option<BoundaryInput>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ZonePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.zone_type.is_none()
            && self.boundary.is_none()
            && self.description.is_none()
    }
}
