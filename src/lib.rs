//! gosafe-geofence - Geofence risk-zone evaluation and escalation routing for GoSafe

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod export;
pub mod geometry;
pub mod store;
pub mod validation;

pub use domain::{
    EscalationDecision, LocationSample, NewZone, ResponderClass, Zone, ZonePatch, ZoneType,
    route_escalation,
};
pub use error::{GeometryReadError, StoreError, ValidationError, ZoneError};
pub use evaluate::{Evaluation, EvaluationMode, Evaluator, TrackReport};
pub use geometry::{BoundaryInput, GeoJsonPolygon};
pub use store::{JsonZoneStore, MemoryZoneStore, ZoneStore};
pub use validation::Validator;
