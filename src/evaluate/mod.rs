//! Location evaluation against zone snapshots
//!
//! Evaluation is a pure function of the point and the zone slice it is given:
//! zones are scanned in order and the first active zone containing the point
//! wins. Zones whose stored boundary cannot be read are logged and skipped so
//! one corrupt record never stops the rest of the scan.

use serde::{Deserialize, Serialize};

use crate::domain::{EscalationDecision, EscalationSummary, LocationSample, Zone};
use crate::error::GeometryReadError;
use crate::geometry::{BoundingBox, Ring, in_wgs84_range, point_in_ring};

/// How containment is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Exact even-odd ray casting
    #[default]
    Exact,
    /// Bounding-box test. Approximate: reports matches for points outside
    /// non-rectangular zones that still fall within the zone's extent.
    Approximate,
}

/// Result of evaluating one point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation<'a> {
    pub matched_zone: Option<&'a Zone>,
}

/// Stateless point evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    mode: EvaluationMode,
}

impl Evaluator {
    pub fn new(mode: EvaluationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Find the first active zone containing (lng, lat)
    ///
    /// Out-of-range or non-finite coordinates are logged but still scanned;
    /// they match nothing and fall through to the default route.
    pub fn evaluate_point<'a>(&self, lng: f64, lat: f64, zones: &'a [Zone]) -> Evaluation<'a> {
        if !in_wgs84_range(lng, lat) {
            log::warn!("Location ({}, {}) is outside WGS84 range", lat, lng);
        }

        let matched_zone = zones.iter().filter(|zone| zone.active).find(|zone| {
            match self.zone_contains(zone, lng, lat) {
                Ok(inside) => inside,
                Err(e) => {
                    log::warn!("Skipping zone '{}' ({}): {}", zone.name, zone.id, e);
                    false
                }
            }
        });

        Evaluation { matched_zone }
    }

    /// Containment test for a single zone, ignoring its active flag
    pub fn zone_contains(&self, zone: &Zone, lng: f64, lat: f64) -> Result<bool, GeometryReadError> {
        let ring = Ring::from_polygon(&zone.boundary)?;
        let inside = match self.mode {
            EvaluationMode::Exact => point_in_ring(ring.coords(), lng, lat),
            EvaluationMode::Approximate => BoundingBox::from_ring(&ring)
                .map(|bbox| bbox.contains(lng, lat))
                .unwrap_or(false),
        };
        Ok(inside)
    }

    /// Evaluate a sample and route it in one step
    pub fn decide<'a>(&self, sample: &'a LocationSample, zones: &'a [Zone]) -> EscalationDecision<'a> {
        let evaluation = self.evaluate_point(sample.lng, sample.lat, zones);
        EscalationDecision::new(sample, evaluation.matched_zone)
    }

    /// Evaluate every sample of a track against the same snapshot
    pub fn evaluate_track<'a>(
        &self,
        samples: &'a [LocationSample],
        zones: &'a [Zone],
    ) -> TrackReport<'a> {
        let mut report = TrackReport::default();
        for sample in samples {
            report.push(self.decide(sample, zones));
        }
        report
    }
}

/// Decisions for a batch of samples plus their tally
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackReport<'a> {
    pub decisions: Vec<EscalationDecision<'a>>,
    pub summary: EscalationSummary,
}

impl<'a> TrackReport<'a> {
    pub fn push(&mut self, decision: EscalationDecision<'a>) {
        self.summary.record(&decision);
        self.decisions.push(decision);
    }
}
