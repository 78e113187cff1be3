use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::{LocationSample, Zone, ZoneType};

/// Responder dispatched for an escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponderClass {
    Ranger,
    Police,
}

impl ResponderClass {
    /// Danger zones need specialised rescue; everything else goes to police
    pub fn for_zone_type(zone_type: ZoneType) -> Self {
        match zone_type {
            ZoneType::Danger => ResponderClass::Ranger,
            ZoneType::Restricted | ZoneType::TouristZone | ZoneType::Safe => ResponderClass::Police,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponderClass::Ranger => "ranger",
            ResponderClass::Police => "police",
        }
    }
}

impl fmt::Display for ResponderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route an evaluation result to a responder class
///
/// Total: no match falls back to police.
pub fn route_escalation(matched_zone: Option<&Zone>) -> ResponderClass {
    matched_zone
        .map(|zone| ResponderClass::for_zone_type(zone.zone_type))
        .unwrap_or(ResponderClass::Police)
}

/// Derived decision for one location sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EscalationDecision<'a> {
    pub subject_id: &'a str,
    pub timestamp: DateTime<Utc>,
    pub matched_zone: Option<&'a Zone>,
    pub responder_class: ResponderClass,
}

impl<'a> EscalationDecision<'a> {
    pub fn new(sample: &'a LocationSample, matched_zone: Option<&'a Zone>) -> Self {
        Self {
            subject_id: &sample.subject_id,
            timestamp: sample.timestamp,
            matched_zone,
            responder_class: route_escalation(matched_zone),
        }
    }
}

/// Running tally of decisions over a track
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EscalationSummary {
    pub samples: usize,
    pub matched: usize,
    pub ranger: usize,
    pub police: usize,
}

impl EscalationSummary {
    pub fn record(&mut self, decision: &EscalationDecision<'_>) {
        self.samples += 1;
        if decision.matched_zone.is_some() {
            self.matched += 1;
        }
        match decision.responder_class {
            ResponderClass::Ranger => self.ranger += 1,
            ResponderClass::Police => self.police += 1,
        }
    }

    pub fn unmatched(&self) -> usize {
        self.samples - self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoJsonPolygon;

    fn zone(zone_type: ZoneType) -> Zone {
        let now = Utc::now();
        Zone {
            id: "z-1".to_string(),
            name: "Test".to_string(),
            zone_type,
            boundary: GeoJsonPolygon::from_ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]),
            description: String::new(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_routing_policy() {
        assert_eq!(
            route_escalation(Some(&zone(ZoneType::Danger))),
            ResponderClass::Ranger
        );
        assert_eq!(
            route_escalation(Some(&zone(ZoneType::Restricted))),
            ResponderClass::Police
        );
        assert_eq!(
            route_escalation(Some(&zone(ZoneType::TouristZone))),
            ResponderClass::Police
        );
        assert_eq!(
            route_escalation(Some(&zone(ZoneType::Safe))),
            ResponderClass::Police
        );
        assert_eq!(route_escalation(None), ResponderClass::Police);
    }

    #[test]
    fn test_summary() {
        let danger = zone(ZoneType::Danger);
        let sample = LocationSample::new("T-1", 0.5, 0.5);

        let mut summary = EscalationSummary::default();
        summary.record(&EscalationDecision::new(&sample, Some(&danger)));
        summary.record(&EscalationDecision::new(&sample, None));

        assert_eq!(summary.samples, 2);
        assert_eq!(summary.ranger, 1);
        assert_eq!(summary.police, 1);
        assert_eq!(summary.unmatched(), 1);
    }
}
