pub mod escalation;
pub mod location;
pub mod zone;

pub use escalation::{EscalationDecision, EscalationSummary, ResponderClass, route_escalation};
pub use location::LocationSample;
pub use zone::{NewZone, Zone, ZonePatch, ZoneType};
