use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked person's position at a point in time
///
/// Samples are consumed by the evaluator and never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub subject_id: String,
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(subject_id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            subject_id: subject_id.into(),
            lat,
            lng,
            timestamp: Utc::now(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        let json = r#"{"subject_id":"T-42","lat":28.611,"lon":77.203,"timestamp":"2026-03-01T10:00:00Z"}"#;
        let sample: LocationSample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.subject_id, "T-42");
        assert_eq!(sample.lng, 77.203);
        assert_eq!(sample.timestamp.to_rfc3339(), "2026-03-01T10:00:00+00:00");
    }
}
