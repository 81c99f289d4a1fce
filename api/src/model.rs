//! Wire records for the three collections served by the graphing backend.
//!
//! Every collection is delivered whole. Records are never mutated after
//! decode; a reload replaces the [`Snapshot`] wholesale.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type SampleId = i64;
pub type TargetId = i64;
pub type DatasetId = i64;

/// Incubation time in hours.
///
/// Equality and hashing are bitwise (with `-0.0` folded into `0.0`) and
/// ordering is `f64::total_cmp`, so values can be used as set members.
#[derive(Debug, Clone, Copy)]
pub struct IncubationHours(f64);

impl IncubationHours {
    pub fn new(hours: f64) -> Self {
        if hours == 0.0 {
            Self(0.0)
        } else {
            Self(hours)
        }
    }

    pub fn hours(self) -> f64 {
        self.0
    }
}

impl From<f64> for IncubationHours {
    fn from(hours: f64) -> Self {
        Self::new(hours)
    }
}

impl PartialEq for IncubationHours {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for IncubationHours {}

impl Hash for IncubationHours {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for IncubationHours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IncubationHours {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for IncubationHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for IncubationHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for IncubationHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: DatasetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    pub donor: String,
    pub buffer: String,
    #[serde(rename = "incubation time (hr)")]
    pub incubation_time: IncubationHours,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub metadata: SampleMetadata,
    pub dataset: DatasetRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_id: Option<String>,
}

/// One projected sample. Coordinates arrive precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub x_coor: f64,
    pub y_coor: f64,
    pub sample: Sample,
}

impl PlotPoint {
    pub fn sample_id(&self) -> SampleId {
        self.sample.id
    }
}

/// Signal records embed a full sample; only its id takes part in the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRef {
    pub id: SampleId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMeasurement {
    pub signal: f64,
    pub sample: SampleRef,
    pub target: Target,
}

/// The three collections of one load, held read-only for the view session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub points: Vec<PlotPoint>,
    pub signals: Vec<SignalMeasurement>,
    pub targets: Vec<Target>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|target| target.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plot_point_decodes_backend_shape() {
        let raw = json!({
            "id": 11,
            "x_coor": 1.5,
            "y_coor": -2.25,
            "sample": {
                "id": 5,
                "metadata": {
                    "donor": "D1",
                    "buffer": "PBS",
                    "incubation time (hr)": 4,
                    "operator": "ignored"
                },
                "dataset": { "id": 2, "name": "Screen B" },
                "plate_barcode": "PB-001",
                "well_id": "A01"
            }
        });

        let point: PlotPoint = serde_json::from_value(raw).unwrap();
        assert_eq!(point.sample_id(), 5);
        assert_eq!(point.x_coor, 1.5);
        assert_eq!(point.sample.metadata.incubation_time.hours(), 4.0);
        assert_eq!(point.sample.dataset.name.as_deref(), Some("Screen B"));
        assert_eq!(point.sample.well_id.as_deref(), Some("A01"));
    }

    #[test]
    fn signal_only_needs_sample_id() {
        let raw = json!({
            "id": 1,
            "signal": 3.2,
            "sample": { "id": 5, "metadata": {}, "dataset": { "id": 1 } },
            "target": { "id": 7, "name": "IFNG" }
        });

        let signal: SignalMeasurement = serde_json::from_value(raw).unwrap();
        assert_eq!(signal.sample.id, 5);
        assert_eq!(signal.target.id, 7);
        assert_eq!(signal.signal, 3.2);
    }

    #[test]
    fn missing_incubation_time_is_rejected() {
        let raw = json!({
            "x_coor": 0.0,
            "y_coor": 0.0,
            "sample": {
                "id": 1,
                "metadata": { "donor": "D1", "buffer": "PBS" },
                "dataset": { "id": 1 }
            }
        });

        assert!(serde_json::from_value::<PlotPoint>(raw).is_err());
    }

    #[test]
    fn incubation_hours_order_numerically() {
        let mut hours: Vec<IncubationHours> =
            [24.0, 0.5, 4.0, -0.0].into_iter().map(IncubationHours::new).collect();
        hours.sort();
        let plain: Vec<f64> = hours.iter().map(|h| h.hours()).collect();
        assert_eq!(plain, vec![0.0, 0.5, 4.0, 24.0]);
        assert_eq!(IncubationHours::new(-0.0), IncubationHours::new(0.0));
    }
}
