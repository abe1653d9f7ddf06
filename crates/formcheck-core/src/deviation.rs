//! Joint-angle deviation between a reference pose and a user pose.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::geometry::angle;
use crate::types::{JointName, Pose};

/// Interior angle to measure at `vertex`, using the rays towards `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleTriple {
    pub vertex: JointName,
    pub a: JointName,
    pub b: JointName,
}

impl AngleTriple {
    pub const fn new(vertex: JointName, a: JointName, b: JointName) -> Self {
        Self { vertex, a, b }
    }

    /// Angle at the vertex, or `None` if any of the three joints is absent.
    pub fn measure(&self, pose: &Pose) -> Option<f64> {
        let a = pose.get(self.a)?;
        let vertex = pose.get(self.vertex)?;
        let b = pose.get(self.b)?;
        Some(angle(*a, *vertex, *b))
    }
}

/// Exercise-independent set of angles compared for every pose
pub const ANGLE_CATALOG: [AngleTriple; 9] = {
    use crate::types::JointName::*;
    [
        AngleTriple::new(LeftElbow, LeftShoulder, LeftWrist),
        AngleTriple::new(RightElbow, RightShoulder, RightWrist),
        AngleTriple::new(LeftShoulder, LeftElbow, LeftHip),
        AngleTriple::new(RightShoulder, RightElbow, RightHip),
        AngleTriple::new(LeftKnee, LeftHip, LeftAnkle),
        AngleTriple::new(RightKnee, RightHip, RightAnkle),
        AngleTriple::new(LeftHip, LeftKnee, LeftShoulder),
        AngleTriple::new(RightHip, RightKnee, RightShoulder),
        AngleTriple::new(Nose, LeftShoulder, RightShoulder),
    ]
};

/// Per-vertex angle difference in degrees; `None` marks a missing joint
///
/// Entries keep the order in which their vertex first appeared in the
/// catalog. Serializes as a JSON object with `null` for missing entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviationReport {
    entries: Vec<(JointName, Option<f64>)>,
}

impl DeviationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `vertex`, replacing any earlier value in place.
    pub fn set(&mut self, vertex: JointName, deviation: Option<f64>) {
        match self.entries.iter_mut().find(|(joint, _)| *joint == vertex) {
            Some(entry) => entry.1 = deviation,
            None => self.entries.push((vertex, deviation)),
        }
    }

    /// `None` if `vertex` has no entry, `Some(None)` if it is missing.
    pub fn get(&self, vertex: JointName) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|(joint, _)| *joint == vertex)
            .map(|(_, deviation)| *deviation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointName, Option<f64>)> + '_ {
        self.entries.iter().copied()
    }

    pub fn joints(&self) -> Vec<JointName> {
        self.entries.iter().map(|(joint, _)| *joint).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|(_, deviation)| *deviation).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.iter().filter(|(_, d)| d.is_none()).count()
    }

    /// Largest present deviation
    pub fn max_deviation(&self) -> Option<(JointName, f64)> {
        self.entries
            .iter()
            .filter_map(|(joint, d)| d.map(|d| (*joint, d)))
            .max_by(|x, y| x.1.total_cmp(&y.1))
    }
}

impl Serialize for DeviationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (joint, deviation) in &self.entries {
            map.serialize_entry(joint, deviation)?;
        }
        map.end()
    }
}

/// Compare two poses over the default [`ANGLE_CATALOG`].
///
/// Both poses are expected to be normalized already.
pub fn deviations(reference: &Pose, user: &Pose) -> DeviationReport {
    deviations_with(&ANGLE_CATALOG, reference, user)
}

/// Compare two poses over an arbitrary catalog.
///
/// A triple whose joints are not all present in both poses reports `None`.
/// If a vertex repeats, the later triple wins.
pub fn deviations_with(catalog: &[AngleTriple], reference: &Pose, user: &Pose) -> DeviationReport {
    let mut report = DeviationReport::new();

    for triple in catalog {
        let deviation = match (triple.measure(reference), triple.measure(user)) {
            (Some(ref_angle), Some(user_angle)) => Some(round2((ref_angle - user_angle).abs())),
            _ => None,
        };
        report.set(triple.vertex, deviation);
    }

    report
}

/// Two decimals, rounding the exact binary value with ties to even
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
