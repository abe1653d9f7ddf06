//! Per-exercise CSV column naming.

use formcheck_core::{Error, JointName, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Joint → column prefix; a joint reads from `{prefix}_x` and `{prefix}_y`
pub type ColumnMap = BTreeMap<JointName, String>;

/// Column maps for every supported pose type
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMaps {
    maps: HashMap<String, ColumnMap>,
}

impl ColumnMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps for the recordings shipped with the app (`squat`, `cat`)
    pub fn builtin() -> Self {
        use JointName::*;

        let mut maps = Self::new();
        maps.insert(
            "squat",
            [
                (Nose, "Head"),
                (LeftShoulder, "LS"),
                (RightShoulder, "RS"),
                (LeftElbow, "LE"),
                (RightElbow, "RE"),
                (LeftWrist, "LW"),
                (RightWrist, "RW"),
                (LeftHip, "LH"),
                (RightHip, "RH"),
                (LeftKnee, "LK"),
                (RightKnee, "RK"),
                (LeftAnkle, "LA"),
                (RightAnkle, "RA"),
            ],
        );
        // "Rknee" matches the header of the recorded file
        maps.insert(
            "cat",
            [
                (Nose, "Head"),
                (LeftShoulder, "LShoulder"),
                (RightShoulder, "RShoulder"),
                (LeftElbow, "LElbow"),
                (RightElbow, "RElbow"),
                (LeftWrist, "LWrist"),
                (RightWrist, "RWrist"),
                (LeftHip, "LHip"),
                (RightHip, "RHip"),
                (LeftKnee, "LKnee"),
                (RightKnee, "Rknee"),
                (LeftAnkle, "LAnkle"),
                (RightAnkle, "RAnkle"),
            ],
        );
        maps
    }

    pub fn insert<'a>(
        &mut self,
        pose_type: impl Into<String>,
        columns: impl IntoIterator<Item = (JointName, &'a str)>,
    ) {
        let map = columns
            .into_iter()
            .map(|(joint, prefix)| (joint, prefix.to_string()))
            .collect();
        self.maps.insert(pose_type.into(), map);
    }

    /// Add or replace maps; entries in `other` win
    pub fn merge(mut self, other: ColumnMaps) -> Self {
        self.maps.extend(other.maps);
        self
    }

    pub fn get(&self, pose_type: &str) -> Result<&ColumnMap> {
        self.maps
            .get(pose_type)
            .ok_or_else(|| Error::UnknownPoseType(pose_type.to_string()))
    }

    pub fn pose_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}
