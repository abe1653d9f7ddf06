//! Reference pose records and lookup criteria.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Exercise categories offered by the app
pub const CATEGORY_CROSSFIT: &str = "크로스핏";
pub const CATEGORY_YOGA: &str = "요가";

pub const KNOWN_CATEGORIES: &[&str] = &[CATEGORY_CROSSFIT, CATEGORY_YOGA];

/// Where the canonical pose for an exercise is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePoseRecord {
    /// Exercise category, e.g. `요가`
    pub category: String,
    /// Internal pose identifier, e.g. `squat`; also selects the column map
    pub pose_type: String,
    /// Name shown to the user, e.g. `고양이 자세`
    pub name: String,
    /// CSV file holding the recording
    pub csv_path: PathBuf,
    /// Zero-based data row (header excluded)
    pub row_index: usize,
}

impl ReferencePoseRecord {
    pub fn new(
        category: impl Into<String>,
        pose_type: impl Into<String>,
        name: impl Into<String>,
        csv_path: impl Into<PathBuf>,
        row_index: usize,
    ) -> Self {
        Self {
            category: category.into(),
            pose_type: pose_type.into(),
            name: name.into(),
            csv_path: csv_path.into(),
            row_index,
        }
    }

    pub fn matches(&self, query: &PoseQuery) -> bool {
        self.pose_type == query.pose_type
            && query
                .category
                .as_deref()
                .map_or(true, |category| self.category == category)
    }

    pub fn has_known_category(&self) -> bool {
        KNOWN_CATEGORIES.contains(&self.category.as_str())
    }
}

impl fmt::Display for ReferencePoseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.category, self.pose_type, self.name)
    }
}

/// Lookup criteria; a `None` category matches every category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseQuery {
    pub pose_type: String,
    pub category: Option<String>,
}

impl PoseQuery {
    pub fn by_pose_type(pose_type: impl Into<String>) -> Self {
        Self {
            pose_type: pose_type.into(),
            category: None,
        }
    }

    pub fn new(pose_type: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pose_type: pose_type.into(),
            category: Some(category.into()),
        }
    }
}

impl fmt::Display for PoseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "pose_type={} category={}", self.pose_type, category),
            None => write!(f, "pose_type={}", self.pose_type),
        }
    }
}
