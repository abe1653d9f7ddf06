//! Reference pose loading from CSV recordings.

use formcheck_core::{Error, Point2D, Pose, Result};
use std::path::Path;

use crate::columns::ColumnMaps;

/// Reads one recorded pose
pub trait PoseLoader: Send + Sync {
    fn load_pose_row(&self, path: &Path, row_index: usize, pose_type: &str) -> Result<Pose>;
}

/// Loads poses from CSV files with a header row
///
/// Each joint is read from the `{prefix}_x` / `{prefix}_y` column pair named
/// by the pose type's column map. Empty cells leave the joint out.
#[derive(Debug, Clone)]
pub struct CsvPoseLoader {
    column_maps: ColumnMaps,
}

impl CsvPoseLoader {
    pub fn new(column_maps: ColumnMaps) -> Self {
        Self { column_maps }
    }
}

impl Default for CsvPoseLoader {
    fn default() -> Self {
        Self::new(ColumnMaps::builtin())
    }
}

impl PoseLoader for CsvPoseLoader {
    fn load_pose_row(&self, path: &Path, row_index: usize, pose_type: &str) -> Result<Pose> {
        let column_map = self.column_maps.get(pose_type)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| csv_error(path, e))?;

        let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
        let column = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                Error::ReferenceData(format!("{}: missing column '{}'", path.display(), name))
            })
        };

        let row = reader
            .records()
            .nth(row_index)
            .ok_or_else(|| {
                Error::ReferenceData(format!(
                    "{}: row {} out of range",
                    path.display(),
                    row_index
                ))
            })?
            .map_err(|e| csv_error(path, e))?;

        let mut pose = Pose::new();
        for (joint, prefix) in column_map {
            let x_name = format!("{}_x", prefix);
            let y_name = format!("{}_y", prefix);
            let x = row.get(column(&x_name)?).unwrap_or("");
            let y = row.get(column(&y_name)?).unwrap_or("");

            if x.is_empty() || y.is_empty() {
                tracing::debug!("{}: no value for {} in row {}", path.display(), joint, row_index);
                continue;
            }

            pose.insert(
                *joint,
                Point2D::new(parse_cell(path, &x_name, x)?, parse_cell(path, &y_name, y)?),
            );
        }

        if pose.is_empty() {
            return Err(Error::ReferenceData(format!(
                "{}: row {} has no joint coordinates",
                path.display(),
                row_index
            )));
        }

        Ok(pose)
    }
}

fn parse_cell(path: &Path, column: &str, value: &str) -> Result<f64> {
    value.parse().map_err(|_| {
        Error::ReferenceData(format!(
            "{}: column '{}' holds non-numeric value '{}'",
            path.display(),
            column,
            value
        ))
    })
}

fn csv_error(path: &Path, e: csv::Error) -> Error {
    Error::ReferenceData(format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::JointName;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SQUAT_HEADER: &str = "frame,Head_x,Head_y,LS_x,LS_y,RS_x,RS_y,LE_x,LE_y,RE_x,RE_y,\
LW_x,LW_y,RW_x,RW_y,LH_x,LH_y,RH_x,RH_y,LK_x,LK_y,RK_x,RK_y,LA_x,LA_y,RA_x,RA_y";

    fn squat_row(frame: usize, shift: f64) -> String {
        let values: Vec<String> = (0..26)
            .map(|i| format!("{:.2}", i as f64 * 10.0 + shift))
            .collect();
        format!("{},{}", frame, values.join(","))
    }

    fn write_csv(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_selects_row() {
        let file = write_csv(&[
            SQUAT_HEADER.to_string(),
            squat_row(0, 0.0),
            squat_row(1, 5.0),
        ]);
        let loader = CsvPoseLoader::default();

        let pose = loader.load_pose_row(file.path(), 1, "squat").unwrap();

        assert_eq!(pose.len(), 13);
        assert_eq!(pose.get(JointName::Nose), Some(&Point2D::new(5.0, 15.0)));
        assert_eq!(pose.get(JointName::RightAnkle), Some(&Point2D::new(245.0, 255.0)));
    }

    #[test]
    fn test_row_out_of_range() {
        let file = write_csv(&[SQUAT_HEADER.to_string(), squat_row(0, 0.0)]);
        let loader = CsvPoseLoader::default();

        let result = loader.load_pose_row(file.path(), 3, "squat");
        assert!(matches!(result, Err(Error::ReferenceData(msg)) if msg.contains("out of range")));
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv(&["Head_x,Head_y".to_string(), "1.0,2.0".to_string()]);
        let loader = CsvPoseLoader::default();

        let result = loader.load_pose_row(file.path(), 0, "squat");
        assert!(matches!(result, Err(Error::ReferenceData(msg)) if msg.contains("LS_x")));
    }

    #[test]
    fn test_empty_cell_omits_joint() {
        let mut row = squat_row(0, 0.0);
        // Blank out Head_x
        row = row.replacen(",0.00,", ",,", 1);
        let file = write_csv(&[SQUAT_HEADER.to_string(), row]);
        let loader = CsvPoseLoader::default();

        let pose = loader.load_pose_row(file.path(), 0, "squat").unwrap();
        assert!(!pose.contains(JointName::Nose));
        assert_eq!(pose.len(), 12);
    }

    #[test]
    fn test_row_without_coordinates() {
        let blank_row = format!("0{}", ",".repeat(26));
        let file = write_csv(&[SQUAT_HEADER.to_string(), blank_row]);
        let loader = CsvPoseLoader::default();

        let result = loader.load_pose_row(file.path(), 0, "squat");
        assert!(matches!(result, Err(Error::ReferenceData(msg)) if msg.contains("no joint coordinates")));
    }

    #[test]
    fn test_non_numeric_cell() {
        let mut maps = ColumnMaps::new();
        maps.insert("tiny", [(JointName::Nose, "Head")]);
        let file = write_csv(&["Head_x,Head_y".to_string(), "abc,2.0".to_string()]);
        let loader = CsvPoseLoader::new(maps);

        let result = loader.load_pose_row(file.path(), 0, "tiny");
        assert!(matches!(result, Err(Error::ReferenceData(msg)) if msg.contains("non-numeric")));
    }

    #[test]
    fn test_unknown_pose_type() {
        let file = write_csv(&[SQUAT_HEADER.to_string(), squat_row(0, 0.0)]);
        let loader = CsvPoseLoader::default();

        let result = loader.load_pose_row(file.path(), 0, "plank");
        assert!(matches!(result, Err(Error::UnknownPoseType(_))));
    }

    #[test]
    fn test_missing_file() {
        let loader = CsvPoseLoader::default();
        let result = loader.load_pose_row(Path::new("/nonexistent/squat.csv"), 0, "squat");
        assert!(matches!(result, Err(Error::ReferenceData(_))));
    }
}
