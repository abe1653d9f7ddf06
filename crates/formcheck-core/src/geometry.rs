//! Geometric utilities: bounding-box normalization and joint angles.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Point2D, Pose};

/// Guard added to denominators so degenerate geometry yields a finite value.
pub const EPSILON: f64 = 1e-6;

/// Axis-aligned bounding box in 2D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox2D {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut points = points.into_iter().peekable();
        points.peek()?;

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(Point2D::new(min_x, min_y), Point2D::new(max_x, max_y)))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Map a point into the unit square spanned by this box.
    ///
    /// Each axis is divided by `extent + EPSILON`, so a zero-width or
    /// zero-height box maps everything onto 0 along that axis.
    pub fn to_unit(&self, point: Point2D) -> Point2D {
        Point2D::new(
            (point.x - self.min.x) / (self.width() + EPSILON),
            (point.y - self.min.y) / (self.height() + EPSILON),
        )
    }
}

/// Rescale a pose into its own bounding box.
///
/// Removes translation and scale so that a reference recorded once and a
/// live capture at a different camera distance become comparable. Values
/// land in [0, 1]; the maximum on each axis sits just under 1.
pub fn normalize(pose: &Pose) -> Result<Pose> {
    let points: Vec<Point2D> = pose.iter().map(|(_, p)| p).collect();
    let bbox = BoundingBox2D::from_points(&points).ok_or(Error::EmptyPose)?;

    Ok(pose.map_points(|p| bbox.to_unit(p)))
}

/// Interior angle at `vertex` between the rays towards `a` and `b`, in degrees.
///
/// Result is in [0, 180]. When `a` or `b` coincides with the vertex the
/// cosine collapses to 0 and the angle reads 90.
pub fn angle(a: Point2D, vertex: Point2D, b: Point2D) -> f64 {
    let ba = a.to_nalgebra() - vertex.to_nalgebra();
    let bc = b.to_nalgebra() - vertex.to_nalgebra();

    let cosine = ba.dot(&bc) / (ba.norm() * bc.norm() + EPSILON);
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}
