//! Polyline strokes: freehand ink and committed scaffold members.

use super::{point_to_polyline_dist, SerializableColor};
use crate::units::rounded_mm;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A polyline drawn on the canvas.
///
/// Two-point strokes are straight members; longer sequences are freehand ink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Points in canvas pixel space.
    pub points: Vec<Point>,
    pub color: SerializableColor,
    /// Line width in canvas pixels.
    pub size: f64,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Stroke {
    /// Create a stroke from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            size,
            timestamp: now_millis(),
        }
    }

    /// Create a straight two-point stroke.
    pub fn segment(start: Point, end: Point, color: SerializableColor, size: f64) -> Self {
        Self::from_points(vec![start, end], color, size)
    }

    /// Check if this is a straight two-point stroke.
    pub fn is_segment(&self) -> bool {
        self.points.len() == 2
    }

    /// First and last point, if any.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.points.first()?, *self.points.last()?))
    }

    /// Rounded length in millimeters of a two-point stroke.
    pub fn length_mm(&self) -> Option<u32> {
        match self.points.as_slice() {
            [a, b] => Some(rounded_mm(a.distance(*b))),
            _ => None,
        }
    }

    /// Two-point stroke running vertically on screen (x agrees within 1 px).
    pub fn is_vertical_segment(&self) -> bool {
        match self.points.as_slice() {
            [a, b] => (b.x - a.x).abs() < 1.0,
            _ => false,
        }
    }

    /// Whether `point` lies within `tolerance` of any piece of the polyline.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance
    }

    /// Bounding box of all points.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p)),
        )
    }
}
