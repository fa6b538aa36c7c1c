//! Splitting a drag into catalog members.

use crate::catalog::{length_color, match_length};
use crate::shapes::{unit_direction, Stroke};
use crate::tools::ComponentSelection;
use crate::units::{mm_to_pixels, pixels_to_mm, rounded_mm};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A straight structural member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    /// Length in millimeters.
    pub length_mm: u32,
}

impl Segment {
    pub fn new(start: Point, end: Point, length_mm: u32) -> Self {
        Self {
            start,
            end,
            length_mm,
        }
    }

    /// Length in canvas pixels.
    pub fn pixel_length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Committed form: a two-point stroke colored by length.
    pub fn to_stroke(&self, size: f64) -> Stroke {
        Stroke::segment(self.start, self.end, length_color(self.length_mm), size)
    }
}

/// Decompose a drag into members.
///
/// With a fixed-length component selected, exactly one member of that
/// length is emitted regardless of how far the pointer travelled. Otherwise
/// the drag is consumed piece by piece against the catalog; any remainder
/// shorter than the smallest member is dropped. A zero-length drag yields
/// nothing.
pub fn decompose(
    start: Point,
    end: Point,
    component: ComponentSelection,
    bay_height_mm: u32,
) -> Vec<Segment> {
    let Some(dir) = unit_direction(start, end) else {
        return Vec::new();
    };

    let Some(length_mm) = component.fixed_length_mm(bay_height_mm) else {
        return decompose_along(start, dir, pixels_to_mm(start.distance(end)));
    };
    // Vertical components ignore the drag direction and hang straight down.
    let along = match component {
        ComponentSelection::FixedVertical => Vec2::new(0.0, 1.0),
        _ => dir,
    };
    let seg_end = start + along * mm_to_pixels(f64::from(length_mm));
    vec![Segment::new(start, seg_end, length_mm)]
}

/// Catalog decomposition of `total_mm` starting at `start` along `dir`.
fn decompose_along(start: Point, dir: Vec2, total_mm: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut remaining_mm = total_mm;
    let mut current = start;

    while let Some(length_mm) = match_length(remaining_mm) {
        let seg_end = current + dir * mm_to_pixels(f64::from(length_mm));
        // length_mm is always the rounded distance actually covered.
        let actual_mm = rounded_mm(current.distance(seg_end));
        segments.push(Segment::new(current, seg_end, actual_mm));
        remaining_mm -= f64::from(actual_mm);
        current = seg_end;
    }

    segments
}
