//! Building a rectangular bay from one drag and a bay height.

use super::segments::{decompose, Segment};
use crate::catalog::MIN_LENGTH_MM;
use crate::shapes::{coincides, unit_direction};
use crate::tools::ComponentSelection;
use crate::units::{mm_to_pixels, pixels_to_mm};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for structures.
pub type StructureId = Uuid;

/// A side within this many millimeters of the bay height is one member.
pub const BAY_HEIGHT_TOLERANCE_MM: f64 = 10.0;

/// Two joint positions closer than this on both axes are the same joint.
pub const JOINT_TOLERANCE_PX: f64 = 1.0;

/// One rectangular scaffold bay.
///
/// `top_left → top_right` is the drag; the bottom side is the drag shifted
/// by the bay height along the drag rotated 90°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    /// Drag length in millimeters (unrounded).
    pub width_mm: f64,
    /// Configured bay height in millimeters.
    pub height_mm: u32,
    /// Top run followed by bottom run.
    pub horizontal_segments: Vec<Segment>,
    /// Left side, right side, then interior verticals.
    pub vertical_segments: Vec<Segment>,
}

impl Structure {
    /// The four corners: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// A structure without members must not be committed.
    pub fn is_empty(&self) -> bool {
        self.horizontal_segments.is_empty() && self.vertical_segments.is_empty()
    }

    /// All members, horizontal first.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.horizontal_segments
            .iter()
            .chain(self.vertical_segments.iter())
    }

    /// Number of members.
    pub fn segment_count(&self) -> usize {
        self.horizontal_segments.len() + self.vertical_segments.len()
    }
}

/// Lay out a bay from a drag along its top side.
///
/// A drag too short for any catalog member produces a structure with no
/// members at all; callers check [`Structure::is_empty`].
pub fn build_structure(
    start: Point,
    end: Point,
    bay_height_mm: u32,
    component: ComponentSelection,
) -> Structure {
    let height_px = mm_to_pixels(f64::from(bay_height_mm));
    // perp = (-dir.y, dir.x); a degenerate drag collapses the bay.
    let perp = unit_direction(start, end)
        .map(|dir| Vec2::new(-dir.y, dir.x))
        .unwrap_or(Vec2::ZERO);
    let offset = perp * height_px;

    let mut structure = Structure {
        id: Uuid::new_v4(),
        top_left: start,
        top_right: end,
        bottom_left: start + offset,
        bottom_right: end + offset,
        width_mm: pixels_to_mm(start.distance(end)),
        height_mm: bay_height_mm,
        horizontal_segments: Vec::new(),
        vertical_segments: Vec::new(),
    };

    let mut horizontal = decompose(
        structure.top_left,
        structure.top_right,
        component,
        bay_height_mm,
    );
    horizontal.extend(decompose(
        structure.bottom_left,
        structure.bottom_right,
        component,
        bay_height_mm,
    ));
    if horizontal.is_empty() {
        return structure;
    }

    let mut vertical = decompose_bay_side(
        structure.top_left,
        structure.bottom_left,
        bay_height_mm,
        component,
    );
    vertical.extend(decompose_bay_side(
        structure.top_right,
        structure.bottom_right,
        bay_height_mm,
        component,
    ));
    vertical.extend(interior_verticals(
        &horizontal,
        &structure.corners(),
        offset,
        bay_height_mm,
    ));

    structure.horizontal_segments = horizontal;
    structure.vertical_segments = vertical;
    structure
}

/// One side of the bay between two corners.
///
/// When the corner distance is within [`BAY_HEIGHT_TOLERANCE_MM`] of the bay
/// height the side is a single member of exactly that height; otherwise it is
/// decomposed like any other drag.
pub fn decompose_bay_side(
    start: Point,
    end: Point,
    bay_height_mm: u32,
    component: ComponentSelection,
) -> Vec<Segment> {
    let actual_mm = pixels_to_mm(start.distance(end));
    if (actual_mm - f64::from(bay_height_mm)).abs() < BAY_HEIGHT_TOLERANCE_MM {
        vec![Segment::new(start, end, bay_height_mm)]
    } else {
        decompose(start, end, component, bay_height_mm)
    }
}

/// Full-height verticals at joints where two horizontal members meet.
///
/// Corners are skipped (the sides already cover them), as are dangling
/// ends that no other member touches. Joints on both runs get a vertical
/// running along `offset`; a joint shared by two members gets only one.
fn interior_verticals(
    horizontal: &[Segment],
    corners: &[Point; 4],
    offset: Vec2,
    bay_height_mm: u32,
) -> Vec<Segment> {
    let mut verticals: Vec<Segment> = Vec::new();

    for (i, segment) in horizontal.iter().enumerate() {
        if segment.length_mm < MIN_LENGTH_MM {
            continue;
        }
        for joint in [segment.start, segment.end] {
            if corners.iter().any(|&c| coincides(joint, c, JOINT_TOLERANCE_PX)) {
                continue;
            }
            let connected = horizontal.iter().enumerate().any(|(j, other)| {
                j != i
                    && (coincides(other.start, joint, JOINT_TOLERANCE_PX)
                        || coincides(other.end, joint, JOINT_TOLERANCE_PX))
            });
            if !connected {
                continue;
            }
            let served = verticals
                .iter()
                .any(|v| coincides(v.start, joint, JOINT_TOLERANCE_PX));
            if served {
                continue;
            }
            verticals.push(Segment::new(joint, joint + offset, bay_height_mm));
        }
    }

    verticals
}
