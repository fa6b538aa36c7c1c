//! Support posts at structural joints.
//!
//! Two placement rules exist and they de-duplicate against existing posts
//! with different radii: corner-only placement rejects a candidate within
//! `2 × radius` of an existing post, all-joints placement within
//! `1.5 × radius`. Both thresholds are kept as-is until product decides
//! which one is intended.

use super::structure::{Structure, JOINT_TOLERANCE_PX};
use crate::catalog::MIN_LENGTH_MM;
use crate::shapes::{coincides, Stroke};
use crate::units::MM_PER_PIXEL;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for support posts.
pub type PostId = Uuid;

/// Real-world post diameter in millimeters.
pub const POST_DIAMETER_MM: f64 = 130.0;

/// Post radius in canvas pixels.
pub const POST_RADIUS_PX: f64 = POST_DIAMETER_MM / 2.0 / MM_PER_PIXEL;

/// Corner-only placement rejects candidates within this many radii.
pub const CORNER_DEDUP_RADII: f64 = 2.0;

/// All-joints placement rejects candidates within this many radii.
pub const JOINT_DEDUP_RADII: f64 = 1.5;

/// A circular post marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportPost {
    pub id: PostId,
    pub center: Point,
    pub radius_px: f64,
}

impl SupportPost {
    /// Create a post of the standard radius.
    pub fn new(center: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_px: POST_RADIUS_PX,
        }
    }
}

fn any_post_within(posts: &[SupportPost], point: Point, distance: f64) -> bool {
    posts.iter().any(|post| post.center.distance(point) < distance)
}

/// Posts at the four corners of a structure, skipping any corner that
/// already has a post within `2 × radius`.
pub fn create_support_posts(structure: &Structure, existing: &[SupportPost]) -> Vec<SupportPost> {
    structure
        .corners()
        .into_iter()
        .filter(|&corner| !any_post_within(existing, corner, POST_RADIUS_PX * CORNER_DEDUP_RADII))
        .map(SupportPost::new)
        .collect()
}

/// Posts at every member endpoint of a structure.
///
/// Endpoints closer than one radius are merged. A surviving point gets a post
/// only if no existing post lies within `1.5 × radius`, no existing two-point
/// vertical stroke already ends there, and some member of at least catalog
/// minimum length actually ends there.
pub fn create_all_support_posts(
    structure: &Structure,
    existing_posts: &[SupportPost],
    existing_strokes: &[Stroke],
) -> Vec<SupportPost> {
    let mut unique: Vec<Point> = Vec::new();
    for segment in structure.segments() {
        for point in [segment.start, segment.end] {
            if !unique.iter().any(|u| u.distance(point) < POST_RADIUS_PX) {
                unique.push(point);
            }
        }
    }

    unique
        .into_iter()
        .filter(|&point| {
            !any_post_within(existing_posts, point, POST_RADIUS_PX * JOINT_DEDUP_RADII)
        })
        .filter(|&point| !vertical_stroke_ends_at(existing_strokes, point))
        .filter(|&point| is_structural_joint(structure, point))
        .map(SupportPost::new)
        .collect()
}

fn vertical_stroke_ends_at(strokes: &[Stroke], point: Point) -> bool {
    strokes.iter().filter(|s| s.is_vertical_segment()).any(|s| {
        s.points
            .iter()
            .any(|&p| coincides(p, point, JOINT_TOLERANCE_PX))
    })
}

fn is_structural_joint(structure: &Structure, point: Point) -> bool {
    structure.segments().any(|segment| {
        (coincides(segment.start, point, JOINT_TOLERANCE_PX)
            || coincides(segment.end, point, JOINT_TOLERANCE_PX))
            && segment.length_mm >= MIN_LENGTH_MM
    })
}
