//! Work platform: a fixed-size deck drawn as a rectangle of strokes.

use super::{SerializableColor, Stroke};
use crate::units::mm_to_pixels;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Platform width in millimeters.
pub const PLATFORM_WIDTH_MM: f64 = 600.0;

/// Platform depth in millimeters.
pub const PLATFORM_HEIGHT_MM: f64 = 300.0;

/// Outline color for platforms (#6b7280).
pub const PLATFORM_COLOR: SerializableColor = SerializableColor {
    r: 0x6b,
    g: 0x72,
    b: 0x80,
    a: 255,
};

/// An axis-aligned platform anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub origin: Point,
}

impl Platform {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    /// Footprint in canvas pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (mm_to_pixels(PLATFORM_WIDTH_MM), mm_to_pixels(PLATFORM_HEIGHT_MM)),
        )
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Outline as four straight strokes: top, right, bottom, left.
    pub fn to_strokes(&self, size: f64) -> Vec<Stroke> {
        let c = self.corners();
        (0..4)
            .map(|i| Stroke::segment(c[i], c[(i + 1) % 4], PLATFORM_COLOR, size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_outline() {
        let platform = Platform::new(Point::new(10.0, 20.0));
        let strokes = platform.to_strokes(3.0);
        assert_eq!(strokes.len(), 4);
        assert_eq!(strokes[0].length_mm(), Some(600));
        assert_eq!(strokes[1].length_mm(), Some(300));
        assert_eq!(strokes[2].length_mm(), Some(600));
        assert_eq!(strokes[3].length_mm(), Some(300));
        assert!(strokes.iter().all(|s| s.color == PLATFORM_COLOR && s.size == 3.0));
        // Closed loop.
        assert_eq!(strokes[3].points[1], platform.origin);
    }
}
