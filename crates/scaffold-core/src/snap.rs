//! Snapping and hit-testing against committed strokes and posts.
//!
//! Every radius here is in screen pixels and is divided by the current zoom,
//! so the feel stays the same at any magnification.

use crate::scaffold::SupportPost;
use crate::shapes::Stroke;
use kurbo::Point;

/// Endpoint snap radius in screen pixels.
pub const ENDPOINT_SNAP_RADIUS: f64 = 5.0;

/// Eraser reach for strokes in screen pixels.
pub const STROKE_HIT_RADIUS: f64 = 3.0;

/// Eraser reach for posts in screen pixels.
pub const POST_HIT_RADIUS: f64 = 5.0;

/// Nearest first-or-last stroke point within the snap radius.
///
/// Returns `None` when snapping is disabled or nothing is close enough.
pub fn find_nearest_endpoint(
    point: Point,
    strokes: &[Stroke],
    enabled: bool,
    zoom: f64,
) -> Option<Point> {
    if !enabled {
        return None;
    }
    let radius = ENDPOINT_SNAP_RADIUS / zoom;

    let mut nearest: Option<(Point, f64)> = None;
    for (first, last) in strokes.iter().filter_map(Stroke::endpoints) {
        for candidate in [first, last] {
            let dist = candidate.distance(point);
            if dist < radius && nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((candidate, dist));
            }
        }
    }

    if let Some((snapped, _)) = nearest {
        log::trace!(
            "snapped ({:.1}, {:.1}) to endpoint ({:.1}, {:.1})",
            point.x,
            point.y,
            snapped.x,
            snapped.y
        );
    }
    nearest.map(|(p, _)| p)
}

/// Index of the most recently added stroke passing within the hit radius.
pub fn find_stroke_at_point(point: Point, strokes: &[Stroke], zoom: f64) -> Option<usize> {
    let radius = STROKE_HIT_RADIUS / zoom;
    strokes.iter().rposition(|s| s.hit_test(point, radius))
}

/// Index of the most recently added post whose center is within the hit radius.
pub fn find_support_post_at_point(point: Point, posts: &[SupportPost], zoom: f64) -> Option<usize> {
    let radius = POST_HIT_RADIUS / zoom;
    posts
        .iter()
        .rposition(|p| p.center.distance(point) <= radius)
}

/// Force `current` onto the horizontal or vertical through `start`,
/// whichever axis carries the larger delta.
pub fn calculate_right_angle_point(start: Point, current: Point) -> Point {
    let dx = (current.x - start.x).abs();
    let dy = (current.y - start.y).abs();
    if dx > dy {
        Point::new(current.x, start.y)
    } else {
        Point::new(start.x, current.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    fn line(a: (f64, f64), b: (f64, f64)) -> Stroke {
        Stroke::segment(a.into(), b.into(), SerializableColor::black(), 2.0)
    }

    #[test]
    fn test_snap_to_nearby_endpoint() {
        let strokes = vec![line((10.0, 10.0), (100.0, 10.0))];
        let snapped = find_nearest_endpoint(Point::new(12.0, 11.0), &strokes, true, 1.0);
        assert_eq!(snapped, Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_snap_disabled() {
        let strokes = vec![line((10.0, 10.0), (100.0, 10.0))];
        assert_eq!(find_nearest_endpoint(Point::new(12.0, 11.0), &strokes, false, 1.0), None);
    }

    #[test]
    fn test_snap_radius_scales_with_zoom() {
        let strokes = vec![line((10.0, 10.0), (100.0, 10.0))];
        let cursor = Point::new(13.0, 10.0);
        assert!(find_nearest_endpoint(cursor, &strokes, true, 1.0).is_some());
        assert!(find_nearest_endpoint(cursor, &strokes, true, 2.0).is_none());
    }

    #[test]
    fn test_snap_picks_nearest() {
        let strokes = vec![
            line((10.0, 10.0), (50.0, 10.0)),
            line((13.0, 10.0), (13.0, 90.0)),
        ];
        let snapped = find_nearest_endpoint(Point::new(12.5, 10.0), &strokes, true, 1.0);
        assert_eq!(snapped, Some(Point::new(13.0, 10.0)));
    }

    #[test]
    fn test_snap_ignores_interior_points() {
        let ink = Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0), Point::new(100.0, 0.0)],
            SerializableColor::black(),
            2.0,
        );
        assert!(find_nearest_endpoint(Point::new(51.0, 50.0), &[ink], true, 1.0).is_none());
    }

    #[test]
    fn test_find_stroke_newest_first() {
        let strokes = vec![line((0.0, 0.0), (100.0, 0.0)), line((0.0, 1.0), (100.0, 1.0))];
        assert_eq!(find_stroke_at_point(Point::new(50.0, 0.5), &strokes, 1.0), Some(1));
        assert_eq!(find_stroke_at_point(Point::new(50.0, -2.5), &strokes, 1.0), Some(0));
        assert_eq!(find_stroke_at_point(Point::new(50.0, 10.0), &strokes, 1.0), None);
    }

    #[test]
    fn test_find_stroke_past_segment_end() {
        let strokes = vec![line((0.0, 0.0), (100.0, 0.0))];
        assert_eq!(find_stroke_at_point(Point::new(102.0, 0.0), &strokes, 1.0), Some(0));
        assert_eq!(find_stroke_at_point(Point::new(104.0, 0.0), &strokes, 1.0), None);
    }

    #[test]
    fn test_find_post() {
        let posts = vec![
            SupportPost::new(Point::new(0.0, 0.0)),
            SupportPost::new(Point::new(2.0, 0.0)),
        ];
        assert_eq!(find_support_post_at_point(Point::new(1.0, 0.0), &posts, 1.0), Some(1));
        assert_eq!(find_support_post_at_point(Point::new(-4.0, 0.0), &posts, 1.0), Some(0));
        assert_eq!(find_support_post_at_point(Point::new(-4.0, 0.0), &posts, 2.0), None);
    }

    #[test]
    fn test_right_angle_point() {
        let start = Point::new(0.0, 0.0);
        assert_eq!(
            calculate_right_angle_point(start, Point::new(10.0, 3.0)),
            Point::new(10.0, 0.0)
        );
        assert_eq!(
            calculate_right_angle_point(start, Point::new(-2.0, -9.0)),
            Point::new(0.0, -9.0)
        );
        // Ties go vertical.
        assert_eq!(calculate_right_angle_point(start, Point::new(5.0, 5.0)), Point::new(0.0, 5.0));
    }
}
