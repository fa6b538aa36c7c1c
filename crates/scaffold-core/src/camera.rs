//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%".
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Smallest allowed zoom.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom.
pub const MAX_ZOOM: f64 = 5.0;

/// Increment applied by [`Camera::zoom_in`] and [`Camera::zoom_out`].
pub const ZOOM_STEP: f64 = 0.05;

/// Two-finger pinch in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Pinch {
    initial_zoom: f64,
    initial_distance: f64,
}

/// Camera manages the view transform for the canvas.
///
/// Screen coordinates relate to canvas coordinates by
/// `screen = canvas * zoom + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
    #[serde(skip)]
    pinch: Option<Pinch>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            pinch: None,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at the given zoom, clamped to the allowed range.
    pub fn with_zoom(zoom: f64) -> Self {
        let mut camera = Self::default();
        camera.set_zoom(zoom);
        camera
    }

    /// Transform from canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Transform from screen coordinates to canvas coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Return to 100% without touching the pan offset.
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    /// Record the finger distance at the start of a pinch.
    pub fn begin_pinch(&mut self, distance: f64) {
        if distance > 0.0 {
            self.pinch = Some(Pinch {
                initial_zoom: self.zoom,
                initial_distance: distance,
            });
        }
    }

    /// Scale the zoom recorded at [`Camera::begin_pinch`] by the distance ratio.
    pub fn update_pinch(&mut self, distance: f64) {
        if let Some(pinch) = self.pinch {
            self.set_zoom(pinch.initial_zoom * distance / pinch.initial_distance);
        }
    }

    pub fn end_pinch(&mut self) {
        self.pinch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let canvas = camera.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < 1e-10);
        assert!((canvas.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.canvas_to_screen(camera.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.set_zoom(0.001);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        camera.set_zoom(1000.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        assert!((Camera::with_zoom(9.0).zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_steps() {
        let mut camera = Camera::new();
        camera.zoom_in();
        camera.zoom_in();
        assert!((camera.zoom - 1.1).abs() < 1e-9);
        camera.zoom_out();
        assert!((camera.zoom - 1.05).abs() < 1e-9);
        camera.reset_zoom();
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);

        camera.set_zoom(MIN_ZOOM);
        camera.zoom_out();
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pinch() {
        let mut camera = Camera::with_zoom(2.0);
        camera.begin_pinch(100.0);
        camera.update_pinch(150.0);
        assert!((camera.zoom - 3.0).abs() < 1e-9);
        camera.update_pinch(10.0);
        assert!((camera.zoom - 0.2).abs() < 1e-9);
        camera.update_pinch(1000.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);

        camera.end_pinch();
        camera.update_pinch(100.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.pan(Vec2::new(-5.0, 0.0));
        assert!((camera.offset.x - 5.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
