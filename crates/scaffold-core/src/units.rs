//! Fixed display scale between canvas pixels and real-world millimeters.
//!
//! 96 canvas pixels represent 300 mm at 100% zoom.

/// Millimeters per canvas pixel.
pub const MM_PER_PIXEL: f64 = 300.0 / 96.0;

/// Convert a canvas pixel distance to millimeters.
pub fn pixels_to_mm(px: f64) -> f64 {
    px * MM_PER_PIXEL
}

/// Convert a millimeter distance to canvas pixels.
pub fn mm_to_pixels(mm: f64) -> f64 {
    mm / MM_PER_PIXEL
}

/// Pixel distance converted to millimeters and rounded to the nearest integer.
pub fn rounded_mm(px: f64) -> u32 {
    pixels_to_mm(px).round().max(0.0) as u32
}
