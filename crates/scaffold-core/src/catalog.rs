//! Catalog of standard scaffold member lengths and the matcher that maps an
//! arbitrary distance onto it.

use crate::shapes::SerializableColor;

/// Standard member lengths in millimeters, ascending.
pub const CATALOG_LENGTHS_MM: [u32; 6] = [293, 598, 902, 1207, 1512, 1817];

/// Shortest catalog member. Anything shorter is discarded.
pub const MIN_LENGTH_MM: u32 = 293;

/// Longest catalog member.
pub const MAX_LENGTH_MM: u32 = 1817;

/// A remaining distance within this many millimeters of a catalog length is
/// taken to mean exactly that length.
pub const EXACT_MATCH_TOLERANCE_MM: f64 = 50.0;

/// Slack for pixel↔mm round trips when deciding whether a member fits.
const FIT_EPSILON_MM: f64 = 1e-6;

fn fits(length: u32, remaining_mm: f64) -> bool {
    f64::from(length) <= remaining_mm + FIT_EPSILON_MM
}

/// Check if a length is one of the catalog lengths.
pub fn is_catalog_length(mm: u32) -> bool {
    CATALOG_LENGTHS_MM.contains(&mm)
}

/// Catalog length `<= remaining` with the smallest absolute difference,
/// together with that difference.
pub fn best_match(remaining_mm: f64) -> Option<(u32, f64)> {
    let mut best: Option<(u32, f64)> = None;
    for &length in &CATALOG_LENGTHS_MM {
        if !fits(length, remaining_mm) {
            continue;
        }
        let diff = (remaining_mm - f64::from(length)).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((length, diff)),
        }
    }
    best
}

/// Largest catalog length `<= remaining`.
pub fn greedy_match(remaining_mm: f64) -> Option<u32> {
    CATALOG_LENGTHS_MM
        .iter()
        .rev()
        .copied()
        .find(|&length| fits(length, remaining_mm))
}

/// Pick the next member length for a remaining distance.
///
/// Returns `None` once the remainder is below [`MIN_LENGTH_MM`]. A remainder
/// close to a catalog length snaps to it; otherwise the largest member that
/// fits is consumed first.
pub fn match_length(remaining_mm: f64) -> Option<u32> {
    if !fits(MIN_LENGTH_MM, remaining_mm) {
        return None;
    }
    match best_match(remaining_mm) {
        Some((length, diff)) if diff < EXACT_MATCH_TOLERANCE_MM => Some(length),
        _ => greedy_match(remaining_mm),
    }
}

/// Catalog length closest to `mm` after clamping into the catalog range.
pub fn nearest_catalog_length(mm: f64) -> u32 {
    let clamped = mm.clamp(f64::from(MIN_LENGTH_MM), f64::from(MAX_LENGTH_MM));
    CATALOG_LENGTHS_MM
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (f64::from(*a) - clamped).abs();
            let db = (f64::from(*b) - clamped).abs();
            da.total_cmp(&db)
        })
        .unwrap_or(MIN_LENGTH_MM)
}

/// Display color for a member of the given length. Non-catalog lengths are black.
pub fn length_color(mm: u32) -> SerializableColor {
    match mm {
        293 => SerializableColor::new(0xFF, 0x00, 0x00, 255),
        598 => SerializableColor::new(0xFF, 0x8C, 0x00, 255),
        902 => SerializableColor::new(0x32, 0xCD, 0x32, 255),
        1207 => SerializableColor::new(0x00, 0x80, 0xFF, 255),
        1512 => SerializableColor::new(0x8A, 0x2B, 0xE2, 255),
        1817 => SerializableColor::new(0xFF, 0x14, 0x93, 255),
        _ => SerializableColor::black(),
    }
}

/// Text label for a member length.
pub fn length_label(mm: u32) -> String {
    format!("{mm}mm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_minimum_has_no_match() {
        assert_eq!(match_length(0.0), None);
        assert_eq!(match_length(292.9), None);
        assert_eq!(match_length(183.0), None);
    }

    #[test]
    fn test_exact_lengths_match_themselves() {
        for &length in &CATALOG_LENGTHS_MM {
            assert_eq!(match_length(f64::from(length)), Some(length));
        }
    }

    #[test]
    fn test_close_match_snaps() {
        assert_eq!(match_length(1840.0), Some(1817));
        assert_eq!(match_length(930.0), Some(902));
    }

    #[test]
    fn test_far_match_consumes_largest() {
        assert_eq!(match_length(2000.0), Some(1817));
        assert_eq!(match_length(1100.0), Some(902));
    }

    #[test]
    fn test_round_trip_noise_still_fits() {
        assert_eq!(match_length(901.999_999_999_9), Some(902));
        assert_eq!(match_length(292.999_999_999_9), Some(293));
    }

    #[test]
    fn test_greedy_and_best() {
        assert_eq!(greedy_match(1500.0), Some(1207));
        assert_eq!(greedy_match(100.0), None);
        let (length, diff) = best_match(1210.0).unwrap();
        assert_eq!(length, 1207);
        assert!((diff - 3.0).abs() < 1e-9);
        assert!(best_match(10.0).is_none());
    }

    #[test]
    fn test_nearest_catalog_length() {
        assert_eq!(nearest_catalog_length(900.0), 902);
        assert_eq!(nearest_catalog_length(0.0), 293);
        assert_eq!(nearest_catalog_length(5000.0), 1817);
        assert_eq!(nearest_catalog_length(1300.0), 1207);
    }

    #[test]
    fn test_palette() {
        assert_eq!(length_color(293), SerializableColor::new(255, 0, 0, 255));
        assert_eq!(length_color(1817), SerializableColor::new(255, 20, 147, 255));
        assert_eq!(length_color(1000), SerializableColor::black());
        assert_eq!(length_label(902), "902mm");
    }
}
