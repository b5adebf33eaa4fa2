//! Math utilities and types
//!
//! Provides fundamental math types for 2D collision work, plus the small
//! geometry routines the rest of the engine is built from: point distance
//! and parametric line-segment intersection.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Numerical guard for parallel and degenerate geometry tests
pub(crate) const EPSILON: f32 = 0.000001;

/// Distance between two points
pub fn distance(a: Point2, b: Point2) -> f32 {
    (b - a).magnitude()
}

/// Proper parametric intersection test for two line segments.
///
/// Returns `true` only for a genuine crossing with both segment parameters
/// inside `[0, 1]`. Parallel, collinear, and zero-length inputs resolve to
/// `false`, as do NaN coordinates (every comparison fails), so degenerate
/// geometry can never turn into a spurious hit.
pub fn segments_intersect(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> bool {
    let d1 = a1 - a0;
    let d2 = b1 - b0;

    // Cross product of the directions; near-zero means parallel or a
    // zero-length segment. Written NaN-safe: a NaN determinant must reject.
    let denom = d1.x * d2.y - d1.y * d2.x;
    if !(denom.abs() > EPSILON) {
        return false;
    }

    let ox = b0.x - a0.x;
    let oy = b0.y - a0.y;
    let t = (ox * d2.y - oy * d2.x) / denom;
    let u = (ox * d1.y - oy * d1.x) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_relative_eq!(distance(a, b), 5.0);
    }

    #[test]
    fn test_segments_crossing() {
        // An X shape crosses at (5, 5)
        assert!(segments_intersect(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_disjoint() {
        assert!(!segments_intersect(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(1.0, 5.0),
        ));
    }

    #[test]
    fn test_segments_parallel_rejected() {
        // Collinear overlapping segments are not a proper crossing
        assert!(!segments_intersect(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_degenerate_rejected() {
        // Zero-length segment
        assert!(!segments_intersect(
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
        ));
    }

    #[test]
    fn test_segments_nan_rejected() {
        assert!(!segments_intersect(
            Point2::new(f32::NAN, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 0.0),
        ));
    }
}
