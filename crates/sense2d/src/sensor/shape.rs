//! Footprint overrides for registered shapes
//!
//! A registration's default footprint is the boundary its owner reports.
//! Owners can override that approximation with a circle or an inflated box;
//! the override travels on the registration record as a tagged variant and
//! the hit tester pattern-matches on it instead of consulting a side table.

use crate::foundation::math::{Point2, Vec2, EPSILON};

/// Footprint approximation attached to a registration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Footprint {
    /// Use the reported boundary as-is
    #[default]
    Bounds,
    /// Replace the footprint with a circle around the boundary center
    Circle {
        /// Circle radius in world units
        radius: f32,
    },
    /// Push every corner outward from the centroid by a diagonal margin
    Inflate {
        /// Outward shift applied along each centroid-to-corner direction
        margin: f32,
    },
}

impl Footprint {
    /// Derive a footprint from optional shape dimensions.
    ///
    /// Both dimensions present select a box margin of `sqrt(w² + h²)`; a
    /// width alone selects a circle of that radius; neither leaves the plain
    /// boundary. Missing dimensions are treated permissively as no override.
    pub fn from_size(width: Option<f32>, height: Option<f32>) -> Self {
        match (width, height) {
            (Some(w), Some(h)) => Self::Inflate {
                margin: (w * w + h * h).sqrt(),
            },
            (Some(w), None) => Self::Circle { radius: w },
            (None, _) => Self::Bounds,
        }
    }

    /// Circle radius when this footprint is a circle override
    pub fn circle_radius(&self) -> Option<f32> {
        match self {
            Self::Circle { radius } => Some(*radius),
            _ => None,
        }
    }
}

/// Push every point outward from the set's centroid by `margin`.
///
/// Points coincident with the centroid have no outward direction and stay
/// in place.
pub(crate) fn inflate_points(points: &mut [Point2], margin: f32) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f32;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in points.iter() {
        cx += p.x;
        cy += p.y;
    }
    let centroid = Point2::new(cx / n, cy / n);

    for p in points.iter_mut() {
        let dir: Vec2 = *p - centroid;
        let len = dir.magnitude();
        if len > EPSILON {
            *p += dir * (margin / len);
        }
    }
}
