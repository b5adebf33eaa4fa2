//! Per-cycle test geometry
//!
//! Registrations store persistent data; every check cycle turns an owner's
//! current boundary into a temporary [`Probe`] the hit tester consumes.
//! The probe is also where continuous-motion expansion happens: a shape whose
//! center moved at least [`SENSING_DISTANCE`] on either axis since the last
//! cycle is tested as the union of both sampled boundaries. That expansion is
//! the engine's only mitigation against tunneling; objects moving farther
//! than their own size in one tick would otherwise pass through targets
//! undetected by point-in-time testing alone.

use crate::foundation::math::Point2;
use crate::scene::{Boundary, Rect};

use super::shape::{inflate_points, Footprint};

/// Per-axis center displacement at which continuous-motion expansion applies
pub const SENSING_DISTANCE: f32 = 10.0;

/// Test geometry for one shape in one check cycle.
#[derive(Debug, Clone)]
pub struct Probe {
    rect: Rect,
    points: Vec<Point2>,
    circle: Option<f32>,
    expanded: bool,
}

impl Probe {
    /// Build the probe for `current`, expanding against the boundary cached
    /// from the previous cycle and applying the registration's footprint.
    ///
    /// Expansion happens first, so an inflate override pushes the expanded
    /// corner set outward and the enclosing rect is recomputed from it.
    pub fn compute(current: &Boundary, previous: Option<&Boundary>, footprint: Footprint) -> Self {
        let mut rect = current.rect;
        let mut points: Vec<Point2> = Vec::with_capacity(8);
        let mut expanded = false;

        if let Some(prev) = previous {
            let c0 = prev.rect.center();
            let c1 = current.rect.center();
            if (c1.x - c0.x).abs() >= SENSING_DISTANCE || (c1.y - c0.y).abs() >= SENSING_DISTANCE {
                expanded = true;
                rect = prev.rect.union(&current.rect);
                points.extend_from_slice(&prev.corners());
                points.extend_from_slice(&current.corners());
            }
        }
        if !expanded {
            points.extend_from_slice(&current.corners());
        }

        let mut circle = None;
        match footprint {
            Footprint::Bounds => {}
            Footprint::Circle { radius } => circle = Some(radius),
            Footprint::Inflate { margin } => {
                inflate_points(&mut points, margin);
                rect = Rect::from_points(&points);
            }
        }

        Self {
            rect,
            points,
            circle,
            expanded,
        }
    }

    /// Enclosing rect, expanded and inflated as applicable
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Polygon corner list: 4 points plain, 8 when expanded (previous
    /// corners followed by current corners)
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Circle override radius, if any
    pub fn circle(&self) -> Option<f32> {
        self.circle
    }

    /// Whether continuous-motion expansion applied this cycle
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Center of the probe rect; circle tests measure from here
    pub fn center(&self) -> Point2 {
        self.rect.center()
    }
}
