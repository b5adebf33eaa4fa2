//! World-space boundaries and the shape-owner interface

use super::EntityId;
use crate::foundation::math::Point2;

/// Axis-aligned world-space rectangle stored by its four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum x edge
    pub left: f32,
    /// Maximum x edge
    pub right: f32,
    /// Minimum y edge
    pub top: f32,
    /// Maximum y edge
    pub bottom: f32,
}

impl Rect {
    /// Create a rect from edges, normalizing flipped input
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Smallest rect enclosing a set of points.
    ///
    /// An empty input yields a degenerate rect at the origin.
    pub fn from_points(points: &[Point2]) -> Self {
        if points.is_empty() {
            return Self {
                left: 0.0,
                right: 0.0,
                top: 0.0,
                bottom: 0.0,
            };
        }
        let mut left = f32::INFINITY;
        let mut right = f32::NEG_INFINITY;
        let mut top = f32::INFINITY;
        let mut bottom = f32::NEG_INFINITY;
        for p in points {
            left = left.min(p.x);
            right = right.max(p.x);
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Center point of the rect
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Extent along x
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Extent along y
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if this rect overlaps another on both axes
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// Check if `other` lies entirely inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.top <= other.top
            && self.bottom >= other.bottom
    }

    /// Smallest rect enclosing both inputs
    pub fn union(&self, other: &Rect) -> Self {
        Self {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Corner points in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.left, self.top),
            Point2::new(self.right, self.top),
            Point2::new(self.right, self.bottom),
            Point2::new(self.left, self.bottom),
        ]
    }
}

/// World-space boundary a shape owner reports for one of its shapes.
///
/// Plain shapes only carry the enclosing rect; rotated or scaled shapes also
/// carry their ordered corner polygon so the narrow phase can test real edges
/// instead of the conservative rect.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Enclosing axis-aligned rect
    pub rect: Rect,
    /// Ordered corner polygon, present when the shape is rotated or scaled
    pub points: Option<[Point2; 4]>,
    /// True when `points` came from a non-trivial transform
    pub is_transform: bool,
}

impl Boundary {
    /// Boundary for an axis-aligned, untransformed shape
    pub fn axis_aligned(rect: Rect) -> Self {
        Self {
            rect,
            points: None,
            is_transform: false,
        }
    }

    /// Boundary for a rotated or scaled shape with an explicit corner polygon
    pub fn transformed(points: [Point2; 4]) -> Self {
        Self {
            rect: Rect::from_points(&points),
            points: Some(points),
            is_transform: true,
        }
    }

    /// Corner polygon: the owner-supplied points, or the rect corners
    pub fn corners(&self) -> [Point2; 4] {
        self.points.unwrap_or_else(|| self.rect.corners())
    }
}

/// Interface the engine consumes to fetch current world-space boundaries.
///
/// Implemented by the host's scene layer. The result must be idempotent
/// within a tick. Returning `None` means the owner is gone (a collaborator
/// contract violation); the engine skips that shape for the cycle rather
/// than aborting the whole pass.
pub trait BoundarySource {
    /// Current world-space boundary for `entity`, or `None` if unavailable
    fn boundary(&self, entity: EntityId) -> Option<Boundary>;
}
