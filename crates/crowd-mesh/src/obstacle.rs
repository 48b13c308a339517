//! Static obstacle segments.

use crowd_core::{ObstacleId, Vec2};

/// A directed obstacle segment, part of a closed loop.
///
/// Loops are wound counter-clockwise around the obstacle interior, so the
/// walkable region lies to the right of the direction `p0 → p1` and the
/// outward normal points into walkable space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub p0: Vec2,
    pub p1: Vec2,
    /// Unit normal pointing away from the obstacle interior.
    pub normal: Vec2,
    /// Previous segment in the loop (`p1` of `prev` coincides with our `p0`).
    pub prev: ObstacleId,
    /// Next segment in the loop (`p0` of `next` coincides with our `p1`).
    pub next: ObstacleId,
}

impl Obstacle {
    /// Unit direction from `p0` to `p1`.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        (self.p1 - self.p0).normalize_or_zero()
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.p0.distance(self.p1)
    }

    /// Midpoint of the segment, used to assign the obstacle to a node.
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.p0 + self.p1) * 0.5
    }

    /// Squared distance from `p` to the segment.
    pub fn distance_squared(&self, p: Vec2) -> f32 {
        let seg = self.p1 - self.p0;
        let len_sq = seg.length_squared();
        if len_sq == 0.0 {
            return p.distance_squared(self.p0);
        }
        let t = ((p - self.p0).dot(seg) / len_sq).clamp(0.0, 1.0);
        p.distance_squared(self.p0 + seg * t)
    }

    /// The outward normal for a CCW-wound loop segment.
    pub(crate) fn outward_normal(p0: Vec2, p1: Vec2) -> Vec2 {
        let d = (p1 - p0).normalize_or_zero();
        // Right-hand perpendicular: interior on the left, walkable on the right.
        Vec2::new(d.y, -d.x)
    }
}
