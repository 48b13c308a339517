//! Goal shapes and goal identity.
//!
//! A goal is a target region realised as one of a closed set of shapes.
//! Every shape answers three queries: `centroid` (the planning anchor),
//! `contains` (arrival test — an agent has reached its goal exactly when the
//! shape contains its position), and `nearest_point` (the closest point of
//! the region to an arbitrary position, used to stop at region boundaries
//! instead of overshooting toward the centroid).

use crate::ids::GoalId;
use crate::math::{Aabb, Vec2};

/// Absorption radius of a point goal.  Pure float equality would make point
/// goals unreachable.
const POINT_EPS: f32 = 1e-3;

// ── GoalShape ─────────────────────────────────────────────────────────────────

/// The closed set of goal geometries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalShape {
    /// A single point, reached within a small absorption radius.
    Point(Vec2),

    /// A disk; reached anywhere inside it.
    Disk { center: Vec2, radius: f32 },

    /// An axis-aligned rectangle.
    AxisBox(Aabb),

    /// A rectangle rotated so its local x-axis lies along `axis`.
    /// `axis` must be a unit vector.
    OrientedBox {
        center: Vec2,
        half_extents: Vec2,
        axis: Vec2,
    },
}

impl GoalShape {
    /// The shape's planning anchor: where the global planner routes to.
    pub fn centroid(&self) -> Vec2 {
        match *self {
            GoalShape::Point(p) => p,
            GoalShape::Disk { center, .. } => center,
            GoalShape::AxisBox(aabb) => aabb.center(),
            GoalShape::OrientedBox { center, .. } => center,
        }
    }

    /// `true` if `p` lies inside the region (arrival test).
    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            GoalShape::Point(center) => p.distance_squared(center) <= POINT_EPS * POINT_EPS,
            GoalShape::Disk { center, radius } => p.distance_squared(center) <= radius * radius,
            GoalShape::AxisBox(aabb) => aabb.contains(p),
            GoalShape::OrientedBox {
                center,
                half_extents,
                axis,
            } => {
                let local = to_local(p, center, axis);
                local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y
            }
        }
    }

    /// The point of the region closest to `p`.  Positions already inside the
    /// region map to themselves.
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        match *self {
            GoalShape::Point(center) => center,
            GoalShape::Disk { center, radius } => {
                let offset = p - center;
                if offset.length_squared() <= radius * radius {
                    p
                } else {
                    center + offset.normalize_or_zero() * radius
                }
            }
            GoalShape::AxisBox(aabb) => Vec2::new(
                p.x.clamp(aabb.min.x, aabb.max.x),
                p.y.clamp(aabb.min.y, aabb.max.y),
            ),
            GoalShape::OrientedBox {
                center,
                half_extents,
                axis,
            } => {
                let local = to_local(p, center, axis);
                let clamped = Vec2::new(
                    local.x.clamp(-half_extents.x, half_extents.x),
                    local.y.clamp(-half_extents.y, half_extents.y),
                );
                center + axis * clamped.x + axis.perp() * clamped.y
            }
        }
    }
}

/// Express `p` in the frame of an oriented box (`axis` is local +x).
#[inline]
fn to_local(p: Vec2, center: Vec2, axis: Vec2) -> Vec2 {
    let d = p - center;
    Vec2::new(d.dot(axis), d.dot(axis.perp()))
}

// ── Goal ──────────────────────────────────────────────────────────────────────

/// A goal assignment: a shape plus a stable identity.
///
/// The id changes every time a goal is (re)assigned, so a path built for an
/// older assignment can detect that it is stale even when the geometry
/// happens to be identical.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub id: GoalId,
    pub shape: GoalShape,
}

impl Goal {
    pub fn new(id: GoalId, shape: GoalShape) -> Self {
        Self { id, shape }
    }

    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.shape.centroid()
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.shape.contains(p)
    }

    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        self.shape.nearest_point(p)
    }
}
