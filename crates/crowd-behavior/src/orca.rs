//! Optimal Reciprocal Collision Avoidance operation component.
//!
//! For each member agent, every neighbour within the sensitivity radius
//! contributes one half-plane constraint in velocity space; the velocity
//! closest to the preferred velocity that satisfies all constraints (and the
//! max-speed disc) becomes `vel_new`.  When the constraint set is
//! infeasible, a fallback program minimises the worst violation instead.
//!
//! Both agents of a pair see each other's constraint, so each absorbs half
//! of the required adjustment (responsibility 0.5) and the pair resolves
//! reciprocally without negotiation.  Pairs that already overlap produce no
//! constraint: contradictory emergency constraints collapse dense groups
//! into deadlock, while constraint-free overlap resolves as both agents
//! continue toward their goals.

use std::collections::BTreeSet;

use crowd_core::{AgentId, ComponentId, Vec2};
use crowd_nav::AgentSpatialInfo;

use crate::component::{component_ids, OperationComponent};
use crate::context::TickContext;

/// A half-plane constraint in velocity space.  Valid velocities lie on the
/// left side of the directed line.
#[derive(Debug, Clone, Copy)]
struct OrcaLine {
    /// A point on the boundary line.
    point: Vec2,
    /// Unit direction along the line.
    direction: Vec2,
}

/// How much of a pairwise adjustment each agent absorbs.
const RESPONSIBILITY: f32 = 0.5;

/// Reciprocal avoidance over the previous tick's neighbour sets.
pub struct OrcaComponent {
    /// How far ahead (seconds) collisions are anticipated.
    time_horizon: f32,
    agents: BTreeSet<AgentId>,
}

impl OrcaComponent {
    pub fn new() -> Self {
        Self::with_time_horizon(3.0)
    }

    pub fn with_time_horizon(time_horizon: f32) -> Self {
        Self {
            time_horizon,
            agents: BTreeSet::new(),
        }
    }
}

impl Default for OrcaComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationComponent for OrcaComponent {
    fn id(&self) -> ComponentId {
        component_ids::ORCA
    }

    fn add_agent(&mut self, agent: AgentId) {
        self.agents.insert(agent);
    }

    fn remove_agent(&mut self, agent: AgentId) -> bool {
        self.agents.remove(&agent)
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, _time_step: f32) {
        // Produce phase: read-only over all spatial state.
        let mut results: Vec<(AgentId, Vec2)> = Vec::with_capacity(self.agents.len());
        {
            let nav = &*ctx.nav;
            for &id in &self.agents {
                let Some(info) = nav.agent(id) else {
                    continue;
                };
                let mut lines = Vec::new();
                for &other_id in nav.neighbors_of(id) {
                    if let Some(other) = nav.agent(other_id) {
                        if let Some(line) = orca_line(info, other, self.time_horizon) {
                            lines.push(line);
                        }
                    }
                }
                let preferred = info.pref_velocity.preferred();
                results.push((id, avoiding_velocity(preferred, info.max_speed, &lines)));
            }
        }

        // Apply phase: write each agent's velocity candidate.
        for (id, vel) in results {
            if let Some(info) = ctx.nav.agent_mut(id) {
                info.vel_new = vel;
            }
        }
    }
}

// ── Constraint construction ───────────────────────────────────────────────────

/// The ORCA half-plane for agent `a` avoiding agent `b` over `time_horizon`
/// seconds.  `None` for overlapping or degenerate pairs.
fn orca_line(a: &AgentSpatialInfo, b: &AgentSpatialInfo, time_horizon: f32) -> Option<OrcaLine> {
    let rel_pos = b.pos - a.pos;
    let rel_vel = a.vel - b.vel;
    let combined_radius = a.radius + b.radius;
    let dist_sq = rel_pos.length_squared();
    let combined_radius_sq = combined_radius * combined_radius;

    if dist_sq <= combined_radius_sq {
        return None;
    }

    let inv_time_horizon = 1.0 / time_horizon;

    // Velocity-space displacement from the truncated cone's cutoff centre.
    let w = rel_vel - rel_pos * inv_time_horizon;
    let w_length_sq = w.length_squared();
    let dot = w.dot(rel_pos);

    let on_cutoff_circle = dot < 0.0 && dot * dot > combined_radius_sq * w_length_sq;

    let (direction, u) = if on_cutoff_circle {
        let w_length = w_length_sq.sqrt();
        if w_length < f32::EPSILON {
            return None;
        }
        let unit_w = w / w_length;
        (
            Vec2::new(unit_w.y, -unit_w.x),
            unit_w * (combined_radius * inv_time_horizon - w_length),
        )
    } else {
        // Project on the nearer leg of the cone.
        let leg = (dist_sq - combined_radius_sq).sqrt();
        let direction = if rel_pos.det(w) > 0.0 {
            Vec2::new(
                rel_pos.x * leg - rel_pos.y * combined_radius,
                rel_pos.x * combined_radius + rel_pos.y * leg,
            ) / dist_sq
        } else {
            -Vec2::new(
                rel_pos.x * leg + rel_pos.y * combined_radius,
                -rel_pos.x * combined_radius + rel_pos.y * leg,
            ) / dist_sq
        };
        let u = direction * rel_vel.dot(direction) - rel_vel;
        (direction, u)
    };

    Some(OrcaLine {
        point: a.vel + u * RESPONSIBILITY,
        direction,
    })
}

/// The velocity closest to `preferred` satisfying all `lines` within the
/// `max_speed` disc.
fn avoiding_velocity(preferred: Vec2, max_speed: f32, lines: &[OrcaLine]) -> Vec2 {
    let (mut result, fail_line) = linear_program_2(lines, preferred, max_speed, false);
    if fail_line < lines.len() {
        result = linear_program_3(lines, fail_line, result, max_speed);
    }
    result
}

// ── Linear programs ───────────────────────────────────────────────────────────

/// 1-D optimisation along constraint `line_idx`, clipped by all earlier
/// constraints and the max-speed disc.  `None` when infeasible.
fn linear_program_1(
    lines: &[OrcaLine],
    line_idx: usize,
    opt_velocity: Vec2,
    max_speed: f32,
    direction_opt: bool,
) -> Option<Vec2> {
    let line = &lines[line_idx];
    let dot = line.point.dot(line.direction);
    let discriminant = dot * dot + max_speed * max_speed - line.point.length_squared();

    if discriminant < 0.0 {
        // The max-speed disc misses this constraint line entirely.
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let mut t_left = -dot - sqrt_discriminant;
    let mut t_right = -dot + sqrt_discriminant;

    for prior in &lines[..line_idx] {
        let denominator = line.direction.det(prior.direction);
        let numerator = prior.direction.det(line.point - prior.point);

        if denominator.abs() <= f32::EPSILON {
            // Near-parallel lines.
            if numerator < 0.0 {
                return None;
            }
            continue;
        }

        let t = numerator / denominator;
        if denominator >= 0.0 {
            t_right = t_right.min(t);
        } else {
            t_left = t_left.max(t);
        }
        if t_left > t_right {
            return None;
        }
    }

    let t = if direction_opt {
        // `opt_velocity` is a direction to maximise along.
        line.direction.dot(opt_velocity).clamp(t_left, t_right)
    } else {
        line.direction
            .dot(opt_velocity - line.point)
            .clamp(t_left, t_right)
    };

    Some(line.point + line.direction * t)
}

/// Incremental 2-D linear program.  Returns `(result, fail_index)`;
/// `fail_index == lines.len()` means every constraint was satisfied.
fn linear_program_2(
    lines: &[OrcaLine],
    opt_velocity: Vec2,
    max_speed: f32,
    direction_opt: bool,
) -> (Vec2, usize) {
    let mut result = if direction_opt {
        opt_velocity.normalize_or_zero() * max_speed
    } else {
        opt_velocity.clamp_length(max_speed)
    };

    for (i, line) in lines.iter().enumerate() {
        if line.direction.det(line.point - result) > 0.0 {
            // Current result violates constraint i; re-optimise along it.
            match linear_program_1(lines, i, opt_velocity, max_speed, direction_opt) {
                Some(new_result) => result = new_result,
                None => return (result, i),
            }
        }
    }

    (result, lines.len())
}

/// Infeasible fallback: minimise the maximum constraint violation.
fn linear_program_3(lines: &[OrcaLine], fail_line: usize, current: Vec2, max_speed: f32) -> Vec2 {
    let mut result = current;
    let mut distance = 0.0_f32;

    for i in fail_line..lines.len() {
        if lines[i].direction.det(lines[i].point - result) <= distance {
            continue;
        }

        // Constraints 0..i projected onto line i.
        let mut projected: Vec<OrcaLine> = Vec::with_capacity(i);
        for j in 0..i {
            let determinant = lines[i].direction.det(lines[j].direction);
            if determinant.abs() <= f32::EPSILON {
                if lines[i].direction.dot(lines[j].direction) > 0.0 {
                    // Same direction: redundant.
                    continue;
                }
                projected.push(OrcaLine {
                    point: (lines[i].point + lines[j].point) * 0.5,
                    direction: (lines[j].direction - lines[i].direction).normalize_or_zero(),
                });
            } else {
                let t = lines[j].direction.det(lines[i].point - lines[j].point) / determinant;
                projected.push(OrcaLine {
                    point: lines[i].point + lines[i].direction * t,
                    direction: (lines[j].direction - lines[i].direction).normalize_or_zero(),
                });
            }
        }

        let opt_direction = Vec2::new(-lines[i].direction.y, lines[i].direction.x);
        let (new_result, _) = linear_program_2(&projected, opt_direction, max_speed, true);
        if lines[i].direction.det(lines[i].point - new_result) > distance {
            result = new_result;
        }
        distance = lines[i].direction.det(lines[i].point - result);
    }

    result
}

#[cfg(test)]
mod lp_tests {
    use super::*;

    #[test]
    fn lp2_single_constraint_respects_half_plane() {
        // Forbid moving right of x = 10.
        let line = OrcaLine {
            point: Vec2::new(10.0, 0.0),
            direction: Vec2::new(0.0, 1.0),
        };
        let (result, fail) = linear_program_2(&[line], Vec2::new(50.0, 0.0), 50.0, false);
        let violation = line.direction.det(line.point - result);
        assert!(violation <= f32::EPSILON, "violation = {violation}");
        assert_eq!(fail, 1);
        assert!((result.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn lp2_unconstrained_returns_clamped_preferred() {
        let (result, fail) = linear_program_2(&[], Vec2::new(100.0, 0.0), 50.0, false);
        assert_eq!(fail, 0);
        assert!((result.length() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn lp3_contradiction_stays_bounded() {
        // x ≥ 20 and x ≤ -20 cannot both hold.
        let lines = [
            OrcaLine {
                point: Vec2::new(20.0, 0.0),
                direction: Vec2::new(0.0, -1.0),
            },
            OrcaLine {
                point: Vec2::new(-20.0, 0.0),
                direction: Vec2::new(0.0, 1.0),
            },
        ];
        let (result, fail) = linear_program_2(&lines, Vec2::ZERO, 50.0, false);
        assert!(fail < lines.len(), "expected infeasibility");
        let result = linear_program_3(&lines, fail, result, 50.0);
        assert!(result.length() <= 50.0 + 1.0);
    }
}
