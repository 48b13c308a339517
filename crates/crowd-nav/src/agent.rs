//! Per-agent kinematic state.

use crowd_core::{AgentId, Vec2};

// ── PrefVelocity ──────────────────────────────────────────────────────────────

/// The preferred velocity hint produced by the tactic layer and consumed by
/// the operation layer: a unit direction plus a speed, kept separate so the
/// direction survives a zero-speed tick (an agent holding still keeps facing
/// where it wants to go).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrefVelocity {
    /// Unit direction, or `Vec2::ZERO` when no direction is preferred.
    pub direction: Vec2,
    /// Desired speed along `direction`.
    pub speed: f32,
}

impl PrefVelocity {
    pub fn new(direction: Vec2, speed: f32) -> Self {
        Self { direction, speed }
    }

    /// The combined preferred velocity vector.
    #[inline]
    pub fn preferred(&self) -> Vec2 {
        self.direction * self.speed
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }
}

// ── AgentSpatialInfo ──────────────────────────────────────────────────────────

/// Kinematic state of one agent.
///
/// Invariants maintained by the integrator: `orient` stays unit length,
/// `radius > 0`, `0 ≤ pref_speed ≤ max_speed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSpatialInfo {
    pub id: AgentId,
    pub pos: Vec2,
    /// Velocity actually applied last integration step.
    pub vel: Vec2,
    /// Velocity candidate written by the operation layer this tick; blended
    /// into `vel` under the acceleration limit.
    pub vel_new: Vec2,
    /// Unit facing direction.
    pub orient: Vec2,
    pub radius: f32,
    pub pref_speed: f32,
    pub max_speed: f32,
    pub max_accel: f32,
    /// Maximum angular velocity in radians per second.
    pub max_ang_vel: f32,
    pub pref_velocity: PrefVelocity,
}

impl AgentSpatialInfo {
    /// Reference kinematics: a pedestrian disc of radius 0.19 with a gentle
    /// preferred speed and effectively unconstrained turning.
    pub fn new(id: AgentId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            vel_new: Vec2::ZERO,
            orient: Vec2::UNIT_X,
            radius: 0.19,
            pref_speed: 0.05,
            max_speed: 0.2,
            max_accel: 5.0,
            max_ang_vel: std::f32::consts::TAU,
            pref_velocity: PrefVelocity::default(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
