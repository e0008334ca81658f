//! Player spacecraft: Euler-angle kinematics and the resource ledger.
//!
//! The craft is a single entity carrying the [`Craft`] component.  Input
//! systems nudge its velocities through [`Craft::apply_thrust`] and
//! [`Craft::apply_rotation`]; [`craft_kinematics_system`] then calls
//! [`Craft::tick`] once per frame:
//!
//! 1. compose `R = Rz(roll) · Ry(yaw) · Rx(pitch)`
//! 2. heading = `R · (0, 0, -1)`
//! 3. position += heading × forward velocity
//! 4. each angle += its angular velocity
//! 5. every velocity *= damping (unconditionally)
//!
//! One tick is one unit time-step, whatever the frame rate.

use crate::config::FlightConfig;
use crate::math::{combined_rotation, heading, FORWARD};
use bevy::math::{DMat3, DVec3};
use bevy::prelude::*;

/// One of the three rotation axes of the craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rotation about X.
    Pitch,
    /// Rotation about Y.
    Yaw,
    /// Rotation about Z.
    Roll,
}

/// Sign of a rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Negative,
    Positive,
}

impl Turn {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Turn::Negative => -1.0,
            Turn::Positive => 1.0,
        }
    }
}

/// Direction of a thrust step.  Forward thrust drives the velocity negative;
/// position advances by `heading × velocity`, so from rest at zero orientation
/// forward thrust carries the craft toward +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thrust {
    Forward,
    Backward,
}

/// Pitch, yaw and roll in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Kinematic state of the player craft plus its collected-resource ledger.
#[derive(Component, Debug, Clone)]
pub struct Craft {
    position: DVec3,
    orientation: Orientation,
    /// Scalar velocity along the local forward axis (negative = forward).
    velocity: f64,
    /// Angular velocity per axis (degrees / tick), stored as (pitch, yaw, roll).
    angular_velocity: DVec3,
    linear_acceleration: f64,
    angular_acceleration: f64,
    damping: f64,
    collected: u32,
}

impl Craft {
    pub fn new(linear_acceleration: f64, angular_acceleration: f64, damping: f64) -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: Orientation::default(),
            velocity: 0.0,
            angular_velocity: DVec3::ZERO,
            linear_acceleration,
            angular_acceleration,
            damping,
            collected: 0,
        }
    }

    pub fn from_config(config: &FlightConfig) -> Self {
        Self::new(
            config.linear_acceleration,
            config.angular_acceleration,
            config.damping,
        )
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Change the forward velocity by one acceleration step.  Unbounded.
    pub fn apply_thrust(&mut self, thrust: Thrust) {
        match thrust {
            Thrust::Forward => self.velocity -= self.linear_acceleration,
            Thrust::Backward => self.velocity += self.linear_acceleration,
        }
    }

    /// Change one angular velocity by one acceleration step.  Unbounded.
    pub fn apply_rotation(&mut self, axis: Axis, turn: Turn) {
        let delta = turn.sign() * self.angular_acceleration;
        match axis {
            Axis::Pitch => self.angular_velocity.x += delta,
            Axis::Yaw => self.angular_velocity.y += delta,
            Axis::Roll => self.angular_velocity.z += delta,
        }
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// Advance one simulation step.
    pub fn tick(&mut self) {
        let o = self.orientation;
        self.position += heading(o.pitch, o.yaw, o.roll) * self.velocity;

        self.orientation.pitch += self.angular_velocity.x;
        self.orientation.yaw += self.angular_velocity.y;
        self.orientation.roll += self.angular_velocity.z;

        self.velocity *= self.damping;
        self.angular_velocity *= self.damping;
    }

    /// Credit mined resources to the ledger.  The ledger never decreases.
    pub fn collect(&mut self, amount: u32) {
        self.collected = self.collected.saturating_add(amount);
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Angular velocities as (pitch, yaw, roll).
    pub fn angular_velocity(&self) -> DVec3 {
        self.angular_velocity
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Current combined rotation matrix.
    pub fn rotation_matrix(&self) -> DMat3 {
        let o = self.orientation;
        combined_rotation(o.pitch, o.yaw, o.roll)
    }

    /// World-space direction the craft currently faces.
    pub fn heading(&self) -> DVec3 {
        self.rotation_matrix() * FORWARD
    }
}

impl Default for Craft {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Spawn the player craft at the world origin with zero orientation.
pub fn spawn_craft(mut commands: Commands, config: Res<FlightConfig>) {
    commands.spawn((
        Craft::from_config(&config),
        Name::new("SpaceCraft"),
        Transform::default(),
        Visibility::default(),
    ));
    info!("Craft spawned at origin");
}

/// Advance every craft by one tick.
pub fn craft_kinematics_system(mut q: Query<&mut Craft>) {
    for mut craft in q.iter_mut() {
        craft.tick();
    }
}
