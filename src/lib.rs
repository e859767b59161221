//! Rock Drift - a wrap-around space rocks arcade game
//!
//! Core modules:
//! - `clock`: Frame timing and start/stop for the host loop
//! - `sim`: Simulation (entities, particles, collisions, scene orchestration)
//! - `renderer`: Immediate-mode drawing surface abstraction
//! - `input`: Per-frame control input snapshot
//! - `settings`: Player-facing configuration

pub mod clock;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::FrameClock;
pub use input::{ControlInput, Pointer};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 10.0;
    /// Thrust magnitude added per accelerate/brake command
    pub const SHIP_THRUST: f32 = 10.0;
    pub const SHIP_MAX_THRUST: f32 = 1000.0;
    /// Per-axis velocity cap when thrusting in the direction of travel (px/s)
    pub const SHIP_MAX_AXIS_SPEED: f32 = 300.0;
    /// Discrete turn rate (degrees per tick)
    pub const SHIP_TURN_RATE: f32 = 5.0;
    /// Brake only acts on an axis faster than this
    pub const SHIP_BRAKE_DEADZONE: f32 = 0.1;
    /// Seconds between shots
    pub const WEAPON_COOLDOWN: f32 = 0.125;
    /// Starting heading (degrees, pointing up)
    pub const SHIP_START_ANGLE: f32 = -90.0;
    /// Heading and speed the ship is launched with when a round starts
    pub const SHIP_LAUNCH_ANGLE: f32 = -150.0;
    pub const SHIP_LAUNCH_SPEED: f32 = 500.0;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 2.0;
    pub const BULLET_SPEED: f32 = 500.0;

    /// Rock defaults
    pub const ROCK_COUNT: usize = 10;
    pub const ROCK_SIZE: f32 = 28.0;
    /// Rocks at or below this size do not fragment
    pub const ROCK_MIN_SIZE: f32 = 8.0;
    pub const ROCK_POINTS: usize = 12;
    pub const ROCK_MAX_DRIFT: f32 = 200.0;

    /// Particle defaults
    pub const PARTICLE_LIFE: i32 = 100;
    pub const PARTICLE_SIZE: f32 = 2.0;
    pub const PARTICLE_FRICTION: f32 = 0.05;
    pub const DEBRIS_COLOR: [u8; 3] = [140, 85, 35];

    /// Thruster defaults
    pub const THRUSTER_POOL_SIZE: usize = 50;
    pub const THRUSTER_INTENSITY: f32 = 4.0;
    pub const THRUSTER_SPREAD: f32 = 0.1;

    /// Star background density
    pub const STAR_COUNT: usize = 300;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
