//! The player's ship

use glam::Vec2;

use super::emitter::Thruster;
use super::entity::{Bounds, Field, GameObject, Lifecycle, SimRng};
use super::math::{PolarExt, angle, clamp, wrap};
use crate::consts::*;
use crate::normalize_angle;
use crate::renderer::{Rgba, Surface};

/// Turn direction from the control input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Turn {
    Left,
    #[default]
    None,
    Right,
}

impl Turn {
    /// Map a -1/0/1 control axis
    pub fn from_axis(axis: i8) -> Self {
        match axis.signum() {
            -1 => Turn::Left,
            1 => Turn::Right,
            _ => Turn::None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::None => 0.0,
            Turn::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub active: bool,
    /// Heading in degrees
    pub angle: f32,
    /// Discrete turn rate in degrees per tick (0 when not turning)
    pub rotation_speed: f32,
    /// Target heading in degrees for pointer-follow mode
    pub rotate_to: Option<f32>,
    /// Seconds until the weapon is ready
    pub weapon_cooldown: f32,
    speed: f32,
    pub thruster: Thruster,
}

impl Ship {
    pub fn new(pos: Vec2, size: f32) -> Self {
        let mut thruster = Thruster::with_defaults(pos);
        thruster.burn = false;
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            active: true,
            angle: SHIP_START_ANGLE,
            rotation_speed: 0.0,
            rotate_to: None,
            weapon_cooldown: 0.0,
            speed: SHIP_THRUST,
            thruster,
        }
    }

    /// Heading in radians
    pub fn radians(&self) -> f32 {
        angle::to_radians(self.angle)
    }

    /// Thrust magnitude applied per accelerate/brake command
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp(speed, 0.0, SHIP_MAX_THRUST);
    }

    /// Set thrust magnitude and launch along the current heading
    pub fn set_velocity(&mut self, speed: f32) {
        self.set_speed(speed);
        let heading = self.radians();
        self.vel.set_to_polar(heading, self.speed);
    }

    /// Tip of the hull in world space
    pub fn nose(&self) -> Vec2 {
        self.pos + Vec2::from_polar(self.radians(), self.size)
    }

    /// Start or stop a discrete turn; turning drops any pointer-follow target
    pub fn turn(&mut self, direction: Turn) {
        self.rotation_speed = SHIP_TURN_RATE * direction.sign();
        if direction != Turn::None {
            self.rotate_to = None;
        }
    }

    /// Set or clear the pointer-follow target (degrees)
    ///
    /// Ignored while a discrete turn is in progress.
    pub fn turn_to(&mut self, target: Option<f32>) {
        if self.rotation_speed == 0.0 {
            self.rotate_to = target;
        }
    }

    fn thrust(&self) -> Vec2 {
        Vec2::from_polar(self.radians(), self.speed)
    }

    pub fn accelerate(&mut self) {
        let thrust = self.thrust();
        self.vel.x = accelerate_axis(self.vel.x, thrust.x);
        self.vel.y = accelerate_axis(self.vel.y, thrust.y);
    }

    pub fn brake(&mut self) {
        let thrust = self.thrust();
        if self.vel.x.abs() > SHIP_BRAKE_DEADZONE {
            self.vel.x -= thrust.x;
        }
        if self.vel.y.abs() > SHIP_BRAKE_DEADZONE {
            self.vel.y -= thrust.y;
        }
    }

    pub fn weapon_ready(&self) -> bool {
        self.weapon_cooldown == 0.0
    }

    /// Returns true if a shot was allowed (and starts the cooldown)
    pub fn fire(&mut self) -> bool {
        if !self.weapon_ready() {
            return false;
        }
        self.weapon_cooldown = WEAPON_COOLDOWN;
        true
    }

    fn steer(&mut self) {
        if self.rotation_speed != 0.0 {
            self.angle += self.rotation_speed;
        } else if let Some(target) = self.rotate_to {
            let current = normalize_angle(self.radians());
            let target = normalize_angle(angle::to_radians(target));
            let next = angle::rotate_to(current, target, angle::DEFAULT_LERP);
            self.angle = angle::to_degrees(next);
        }
    }
}

/// Add thrust to one velocity axis, capping only overshoot in the direction
/// of travel
fn accelerate_axis(velocity: f32, thrust: f32) -> f32 {
    let next = velocity + thrust;
    if velocity > 0.0 && thrust > 0.0 {
        next.min(SHIP_MAX_AXIS_SPEED)
    } else if velocity < 0.0 && thrust < 0.0 {
        next.max(-SHIP_MAX_AXIS_SPEED)
    } else {
        next
    }
}

impl GameObject for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::centered(self.pos - self.size / 2.0, self.size)
    }

    fn update(&mut self, dt: f32, field: &Field, rng: &mut SimRng) -> Lifecycle {
        self.steer();

        self.weapon_cooldown = (self.weapon_cooldown - dt).max(0.0);

        self.pos += self.vel * dt;
        let margin = self.size * 2.0;
        self.pos.x = wrap(self.pos.x, -margin, field.width + margin);
        self.pos.y = wrap(self.pos.y, -margin, field.height + margin);

        // Exhaust leaves the tail, opposite the heading
        self.thruster.pos = self.pos - Vec2::from_polar(self.radians(), self.size / 2.0);
        self.thruster.angle = self.angle + 180.0;
        if self.vel == Vec2::ZERO {
            self.thruster.stop();
        } else {
            self.thruster.burn = true;
        }
        self.thruster.update(field, rng);

        Lifecycle::Keep
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.thruster.render(surface);

        let s = self.size;
        let hull = [
            Vec2::new(s, 0.0),
            Vec2::new(-(s / 2.0), s / 2.0),
            Vec2::new(-(s / 2.0), -(s / 2.0)),
        ];

        surface.save();
        surface.set_stroke_color(Rgba::rgb(0xaa, 0xaa, 0xaa));
        surface.set_fill_color(Rgba::rgb(0x99, 0x99, 0x99));
        surface.translate(self.pos.x - s / 2.0, self.pos.y - s / 2.0);
        surface.rotate(self.radians());

        surface.begin_path();
        surface.move_to(hull[0].x, hull[0].y);
        for p in &hull[1..] {
            surface.line_to(p.x, p.y);
        }
        surface.close_path();
        surface.stroke();
        surface.fill();

        surface.reset_transform();
        surface.restore();
    }
}
