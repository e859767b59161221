//! Projectiles
//!
//! Bullets fly straight and are culled, not wrapped, once they leave the
//! inflated playfield. The scene pools them.

use glam::Vec2;

use super::entity::{Bounds, Field, GameObject, Lifecycle, SimRng};
use crate::consts::BULLET_SIZE;
use crate::renderer::{Rgba, Surface};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: BULLET_SIZE,
            active: true,
        }
    }

    /// Reuse a pooled bullet
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.active = true;
    }

    /// True once outside `[-2 * size, dim + 2 * size]` on either axis
    pub fn offscreen(&self, field: &Field) -> bool {
        let margin = self.size * 2.0;
        self.pos.x < -margin
            || self.pos.x > field.width + margin
            || self.pos.y < -margin
            || self.pos.y > field.height + margin
    }
}

impl GameObject for Bullet {
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
        Bounds::centered(self.pos, self.size)
    }

    fn update(&mut self, dt: f32, field: &Field, _rng: &mut SimRng) -> Lifecycle {
        self.pos += self.vel * dt;
        if self.offscreen(field) {
            Lifecycle::Destroy
        } else {
            Lifecycle::Keep
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_fill_color(Rgba::WHITE);
        surface.begin_path();
        surface.arc(self.pos.x, self.pos.y, self.size, 0.0, std::f32::consts::TAU);
        surface.fill();
        surface.close_path();
        surface.restore();
    }
}
