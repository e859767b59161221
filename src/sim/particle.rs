//! Short-lived debris particles
//!
//! Particle motion is per tick: velocity is a displacement per frame and is
//! not scaled by `dt`.

use glam::Vec2;

use super::entity::Field;
use crate::consts::{PARTICLE_LIFE, PARTICLE_SIZE};
use crate::renderer::{Rgba, Surface};

/// Decay each velocity axis toward zero by `(1 - friction)`, keeping its sign
pub fn apply_friction(velocity: &mut Vec2, friction: Vec2) {
    if velocity.x != 0.0 && friction.x != 0.0 {
        let magnitude = (velocity.x.abs() * (1.0 - friction.x)).max(0.0);
        velocity.x = magnitude.copysign(velocity.x);
    }
    if velocity.y != 0.0 && friction.y != 0.0 {
        let magnitude = (velocity.y.abs() * (1.0 - friction.y)).max(0.0);
        velocity.y = magnitude.copysign(velocity.y);
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub friction: Vec2,
    /// Ticks left; the particle dies once this drops below zero
    pub life: i32,
    pub size: f32,
    pub color: Rgba,
    pub active: bool,
}

impl Particle {
    pub fn new(pos: Vec2, size: f32, color: Rgba) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            friction: Vec2::ZERO,
            life: PARTICLE_LIFE,
            size,
            color,
            active: true,
        }
    }

    /// Debris particle with the default size
    pub fn debris(pos: Vec2, color: Rgba) -> Self {
        Self::new(pos, PARTICLE_SIZE, color)
    }

    /// Revive a pooled particle at `pos`
    pub fn reset(&mut self, pos: Vec2) {
        self.active = true;
        self.life = PARTICLE_LIFE;
        self.pos = pos;
    }

    pub fn update(&mut self, field: &Field) {
        self.life -= 1;
        self.pos += self.vel;

        if self.life < 0 || !field.contains(self.pos) {
            self.active = false;
        }

        apply_friction(&mut self.vel, self.friction);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let alpha = (self.life as f32 / PARTICLE_LIFE as f32).clamp(0.0, 1.0);
        surface.begin_path();
        surface.arc(self.pos.x, self.pos.y, self.size, 0.0, std::f32::consts::TAU);
        surface.set_fill_color(self.color.with_alpha(alpha));
        surface.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::new(100.0, 100.0)
    }

    #[test]
    fn test_friction_keeps_sign_and_decays() {
        let mut v = Vec2::new(-10.0, 4.0);
        apply_friction(&mut v, Vec2::new(0.5, 0.25));
        assert_eq!(v, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn test_friction_floors_at_zero() {
        let mut v = Vec2::new(3.0, -3.0);
        apply_friction(&mut v, Vec2::new(2.0, 1.0));
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_particle_moves_per_tick() {
        let mut p = Particle::debris(Vec2::new(50.0, 50.0), Rgba::WHITE);
        p.vel = Vec2::new(2.0, -1.0);
        p.update(&field());
        assert_eq!(p.pos, Vec2::new(52.0, 49.0));
        assert_eq!(p.life, PARTICLE_LIFE - 1);
        assert!(p.active);
    }

    #[test]
    fn test_particle_dies_after_life() {
        let mut p = Particle::debris(Vec2::new(50.0, 50.0), Rgba::WHITE);
        p.life = 0;
        p.update(&field());
        assert!(!p.active);
    }

    #[test]
    fn test_particle_dies_off_field() {
        let mut p = Particle::debris(Vec2::new(99.0, 50.0), Rgba::WHITE);
        p.vel = Vec2::new(5.0, 0.0);
        p.update(&field());
        assert!(!p.active);
    }

    #[test]
    fn test_reset_revives() {
        let mut p = Particle::debris(Vec2::ZERO, Rgba::WHITE);
        p.active = false;
        p.life = -1;
        p.reset(Vec2::new(3.0, 4.0));
        assert!(p.active);
        assert_eq!(p.life, PARTICLE_LIFE);
        assert_eq!(p.pos, Vec2::new(3.0, 4.0));
    }
}
