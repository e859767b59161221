//! Particle emitters
//!
//! - [`Thruster`]: continuous, pooled; particles are recycled, never freed
//! - [`Explosion`]: one-shot ring, no pool; the owner drops it once spent

use glam::Vec2;
use rand::Rng;

use super::entity::{Field, SimRng};
use super::math::{PolarExt, angle};
use super::particle::Particle;
use crate::consts::{
    DEBRIS_COLOR, PARTICLE_FRICTION, THRUSTER_INTENSITY, THRUSTER_POOL_SIZE, THRUSTER_SPREAD,
};
use crate::renderer::{Rgba, Surface};

fn debris_color() -> Rgba {
    Rgba::rgb(DEBRIS_COLOR[0], DEBRIS_COLOR[1], DEBRIS_COLOR[2])
}

/// Continuous exhaust emitter with a particle pool
///
/// Every particle it ever allocated is either in `pool` or in `particles`,
/// so `pool.len() + particles.len() == capacity()` holds between updates.
#[derive(Debug, Clone)]
pub struct Thruster {
    pub active: bool,
    pub burn: bool,
    pub intensity: f32,
    /// Emission heading in degrees
    pub angle: f32,
    /// Half-width of the emission cone as a fraction of a full turn
    pub spread: f32,
    pub pos: Vec2,
    pub color: Rgba,
    pool: Vec<Particle>,
    particles: Vec<Particle>,
    capacity: usize,
}

impl Thruster {
    pub fn new(pos: Vec2, intensity: f32, angle: f32, spread: f32) -> Self {
        let color = debris_color();
        let pool = (0..THRUSTER_POOL_SIZE)
            .map(|_| {
                let mut p = Particle::debris(pos, color);
                p.active = false;
                p
            })
            .collect();

        Self {
            active: true,
            burn: true,
            intensity,
            angle,
            spread,
            pos,
            color,
            pool,
            particles: Vec::with_capacity(THRUSTER_POOL_SIZE),
            capacity: THRUSTER_POOL_SIZE,
        }
    }

    /// Thruster with the default intensity and spread
    pub fn with_defaults(pos: Vec2) -> Self {
        Self::new(pos, THRUSTER_INTENSITY, 0.0, THRUSTER_SPREAD)
    }

    /// Particles currently in flight
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Idle particles waiting for reuse
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Total particles this emitter owns
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn emit(&mut self, rng: &mut SimRng) {
        let dither = 360.0 * rng.random_range(-self.spread..=self.spread);
        let heading = angle::to_radians(self.angle + dither);
        let speed = rng.random_range(self.intensity / 2.0..=self.intensity);

        let mut p = match self.pool.pop() {
            Some(mut p) => {
                p.reset(self.pos);
                p
            }
            None => {
                self.capacity += 1;
                log::trace!("Thruster pool dry, growing to {}", self.capacity);
                Particle::debris(self.pos, self.color)
            }
        };

        p.life = rng.random_range(40.0f32..100.0).floor() as i32;
        p.vel = Vec2::from_polar(heading, speed);
        p.friction = Vec2::splat(PARTICLE_FRICTION);
        self.particles.push(p);
    }

    /// Stop emitting; particles in flight keep animating
    pub fn stop(&mut self) {
        self.burn = false;
    }

    /// Deactivate the emitter and return every particle to the pool
    pub fn kill(&mut self) {
        self.active = false;
        for mut p in self.particles.drain(..) {
            p.active = false;
            self.pool.push(p);
        }
    }

    pub fn update(&mut self, field: &Field, rng: &mut SimRng) {
        if !self.active {
            return;
        }

        if self.burn {
            self.emit(rng);
        }

        for p in &mut self.particles {
            p.update(field);
        }

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].active {
                i += 1;
            } else {
                let p = self.particles.swap_remove(i);
                self.pool.push(p);
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.active {
            for p in &self.particles {
                p.render(surface);
            }
        }
    }
}

/// One-shot radial burst of debris
#[derive(Debug, Clone)]
pub struct Explosion {
    pub active: bool,
    pub pos: Vec2,
    particles: Vec<Particle>,
}

impl Explosion {
    /// Burst of `round(intensity * 10)` particles evenly spaced by angle
    pub fn new(pos: Vec2, intensity: f32, rng: &mut SimRng) -> Self {
        let count = (intensity * 10.0).round().max(0.0) as usize;
        let color = debris_color();
        let step = if count > 0 { 360.0 / count as f32 } else { 0.0 };

        let particles = (0..count)
            .map(|i| {
                let rad = angle::to_radians(step * i as f32);
                let speed = rng.random_range(2.0f32..6.0);
                let mut p = Particle::debris(pos, color);
                p.vel = Vec2::from_polar(rad, speed);
                p.friction = Vec2::splat(PARTICLE_FRICTION);
                p
            })
            .collect();

        Self {
            active: count > 0,
            pos,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Step live particles; the explosion stays active while any survive
    pub fn update(&mut self, field: &Field) {
        if !self.active {
            return;
        }

        for p in self.particles.iter_mut().filter(|p| p.active) {
            p.update(field);
        }
        self.active = self.particles.iter().any(|p| p.active);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.active {
            for p in self.particles.iter().filter(|p| p.active) {
                p.render(surface);
            }
        }
    }
}
