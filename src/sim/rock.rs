//! Drifting rocks

use glam::Vec2;
use rand::Rng;

use super::entity::{Bounds, Field, GameObject, Lifecycle, SimRng};
use super::math::{angle, wrap};
use crate::consts::{ROCK_MAX_DRIFT, ROCK_MIN_SIZE, ROCK_POINTS};
use crate::polar_to_cartesian;
use crate::renderer::{Rgba, Surface};

/// `count` points on a circle of `radius`, starting at angle 0
fn points_on_circle(count: usize, radius: f32) -> Vec<Vec2> {
    // Slightly short of a full turn so the outline never doubles back
    let step = 6.28 / count as f32;
    (0..count)
        .map(|i| polar_to_cartesian(radius, step * i as f32))
        .collect()
}

/// Circle points with integer jitter of up to a quarter radius per axis
fn jagged_outline(radius: f32, count: usize, rng: &mut SimRng) -> Vec<Vec2> {
    let jitter = radius * 0.25;
    points_on_circle(count, radius)
        .into_iter()
        .map(|p| {
            let dx = rng.random_range(-jitter..=jitter).floor();
            let dy = rng.random_range(-jitter..=jitter).floor();
            p + Vec2::new(dx, dy)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Rock {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub active: bool,
    /// Orientation in degrees
    pub angle: f32,
    /// Degrees added every tick, independent of `dt`
    pub rotation_speed: f32,
    /// Outline relative to the rock's center
    pub points: Vec<Vec2>,
}

impl Rock {
    /// Rock of `size` with random drift, spin and outline
    pub fn new(pos: Vec2, size: f32, rng: &mut SimRng) -> Self {
        let vel = Vec2::new(
            rng.random_range(-ROCK_MAX_DRIFT..ROCK_MAX_DRIFT).floor(),
            rng.random_range(-ROCK_MAX_DRIFT..ROCK_MAX_DRIFT).floor(),
        );
        Self {
            pos,
            vel,
            size,
            active: true,
            angle: 0.0,
            rotation_speed: rng.random_range(0.1f32..2.0),
            points: jagged_outline(size, ROCK_POINTS, rng),
        }
    }

    pub fn radians(&self) -> f32 {
        angle::to_radians(self.angle)
    }

    /// Center used for drawing and collision
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Sizes of the rocks this one breaks into when destroyed
    pub fn fragments(&self) -> Vec<f32> {
        if self.size > ROCK_MIN_SIZE {
            let child = (self.size / 2.0).max(ROCK_MIN_SIZE);
            vec![child, child]
        } else {
            Vec::new()
        }
    }
}

impl GameObject for Rock {
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
        Bounds::centered(self.center(), self.size)
    }

    fn update(&mut self, dt: f32, field: &Field, _rng: &mut SimRng) -> Lifecycle {
        self.pos += self.vel * dt;

        let margin = self.size * 2.0;
        self.pos.x = wrap(self.pos.x, -margin, field.width + margin);
        self.pos.y = wrap(self.pos.y, -margin, field.height + margin);

        self.angle += self.rotation_speed;

        Lifecycle::Keep
    }

    fn render(&self, surface: &mut dyn Surface) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        let center = self.center();

        surface.save();
        surface.set_stroke_color(Rgba::rgb(0xaa, 0xaa, 0xaa));
        surface.set_fill_color(Rgba::rgb(0x33, 0x33, 0x33));
        surface.translate(center.x, center.y);
        surface.rotate(self.radians());

        surface.begin_path();
        surface.move_to(first.x, first.y);
        for p in rest {
            surface.line_to(p.x, p.y);
        }
        surface.close_path();
        surface.stroke();
        surface.fill();

        surface.reset_transform();
        surface.restore();
    }
}
