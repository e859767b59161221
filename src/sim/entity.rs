//! Entity contract shared by every display-list member
//!
//! Entities live in the scene's slot-map arena and are addressed by
//! [`EntityId`]. The concrete variants are gathered in the [`Entity`] tagged
//! union; behaviour common to all of them is the [`GameObject`] trait.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::background::StarBackground;
use super::bullet::Bullet;
use super::rock::Rock;
use super::ship::Ship;
use crate::renderer::Surface;

/// RNG threaded through every update that needs randomness
pub type SimRng = Pcg32;

slotmap::new_key_type! {
    /// Handle to an entity in the scene arena
    pub struct EntityId;
}

/// Playfield dimensions (read-only for entities)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `p` lies inside `[0, width] x [0, height]`
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Square box of side `2 * half` centered on `center`
    pub fn centered(center: Vec2, half: f32) -> Self {
        Self {
            left: center.x - half,
            top: center.y - half,
            right: center.x + half,
            bottom: center.y + half,
        }
    }

    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Strict overlap; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right <= other.left
            || self.bottom <= other.top
            || self.left >= other.right
            || self.top >= other.bottom)
    }
}

/// What the owner should do with an entity after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Keep,
    Destroy,
}

/// Capability shared by ship, rocks, bullets and the background
pub trait GameObject {
    fn position(&self) -> Vec2;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    fn bounding_box(&self) -> Bounds;

    /// Advance one frame; `dt` is in seconds
    fn update(&mut self, dt: f32, field: &Field, rng: &mut SimRng) -> Lifecycle;

    fn render(&self, surface: &mut dyn Surface);
}

/// Display-list member
#[derive(Debug, Clone)]
pub enum Entity {
    Ship(Ship),
    Rock(Rock),
    Bullet(Bullet),
    Background(StarBackground),
}

impl Entity {
    fn object(&self) -> &dyn GameObject {
        match self {
            Entity::Ship(ship) => ship,
            Entity::Rock(rock) => rock,
            Entity::Bullet(bullet) => bullet,
            Entity::Background(background) => background,
        }
    }

    fn object_mut(&mut self) -> &mut dyn GameObject {
        match self {
            Entity::Ship(ship) => ship,
            Entity::Rock(rock) => rock,
            Entity::Bullet(bullet) => bullet,
            Entity::Background(background) => background,
        }
    }

    /// Short variant name for logs and the debug overlay
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Ship(_) => "ship",
            Entity::Rock(_) => "rock",
            Entity::Bullet(_) => "bullet",
            Entity::Background(_) => "background",
        }
    }

    pub fn as_ship(&self) -> Option<&Ship> {
        match self {
            Entity::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match self {
            Entity::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_rock(&self) -> Option<&Rock> {
        match self {
            Entity::Rock(rock) => Some(rock),
            _ => None,
        }
    }

    pub fn as_rock_mut(&mut self) -> Option<&mut Rock> {
        match self {
            Entity::Rock(rock) => Some(rock),
            _ => None,
        }
    }
}

impl GameObject for Entity {
    fn position(&self) -> Vec2 {
        self.object().position()
    }

    fn is_active(&self) -> bool {
        self.object().is_active()
    }

    fn set_active(&mut self, active: bool) {
        self.object_mut().set_active(active);
    }

    fn bounding_box(&self) -> Bounds {
        self.object().bounding_box()
    }

    fn update(&mut self, dt: f32, field: &Field, rng: &mut SimRng) -> Lifecycle {
        if !self.is_active() {
            return Lifecycle::Keep;
        }
        self.object_mut().update(dt, field, rng)
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.is_active() {
            self.object().render(surface);
        }
    }
}
