//! Simulation module
//!
//! All gameplay logic lives here:
//! - Entities addressed by slot-map handles, never by reference
//! - Seeded RNG threaded through every update
//! - Rendering only through the [`crate::renderer::Surface`] trait
//! - No platform dependencies

pub mod background;
pub mod bullet;
pub mod collision;
pub mod emitter;
pub mod entity;
pub mod math;
pub mod particle;
pub mod rock;
pub mod scene;
pub mod ship;

pub use background::{Star, StarBackground};
pub use bullet::Bullet;
pub use collision::{Collider, CollisionReport, CollisionWorld, Group};
pub use emitter::{Explosion, Thruster};
pub use entity::{Bounds, Entity, EntityId, Field, GameObject, Lifecycle, SimRng};
pub use math::{PolarExt, clamp, wrap};
pub use particle::Particle;
pub use rock::Rock;
pub use scene::{Placement, Scene, SceneStats};
pub use ship::{Ship, Turn};
