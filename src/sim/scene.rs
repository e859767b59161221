//! Scene orchestration
//!
//! The scene owns every entity (in a slot-map arena), the ordered display
//! list of handles, the typed `rocks`/`bullets` groups the colliders read,
//! the explosions and the colliders themselves.
//!
//! Frame order inside [`Scene::update`]:
//! 1. control input (ship actions, pointer-follow target)
//! 2. entity physics in display-list order
//! 3. explosions stepped and spent ones dropped
//! 4. colliders, against post-update positions
//! 5. destroyed entities reaped from the display list and groups
//!
//! [`Scene::render`] only reads state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

use super::background::StarBackground;
use super::bullet::Bullet;
use super::collision::{Collider, CollisionReport, CollisionWorld, Group};
use super::emitter::Explosion;
use super::entity::{Bounds, Entity, EntityId, Field, GameObject, Lifecycle, SimRng};
use super::math::{PolarExt, angle};
use super::rock::Rock;
use super::ship::{Ship, Turn};
use crate::consts::{BULLET_SPEED, ROCK_SIZE, SHIP_LAUNCH_ANGLE, SHIP_LAUNCH_SPEED, SHIP_SIZE};
use crate::input::ControlInput;
use crate::renderer::{Rgba, Surface};
use crate::settings::Settings;

/// Where a new entity goes in the display list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Drawn last (on top)
    #[default]
    Back,
    /// Drawn just before (under) the referenced entity
    Before(EntityId),
    /// Drawn just after (over) the referenced entity
    After(EntityId),
}

/// Running counters, mostly for logs and the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub frames: u64,
    pub bullets_fired: u64,
    pub rocks_destroyed: u64,
    /// Ship/rock overlaps seen (the ship takes no damage yet)
    pub crashes: u64,
}

pub struct Scene {
    field: Field,
    settings: Settings,
    rng: SimRng,
    entities: SlotMap<EntityId, Entity>,
    display_list: Vec<EntityId>,
    ship: Option<EntityId>,
    rocks: Vec<EntityId>,
    bullets: Vec<EntityId>,
    explosions: Vec<Explosion>,
    colliders: Vec<Collider<Scene>>,
    bullet_pool: Vec<Bullet>,
    /// Destroyed this frame, awaiting reap
    pending: Vec<EntityId>,
    last_input: ControlInput,
    stats: SceneStats,
}

impl Scene {
    /// Empty scene with the default collision policies wired in
    pub fn new(field: Field, settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Scene {}x{} seed {} ({} quality)",
            field.width,
            field.height,
            seed,
            settings.quality.as_str()
        );

        Self {
            field,
            settings,
            rng: SimRng::seed_from_u64(seed),
            entities: SlotMap::with_key(),
            display_list: Vec::new(),
            ship: None,
            rocks: Vec::new(),
            bullets: Vec::new(),
            explosions: Vec::new(),
            colliders: vec![
                Collider::new(Group::Ship, Group::Rocks, resolve_ship_crash),
                Collider::new(Group::Bullets, Group::Rocks, resolve_bullet_hit),
            ],
            bullet_pool: Vec::new(),
            pending: Vec::new(),
            last_input: ControlInput::default(),
            stats: SceneStats::default(),
        }
    }

    /// Star background, the configured rocks at random spots, ship launched
    /// from the middle
    pub fn populate(&mut self) {
        let stars = self.settings.quality.star_count();
        let background = StarBackground::new(self.field, stars, &mut self.rng);
        self.add(Entity::Background(background), Placement::Back);

        for _ in 0..self.settings.rock_count {
            let pos = Vec2::new(
                self.rng.random_range(0.0..=self.field.width.max(0.0)).floor(),
                self.rng.random_range(0.0..=self.field.height.max(0.0)).floor(),
            );
            self.spawn_rock(pos, ROCK_SIZE);
        }

        self.spawn_ship(self.field.center());
        if let Some(ship) = self.ship_mut() {
            ship.angle = SHIP_LAUNCH_ANGLE;
            ship.set_velocity(SHIP_LAUNCH_SPEED);
        }
        log::info!("Populated scene with {} rocks", self.rocks.len());
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Change the playfield dimensions used by all wrap and cull math
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Field::new(width, height);
        log::info!("Scene resized to {}x{}", width, height);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn display_list(&self) -> &[EntityId] {
        &self.display_list
    }

    pub fn rocks(&self) -> &[EntityId] {
        &self.rocks
    }

    pub fn bullets(&self) -> &[EntityId] {
        &self.bullets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Bullets waiting in the pool for reuse
    pub fn pooled_bullets(&self) -> usize {
        self.bullet_pool.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn ship_id(&self) -> Option<EntityId> {
        self.ship
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship
            .and_then(|id| self.entities.get(id))
            .and_then(Entity::as_ship)
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship
            .and_then(|id| self.entities.get_mut(id))
            .and_then(Entity::as_ship_mut)
    }

    pub fn rock(&self, id: EntityId) -> Option<&Rock> {
        self.entities.get(id).and_then(Entity::as_rock)
    }

    pub fn rock_mut(&mut self, id: EntityId) -> Option<&mut Rock> {
        self.entities.get_mut(id).and_then(Entity::as_rock_mut)
    }

    /// Insert an entity into the arena, the display list and its typed group
    ///
    /// A `Before`/`After` reference that is not in the display list falls
    /// back to appending.
    pub fn add(&mut self, entity: Entity, placement: Placement) -> EntityId {
        let kind = entity.kind();
        let id = self.entities.insert(entity);

        match self.entities[id] {
            Entity::Ship(_) => {
                if let Some(old) = self.ship.replace(id) {
                    log::warn!("Replacing ship {:?} with {:?}", old, id);
                }
            }
            Entity::Rock(_) => self.rocks.push(id),
            Entity::Bullet(_) => self.bullets.push(id),
            Entity::Background(_) => {}
        }

        let index = match placement {
            Placement::Back => None,
            Placement::Before(other) => self.display_index(other),
            Placement::After(other) => self.display_index(other).map(|i| i + 1),
        };
        match index {
            Some(i) => self.display_list.insert(i, id),
            None => self.display_list.push(id),
        }

        log::debug!("Added {} {:?} ({:?})", kind, id, placement);
        id
    }

    fn display_index(&self, id: EntityId) -> Option<usize> {
        self.display_list.iter().position(|&other| other == id)
    }

    /// Placement that keeps new debris and projectiles under the ship
    fn under_ship(&self) -> Placement {
        self.ship.map_or(Placement::Back, Placement::Before)
    }

    /// Flag an entity inactive and queue it for removal at the end of the frame
    ///
    /// Returns false if the entity is unknown or already destroyed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if !entity.is_active() {
            return false;
        }
        entity.set_active(false);
        log::debug!("Destroyed {} {:?} at {}", entity.kind(), id, entity.position());
        self.pending.push(id);
        true
    }

    /// Drop destroyed entities from the display list, groups and arena;
    /// bullets go back to the pool
    fn reap(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let entities = &self.entities;
        let alive = |id: &EntityId| entities.get(*id).is_some_and(|e| e.is_active());
        self.display_list.retain(alive);
        self.rocks.retain(alive);
        self.bullets.retain(alive);

        for id in self.pending.drain(..) {
            if self.ship == Some(id) {
                self.ship = None;
            }
            if let Some(Entity::Bullet(bullet)) = self.entities.remove(id) {
                self.bullet_pool.push(bullet);
            }
        }
    }

    pub fn spawn_ship(&mut self, pos: Vec2) -> EntityId {
        let mut ship = Ship::new(pos, SHIP_SIZE);
        if !self.settings.particles {
            ship.thruster.kill();
        }
        self.add(Entity::Ship(ship), Placement::Back)
    }

    pub fn spawn_rock(&mut self, pos: Vec2, size: f32) -> EntityId {
        let rock = Rock::new(pos, size, &mut self.rng);
        let placement = self.under_ship();
        self.add(Entity::Rock(rock), placement)
    }

    /// Spawn a bullet, reusing a pooled one when available
    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2) -> EntityId {
        let bullet = match self.bullet_pool.pop() {
            Some(mut bullet) => {
                bullet.reset(pos, vel);
                bullet
            }
            None => Bullet::new(pos, vel),
        };
        let placement = self.under_ship();
        self.add(Entity::Bullet(bullet), placement)
    }

    pub fn spawn_explosion(&mut self, pos: Vec2, intensity: f32) {
        if !self.settings.particles {
            return;
        }
        let explosion = Explosion::new(pos, intensity, &mut self.rng);
        self.explosions.push(explosion);
    }

    /// Fire from the ship's nose if the weapon is ready
    pub fn fire_from_ship(&mut self) -> Option<EntityId> {
        let ship = self.ship_mut()?;
        if !ship.fire() {
            return None;
        }
        let origin = ship.nose();
        let vel = Vec2::from_polar(ship.radians(), BULLET_SPEED);

        self.stats.bullets_fired += 1;
        Some(self.spawn_bullet(origin, vel))
    }

    fn apply_input(&mut self, input: &mut ControlInput) {
        let simultaneous = self.settings.simultaneous_actions;
        let pointer_follow = self.settings.pointer_follow;
        let mut wants_fire = false;

        let Some(ship) = self.ship_mut() else {
            return;
        };

        if input.changed {
            ship.turn(Turn::from_axis(input.turn));
            ship.turn_to(None);

            if simultaneous {
                match input.accelerate {
                    1 => ship.accelerate(),
                    -1 => ship.brake(),
                    _ => {}
                }
                wants_fire = input.shoot;
            } else if input.accelerate == 1 {
                ship.accelerate();
            } else if input.accelerate == -1 {
                ship.brake();
            } else if input.shoot {
                wants_fire = true;
            }

            input.changed = false;
        }

        if pointer_follow && input.turn_to_pointer && input.pointer.in_bounds {
            let pointer = Vec2::new(input.pointer.x, input.pointer.y);
            let target = angle::between(ship.pos, pointer);
            ship.turn_to(Some(target));
        }

        if wants_fire && self.fire_from_ship().is_some() {
            input.shoot = false;
        }
    }

    /// Advance the whole scene by `dt` seconds
    pub fn update(&mut self, dt: f32, input: &mut ControlInput) {
        self.stats.frames += 1;
        self.last_input = *input;
        self.apply_input(input);

        let field = self.field;
        for i in 0..self.display_list.len() {
            let id = self.display_list[i];
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            if entity.update(dt, &field, &mut self.rng) == Lifecycle::Destroy {
                self.destroy(id);
            }
        }

        for explosion in &mut self.explosions {
            explosion.update(&field);
        }
        self.explosions.retain(|e| e.active);

        let colliders = std::mem::take(&mut self.colliders);
        let mut report = CollisionReport::default();
        for collider in &colliders {
            report.merge(collider.check(self));
        }
        self.colliders = colliders;

        self.reap();

        log::trace!(
            "frame {}: {} entities, {} rocks, {} bullets, {} explosions, {} overlaps",
            self.stats.frames,
            self.display_list.len(),
            self.rocks.len(),
            self.bullets.len(),
            self.explosions.len(),
            report.overlaps
        );
    }

    /// Draw the frame: explosions, then entities in display-list order,
    /// then the status overlay
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear_rect(0.0, 0.0, self.field.width, self.field.height);

        for explosion in &self.explosions {
            explosion.render(surface);
        }

        for id in &self.display_list {
            if let Some(entity) = self.entities.get(*id) {
                entity.render(surface);
            }
        }

        if self.settings.debug_overlay {
            self.render_overlay(surface);
        }
    }

    fn render_overlay(&self, surface: &mut dyn Surface) {
        let input = &self.last_input;
        surface.set_fill_color(Rgba::WHITE);

        if let Some(ship) = self.ship() {
            let target = ship.rotate_to.map(angle::to_radians).unwrap_or(0.0);
            surface.fill_text(
                &format!(
                    "{:.2}, {:.2}; {:.2}, {:.2} {:.2}; {:.2} {:.2}, {:.2}",
                    input.pointer.x,
                    input.pointer.y,
                    ship.radians(),
                    target,
                    ship.rotation_speed,
                    ship.speed(),
                    ship.vel.x,
                    ship.vel.y
                ),
                10.0,
                10.0,
            );
        }

        surface.fill_text(
            &format!(
                "Controls {}, {}, {}",
                input.accelerate, input.turn, input.shoot
            ),
            10.0,
            20.0,
        );
        surface.fill_text(
            &format!(
                "Rocks {} Bullets {} Destroyed {}",
                self.rocks.len(),
                self.bullets.len(),
                self.stats.rocks_destroyed
            ),
            10.0,
            30.0,
        );
    }
}

impl CollisionWorld for Scene {
    fn members(&self, group: Group) -> Vec<EntityId> {
        match group {
            Group::Ship => self.ship.into_iter().collect(),
            Group::Rocks => self.rocks.clone(),
            Group::Bullets => self.bullets.clone(),
        }
    }

    fn active_bounds(&self, id: EntityId) -> Option<Bounds> {
        self.entities
            .get(id)
            .filter(|e| e.is_active())
            .map(|e| e.bounding_box())
    }
}

/// Ship touched a rock; no damage model yet, only counted
fn resolve_ship_crash(scene: &mut Scene, ship: EntityId, rock: EntityId) -> bool {
    scene.stats.crashes += 1;
    log::debug!("Ship {:?} crashed into rock {:?}", ship, rock);
    true
}

/// Bullet hit a rock: both go, the rock splits and bursts into debris
fn resolve_bullet_hit(scene: &mut Scene, bullet: EntityId, rock: EntityId) -> bool {
    let Some((pos, size, fragments)) = scene
        .rock(rock)
        .map(|r| (r.pos, r.size, r.fragments()))
    else {
        return false;
    };

    scene.destroy(bullet);
    scene.destroy(rock);

    for child in fragments {
        scene.spawn_rock(pos, child);
    }
    scene.spawn_explosion(pos, size / 2.0);

    scene.stats.rocks_destroyed += 1;
    log::debug!("Rock {:?} (size {}) shot down", rock, size);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROCK_COUNT;
    use crate::renderer::{DrawCommand, Recorder};

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> Settings {
        Settings {
            seed: Some(2024),
            ..Settings::default()
        }
    }

    fn scene() -> Scene {
        Scene::new(Field::new(800.0, 600.0), settings())
    }

    /// Ship at center and ten motionless rocks in a row along the top
    fn lined_up_scene() -> (Scene, Vec<EntityId>) {
        let mut scene = scene();
        scene.spawn_ship(scene.field().center());
        let rocks: Vec<_> = (0..10)
            .map(|i| {
                let id = scene.spawn_rock(Vec2::new(40.0 + i as f32 * 80.0, 80.0), ROCK_SIZE);
                scene.rock_mut(id).expect("rock").vel = Vec2::ZERO;
                id
            })
            .collect();
        (scene, rocks)
    }

    fn rock_sizes(scene: &Scene) -> Vec<f32> {
        scene
            .rocks()
            .iter()
            .filter_map(|&id| scene.rock(id))
            .map(|r| r.size)
            .collect()
    }

    #[test]
    fn test_populate_layout() {
        let mut scene = scene();
        scene.populate();

        assert_eq!(scene.rocks().len(), ROCK_COUNT);
        assert_eq!(scene.display_list().len(), ROCK_COUNT + 2);

        let first = scene.get(scene.display_list()[0]).expect("background");
        assert!(matches!(first, Entity::Background(_)));
        assert_eq!(scene.display_list().last().copied(), scene.ship_id());

        let ship = scene.ship().expect("ship");
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.angle, SHIP_LAUNCH_ANGLE);
        assert!((ship.vel.length() - SHIP_LAUNCH_SPEED).abs() < 1e-2);
        assert!(ship.vel.x < 0.0 && ship.vel.y < 0.0);
    }

    #[test]
    fn test_populate_zero_field() {
        let mut scene = Scene::new(Field::new(0.0, 0.0), settings());
        scene.populate();
        assert_eq!(scene.rocks().len(), ROCK_COUNT);
        for &id in scene.rocks() {
            assert_eq!(scene.rock(id).map(|r| r.pos), Some(Vec2::ZERO));
        }
        scene.update(DT, &mut ControlInput::default());
    }

    #[test]
    fn test_add_relative_placement() {
        let mut scene = scene();
        let ship = scene.spawn_ship(Vec2::ZERO);
        let before = scene.add(
            Entity::Bullet(Bullet::new(Vec2::ZERO, Vec2::ZERO)),
            Placement::Before(ship),
        );
        let after = scene.add(
            Entity::Bullet(Bullet::new(Vec2::ZERO, Vec2::ZERO)),
            Placement::After(before),
        );
        assert_eq!(scene.display_list(), &[before, after, ship]);
        assert_eq!(scene.bullets(), &[before, after]);
    }

    #[test]
    fn test_add_unknown_reference_appends() {
        let mut scene = scene();
        let ship = scene.spawn_ship(Vec2::ZERO);
        let gone = scene.spawn_bullet(Vec2::ZERO, Vec2::ZERO);
        scene.destroy(gone);
        scene.reap();

        let id = scene.add(
            Entity::Bullet(Bullet::new(Vec2::ZERO, Vec2::ZERO)),
            Placement::After(gone),
        );
        assert_eq!(scene.display_list(), &[ship, id]);
    }

    #[test]
    fn test_destroy_is_deferred_and_idempotent() {
        let mut scene = scene();
        let rock = scene.spawn_rock(Vec2::new(100.0, 100.0), ROCK_SIZE);
        assert!(scene.destroy(rock));
        assert!(!scene.destroy(rock));

        // Still listed until the frame ends, but inactive
        assert_eq!(scene.rocks(), &[rock]);
        assert!(!scene.get(rock).expect("pending").is_active());

        scene.update(DT, &mut ControlInput::default());
        assert!(scene.rocks().is_empty());
        assert!(scene.display_list().is_empty());
        assert!(scene.get(rock).is_none());
        assert!(!scene.destroy(rock));
    }

    #[test]
    fn test_bullet_culled_and_pooled() {
        let mut scene = scene();
        let speed = 300.0;
        scene.spawn_bullet(scene.field().center(), Vec2::new(speed, 0.0));

        let bound = (scene.field().width / (speed * DT)).ceil() as usize;
        let mut input = ControlInput::default();
        let mut frames = 0;
        while !scene.bullets().is_empty() {
            scene.update(DT, &mut input);
            frames += 1;
            assert!(frames <= bound, "bullet not culled after {frames} frames");
        }
        assert!(scene.display_list().is_empty());
        assert_eq!(scene.pooled_bullets(), 1);

        scene.spawn_bullet(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(scene.pooled_bullets(), 0);
    }

    #[test]
    fn test_fire_places_bullet_under_ship() {
        let mut scene = scene();
        let ship = scene.spawn_ship(scene.field().center());
        let mut input = ControlInput {
            shoot: true,
            changed: true,
            ..Default::default()
        };
        scene.update(DT, &mut input);

        assert_eq!(scene.bullets().len(), 1);
        assert_eq!(scene.display_list(), &[scene.bullets()[0], ship]);
        assert!(!input.shoot);
        assert!(!input.changed);
        assert_eq!(scene.stats().bullets_fired, 1);

        // Cooldown blocks an immediate second shot
        input.shoot = true;
        input.changed = true;
        scene.update(DT, &mut input);
        assert_eq!(scene.bullets().len(), 1);
        assert!(input.shoot);
    }

    #[test]
    fn test_one_action_per_frame_by_default() {
        let mut scene = scene();
        scene.spawn_ship(scene.field().center());
        let mut input = ControlInput {
            accelerate: 1,
            shoot: true,
            changed: true,
            ..Default::default()
        };
        scene.update(DT, &mut input);

        assert!(scene.bullets().is_empty());
        assert_ne!(scene.ship().map(|s| s.vel), Some(Vec2::ZERO));
    }

    #[test]
    fn test_simultaneous_actions_setting() {
        let mut settings = settings();
        settings.simultaneous_actions = true;
        let mut scene = Scene::new(Field::new(800.0, 600.0), settings);
        scene.spawn_ship(scene.field().center());
        let mut input = ControlInput {
            accelerate: 1,
            shoot: true,
            changed: true,
            ..Default::default()
        };
        scene.update(DT, &mut input);

        assert_eq!(scene.bullets().len(), 1);
        assert_ne!(scene.ship().map(|s| s.vel), Some(Vec2::ZERO));
    }

    #[test]
    fn test_unchanged_input_is_ignored() {
        let mut scene = scene();
        scene.spawn_ship(scene.field().center());
        let mut input = ControlInput {
            accelerate: 1,
            ..Default::default()
        };
        scene.update(DT, &mut input);
        assert_eq!(scene.ship().map(|s| s.vel), Some(Vec2::ZERO));
    }

    #[test]
    fn test_pointer_follow_sets_target() {
        let mut scene = scene();
        scene.spawn_ship(Vec2::new(100.0, 100.0));
        let mut input = ControlInput::default();
        input.pointer_down();
        input.pointer_enter();
        input.pointer_moved(100.0, 200.0);
        scene.update(DT, &mut input);

        let target = scene.ship().and_then(|s| s.rotate_to).expect("target set");
        assert!((target - 90.0).abs() < 1e-4);

        // Pointer outside the field: target cleared by the next key event
        input.pointer_leave();
        input.key_down("q");
        scene.update(DT, &mut input);
        assert_eq!(scene.ship().and_then(|s| s.rotate_to), None);
    }

    #[test]
    fn test_large_rock_splits_in_two() {
        let (mut scene, rocks) = lined_up_scene();
        let target = rocks[0];
        let pos = scene.rock(target).expect("rock").pos;
        scene.spawn_bullet(pos, Vec2::ZERO);
        scene.update(DT, &mut ControlInput::default());

        let sizes = rock_sizes(&scene);
        assert_eq!(sizes.iter().filter(|&&s| s == 14.0).count(), 2);
        assert_eq!(sizes.iter().filter(|&&s| s == ROCK_SIZE).count(), 9);
    }

    #[test]
    fn test_small_rock_leaves_only_debris() {
        let mut scene = scene();
        let rock = scene.spawn_rock(Vec2::new(200.0, 200.0), 8.0);
        scene.rock_mut(rock).expect("rock").vel = Vec2::ZERO;
        scene.spawn_bullet(Vec2::new(200.0, 200.0), Vec2::ZERO);
        scene.update(DT, &mut ControlInput::default());

        assert!(scene.rocks().is_empty());
        assert!(scene.bullets().is_empty());
        assert_eq!(scene.explosions().len(), 1);
        assert_eq!(scene.explosions()[0].particles().len(), 40);
        assert_eq!(scene.stats().rocks_destroyed, 1);
    }

    #[test]
    fn test_shot_scenario_end_to_end() {
        let (mut scene, rocks) = lined_up_scene();
        let target = rocks[3];
        let pos = scene.rock(target).expect("rock").pos;
        let bullet = scene.spawn_bullet(pos, Vec2::ZERO);
        assert_eq!(scene.display_list().len(), 12);

        scene.update(DT, &mut ControlInput::default());

        assert!(scene.get(bullet).is_none());
        assert!(!scene.display_list().contains(&bullet));
        assert!(scene.get(target).is_none());
        assert!(!scene.display_list().contains(&target));
        assert_eq!(scene.rocks().len(), 11);
        assert_eq!(scene.display_list().len(), 12);

        let children: Vec<&Rock> = scene.rocks()[9..]
            .iter()
            .filter_map(|&id| scene.rock(id))
            .collect();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(child.size, 14.0);
            assert_eq!(child.pos, pos);
        }

        assert_eq!(scene.explosions().len(), 1);
        assert_eq!(scene.stats().crashes, 0);
        // Children are drawn under the ship
        assert_eq!(scene.display_list().last().copied(), scene.ship_id());
    }

    #[test]
    fn test_ship_crash_is_counted_not_fatal() {
        let mut scene = scene();
        let ship = scene.spawn_ship(Vec2::new(300.0, 300.0));
        let rock = scene.spawn_rock(Vec2::new(290.0, 290.0), ROCK_SIZE);
        scene.rock_mut(rock).expect("rock").vel = Vec2::ZERO;
        scene.update(DT, &mut ControlInput::default());

        assert_eq!(scene.stats().crashes, 1);
        assert!(scene.get(ship).is_some_and(|e| e.is_active()));
        assert_eq!(scene.rocks(), &[rock]);
    }

    #[test]
    fn test_explosions_are_reaped_once_spent() {
        let mut scene = scene();
        scene.spawn_explosion(scene.field().center(), 1.0);
        let mut input = ControlInput::default();
        for _ in 0..110 {
            scene.update(DT, &mut input);
        }
        assert!(scene.explosions().is_empty());
    }

    #[test]
    fn test_particles_disabled() {
        let mut settings = settings();
        settings.particles = false;
        let mut scene = Scene::new(Field::new(800.0, 600.0), settings);
        scene.spawn_ship(scene.field().center());
        scene.spawn_explosion(Vec2::ZERO, 4.0);
        assert!(scene.explosions().is_empty());
        assert!(!scene.ship().expect("ship").thruster.active);
    }

    #[test]
    fn test_render_order_and_overlay() {
        let mut scene = scene();
        scene.populate();
        scene.spawn_explosion(scene.field().center(), 1.0);

        let mut rec = Recorder::new();
        scene.render(&mut rec);

        assert_eq!(
            rec.commands.first(),
            Some(&DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0
            })
        );
        // Explosion debris comes before the star field
        let first_arc = rec
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Arc { .. }));
        let first_star = rec
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { .. }));
        assert!(first_arc < first_star);

        let texts = rec.texts();
        assert_eq!(texts.len(), 3);
        assert!(texts[1].starts_with("Controls"));
    }

    #[test]
    fn test_overlay_can_be_disabled() {
        let mut settings = settings();
        settings.debug_overlay = false;
        let mut scene = Scene::new(Field::new(800.0, 600.0), settings);
        scene.spawn_ship(scene.field().center());

        let mut rec = Recorder::new();
        scene.render(&mut rec);
        assert!(rec.texts().is_empty());
    }

    #[test]
    fn test_resize_changes_cull_bounds() {
        let mut scene = scene();
        scene.resize(100.0, 100.0);
        scene.spawn_bullet(Vec2::new(90.0, 50.0), Vec2::new(1200.0, 0.0));
        scene.update(DT, &mut ControlInput::default());
        assert!(scene.bullets().is_empty());
    }
}
