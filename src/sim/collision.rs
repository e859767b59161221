//! Broad-phase collision between entity groups
//!
//! A [`Collider`] pairs two groups and a resolver. Every check is a full
//! O(|A| x |B|) sweep of axis-aligned boxes; at tens of entities that is
//! cheaper than maintaining a spatial index.

use super::entity::{Bounds, EntityId};

/// Named entity group a collider draws its members from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Ship,
    Rocks,
    Bullets,
}

/// What a collider needs from the world it runs against
pub trait CollisionWorld {
    /// Current members of `group`, in group order
    fn members(&self, group: Group) -> Vec<EntityId>;

    /// Bounding box of an active entity, `None` if inactive or gone
    fn active_bounds(&self, id: EntityId) -> Option<Bounds>;
}

/// Resolver invoked once per overlapping pair; returns whether it acted
pub type Resolver<W> = fn(&mut W, EntityId, EntityId) -> bool;

/// Outcome of one [`Collider::check`] sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Overlapping pairs dispatched to the resolver
    pub overlaps: usize,
    /// Pairs the resolver reported as handled
    pub handled: usize,
}

impl CollisionReport {
    pub fn merge(&mut self, other: CollisionReport) {
        self.overlaps += other.overlaps;
        self.handled += other.handled;
    }
}

pub struct Collider<W> {
    pub group_a: Group,
    pub group_b: Group,
    resolve: Resolver<W>,
}

// Manual impls: `W` itself need not be Clone/Debug
impl<W> Clone for Collider<W> {
    fn clone(&self) -> Self {
        Self {
            group_a: self.group_a,
            group_b: self.group_b,
            resolve: self.resolve,
        }
    }
}

impl<W> std::fmt::Debug for Collider<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("group_a", &self.group_a)
            .field("group_b", &self.group_b)
            .finish()
    }
}

impl<W: CollisionWorld> Collider<W> {
    pub fn new(group_a: Group, group_b: Group, resolve: Resolver<W>) -> Self {
        Self {
            group_a,
            group_b,
            resolve,
        }
    }

    /// Test every pair and dispatch overlaps to the resolver
    ///
    /// Group membership is snapshotted up front, so entities spawned by the
    /// resolver are not tested until the next check. Activity is re-read per
    /// pair, so a member destroyed by an earlier pair is skipped.
    pub fn check(&self, world: &mut W) -> CollisionReport {
        let group_a = world.members(self.group_a);
        let group_b = world.members(self.group_b);
        let mut report = CollisionReport::default();

        for &a in &group_a {
            for &b in &group_b {
                if a == b {
                    continue;
                }
                let Some(box_a) = world.active_bounds(a) else {
                    break;
                };
                let Some(box_b) = world.active_bounds(b) else {
                    continue;
                };

                if box_a.overlaps(&box_b) {
                    report.overlaps += 1;
                    if (self.resolve)(world, a, b) {
                        report.handled += 1;
                    }
                }
            }
        }

        report
    }
}
