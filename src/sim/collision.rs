//! Hitbox overlap detection
//!
//! Produces the overlap events the combat resolver consumes. Detection only
//! reads the state; resolution happens afterwards in event order.

use glam::Vec2;

use super::combat::CollisionEvent;
use super::state::GameState;
use crate::consts::*;

/// Axis-aligned box around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: (f32, f32)) -> Self {
        Self {
            center,
            half_extents: Vec2::new(half_extents.0, half_extents.1),
        }
    }

    /// Overlap test; touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x <= reach.x && delta.y <= reach.y
    }
}

/// Collect every overlap for this tick.
///
/// Order: player bullets against enemies, then player against enemies,
/// enemy bullets and power-ups.
pub fn detect_overlaps(state: &GameState) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let pools = &state.pools;

    let enemy_boxes: Vec<_> = pools
        .enemies
        .iter()
        .map(|(h, e)| (h, Aabb::new(e.pos, ENEMY_HALF_EXTENTS)))
        .collect();

    for (bullet, b) in pools.bullets.iter() {
        let bullet_box = Aabb::new(b.pos, BULLET_HALF_EXTENTS);
        // A bullet is spent on its first target; later pairs would be no-ops
        if let Some((enemy, _)) = enemy_boxes.iter().find(|(_, e)| e.overlaps(&bullet_box)) {
            events.push(CollisionEvent::ProjectileHitEnemy {
                bullet,
                enemy: *enemy,
            });
        }
    }

    let player_box = Aabb::new(state.player.pos, PLAYER_HALF_EXTENTS);

    events.extend(
        enemy_boxes
            .iter()
            .filter(|(_, e)| e.overlaps(&player_box))
            .map(|(enemy, _)| CollisionEvent::PlayerHitEnemy { enemy: *enemy }),
    );

    events.extend(
        pools
            .enemy_bullets
            .iter()
            .filter(|(_, b)| Aabb::new(b.pos, BULLET_HALF_EXTENTS).overlaps(&player_box))
            .map(|(bullet, _)| CollisionEvent::PlayerHitEnemyBullet { bullet }),
    );

    events.extend(
        pools
            .power_ups
            .iter()
            .filter(|(_, p)| Aabb::new(p.pos, POWER_UP_HALF_EXTENTS).overlaps(&player_box))
            .map(|(power_up, _)| CollisionEvent::PlayerHitPowerUp { power_up }),
    );

    events
}
