//! Collision outcome resolution
//!
//! Each overlap event is resolved to completion before the next one. Events
//! that refer to an entity already released earlier in the same tick are
//! dropped, so two overlaps on one entity never resolve twice.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Handle;
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use super::timer::TimerKind;

/// Overlap between two participants, as delivered by collision detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    ProjectileHitEnemy { bullet: Handle, enemy: Handle },
    PlayerHitEnemy { enemy: Handle },
    PlayerHitEnemyBullet { bullet: Handle },
    PlayerHitPowerUp { power_up: Handle },
}

/// Score multiplier for a combo count: one tier per `tier` kills, capped at `max`
pub fn combo_multiplier(combo: u32, tier: u32, max: u32) -> u32 {
    (combo / tier.max(1) + 1).min(max.max(1))
}

/// Points for a kill
pub fn score_gain(base: u64, level: u32, multiplier: u32) -> u64 {
    base * level as u64 * multiplier as u64
}

/// Resolve one overlap event against the state
pub fn resolve(state: &mut GameState, event: CollisionEvent) {
    if state.phase != GamePhase::Running {
        return;
    }
    match event {
        CollisionEvent::ProjectileHitEnemy { bullet, enemy } => {
            projectile_hit_enemy(state, bullet, enemy)
        }
        CollisionEvent::PlayerHitEnemy { enemy } => {
            if state.pools.enemies.release(enemy) {
                let damage = state.tuning.contact_damage;
                damage_player(state, damage);
            }
        }
        CollisionEvent::PlayerHitEnemyBullet { bullet } => {
            if let Some(damage) = state.pools.enemy_bullets.get(bullet).map(|b| b.damage) {
                state.pools.enemy_bullets.release(bullet);
                damage_player(state, damage);
            }
        }
        CollisionEvent::PlayerHitPowerUp { power_up } => {
            if let Some(kind) = state.pools.power_ups.get(power_up).map(|p| p.kind) {
                state.pools.power_ups.release(power_up);
                apply_power_up(state, kind);
            }
        }
    }
}

fn projectile_hit_enemy(state: &mut GameState, bullet: Handle, enemy: Handle) {
    let Some(damage) = state.pools.bullets.get(bullet).map(|b| b.damage) else {
        return;
    };
    let Some(target) = state.pools.enemies.get_mut(enemy) else {
        return;
    };
    target.health -= damage;
    let killed = target.health <= 0;
    let pos = target.pos;
    state.pools.bullets.release(bullet);

    if killed {
        state.pools.enemies.release(enemy);
        register_kill(state, pos);
    }
}

/// Combo bookkeeping and scoring for one kill
fn register_kill(state: &mut GameState, pos: Vec2) {
    let now = state.clock_ms;
    let window = state.tuning.combo_window_ms;

    let within_window = state.last_kill_ms.is_some_and(|last| now - last < window);
    if within_window {
        state.combo += 1;
        state.kill_streak += 1;
    } else {
        state.combo = 1;
        state.kill_streak = 1;
    }
    state.last_kill_ms = Some(now);
    // Last kill wins: the pending reset moves to now + window
    state.timers.schedule(TimerKind::ComboReset, now, window, false);

    let gain = score_gain(state.tuning.base_score, state.level, state.combo_multiplier());
    state.score += gain;
    state.events.push(GameEvent::EnemyKilled {
        pos,
        score_gain: gain,
        combo: state.combo,
    });
}

/// Deferred combo reset fired by the `ComboReset` timer
pub fn expire_combo(state: &mut GameState) {
    if state.combo > 0 {
        log::debug!("Combo of {} expired", state.combo);
        state.events.push(GameEvent::ComboExpired);
    }
    state.combo = 0;
    state.kill_streak = 0;
}

fn damage_player(state: &mut GameState, amount: i32) {
    state.health = (state.health - amount).max(0);
    state.events.push(GameEvent::PlayerDamaged {
        amount,
        health: state.health,
    });
    if state.health == 0 {
        state.game_over();
    }
}

/// Apply a collected power-up to the player
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let tuning = &state.tuning;
    let stats = &mut state.player.stats;
    match kind {
        PowerUpKind::Health => {
            state.health = (state.health + tuning.heal_amount).min(state.max_health);
        }
        PowerUpKind::AttackSpeed => {
            stats.attack_speed_ms = (stats.attack_speed_ms - tuning.attack_speed_step_ms)
                .max(tuning.attack_speed_floor_ms);
        }
        PowerUpKind::BurstDamage => {
            stats.burst_count = (stats.burst_count + 1).min(tuning.max_burst);
            stats.bullet_damage += tuning.burst_damage_bonus;
        }
        PowerUpKind::Shield => {
            state.max_health += tuning.shield_max_bonus;
            state.health = (state.health + tuning.shield_heal).min(state.max_health);
        }
    }
    log::debug!("Collected {:?}", kind);
    state.events.push(GameEvent::PowerUpCollected(kind));
}
