//! Spawning: enemies, power-ups, waves and projectiles
//!
//! All spawns go through the pools. An exhausted pool silently skips the
//! spawn. Stats are read from the state at the moment of spawning.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, GameEvent, GameState, Patrol, PowerUp, PowerUpKind, Projectile};
use crate::consts::{BURST_SPREAD, MUZZLE_OFFSET};

/// Uniform sample in `[min, max]`, tolerating an empty range
fn sample(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Stream generator: one enemy dropping from the top edge
pub fn spawn_enemy(state: &mut GameState) -> bool {
    let x = sample(
        &mut state.rng,
        state.tuning.spawn_x_min,
        state.tuning.spawn_x_max,
    );
    let enemy = Enemy {
        pos: Vec2::new(x, 0.0),
        vel: Vec2::new(0.0, state.enemy_stats.speed),
        health: state.enemy_stats.health,
        patrol: None,
    };
    if state.pools.enemies.acquire(enemy).is_none() {
        log::debug!("Enemy pool exhausted, spawn skipped");
        return false;
    }
    true
}

/// Stream generator: one power-up of a random kind
pub fn spawn_power_up(state: &mut GameState) -> bool {
    let x = sample(
        &mut state.rng,
        state.tuning.spawn_x_min,
        state.tuning.spawn_x_max,
    );
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let power_up = PowerUp {
        pos: Vec2::new(x, 0.0),
        vel: Vec2::new(0.0, state.tuning.power_up_speed),
        kind,
    };
    if state.pools.power_ups.acquire(power_up).is_none() {
        log::debug!("Power-up pool exhausted, {:?} skipped", kind);
        return false;
    }
    true
}

/// Wave model: spawn the whole batch for the current level at once.
///
/// Returns how many enemies actually fit in the pool.
pub fn spawn_wave(state: &mut GameState) -> u32 {
    let tuning = &state.tuning;
    let wanted = tuning.wave_size(state.level);
    let mut spawned = 0;

    for _ in 0..wanted {
        let origin = Vec2::new(
            sample(&mut state.rng, tuning.spawn_x_min, tuning.spawn_x_max),
            sample(&mut state.rng, tuning.wave_y_min, tuning.wave_y_max),
        );
        let offset = Vec2::new(
            sample(&mut state.rng, -tuning.patrol_dx, tuning.patrol_dx),
            sample(&mut state.rng, -tuning.patrol_dy, tuning.patrol_dy),
        );
        let duration_ms = sample(&mut state.rng, tuning.patrol_min_ms, tuning.patrol_max_ms);

        let enemy = Enemy {
            pos: origin,
            vel: Vec2::ZERO,
            health: state.enemy_stats.health,
            patrol: Some(Patrol {
                origin,
                offset,
                duration_ms,
                elapsed_ms: 0.0,
            }),
        };
        if state.pools.enemies.acquire(enemy).is_none() {
            log::debug!("Enemy pool exhausted after {} of {} wave enemies", spawned, wanted);
            break;
        }
        spawned += 1;
    }

    log::info!("Wave {}: {} enemies", state.level, spawned);
    state.events.push(GameEvent::WaveSpawned {
        level: state.level,
        count: spawned,
    });
    spawned
}

/// Fire one volley of `burst_count` bullets from the player's ship.
///
/// Returns the number of bullets that fit in the pool.
pub fn fire_volley(state: &mut GameState) -> u32 {
    let stats = &state.player.stats;
    let count = stats.burst_count.max(1);
    let damage = stats.bullet_damage;
    let vel = Vec2::new(0.0, -state.tuning.bullet_speed);
    let muzzle = state.player.pos - Vec2::new(0.0, MUZZLE_OFFSET);
    // Centre the spread on the ship
    let first = -(count as f32 - 1.0) * BURST_SPREAD / 2.0;

    let mut fired = 0;
    for i in 0..count {
        let pos = muzzle + Vec2::new(first + i as f32 * BURST_SPREAD, 0.0);
        if state
            .pools
            .bullets
            .acquire(Projectile { pos, vel, damage })
            .is_none()
        {
            break;
        }
        fired += 1;
    }
    state.player.last_shot_ms = Some(state.clock_ms);
    fired
}

/// Whether the auto-fire cooldown has elapsed
pub fn can_auto_fire(state: &GameState) -> bool {
    match state.player.last_shot_ms {
        Some(last) => state.clock_ms - last >= state.player.stats.attack_speed_ms as f64,
        None => true,
    }
}

/// Each enemy independently rolls `per_frame_fire_chance` to shoot downward
pub fn enemy_fire(state: &mut GameState) -> u32 {
    let chance = state.tuning.per_frame_fire_chance.clamp(0.0, 1.0);
    if chance <= 0.0 {
        return 0;
    }

    let rng = &mut state.rng;
    let shooters: Vec<Vec2> = state
        .pools
        .enemies
        .iter()
        .filter(|_| rng.random_bool(chance))
        .map(|(_, e)| e.pos)
        .collect();

    let vel = Vec2::new(0.0, state.tuning.enemy_bullet_speed);
    let damage = state.tuning.enemy_bullet_damage;
    let mut fired = 0;
    for pos in shooters {
        let bullet = Projectile {
            pos: pos + Vec2::new(0.0, MUZZLE_OFFSET),
            vel,
            damage,
        };
        if state.pools.enemy_bullets.acquire(bullet).is_none() {
            break;
        }
        fired += 1;
    }
    fired
}
