//! Fixed timestep simulation tick
//!
//! Order within a tick: lifecycle input, timers, player, entity movement,
//! culling, enemy fire, collision detection and resolution, wave check.

use glam::Vec2;

use super::combat::{expire_combo, resolve};
use super::collision::detect_overlaps;
use super::difficulty;
use super::spawn::{can_auto_fire, enemy_fire, fire_volley, spawn_enemy, spawn_power_up, spawn_wave};
use super::state::{GameEvent, GamePhase, GameState};
use super::timer::TimerKind;
use crate::consts::PLAYER_HALF_EXTENTS;
use crate::tuning::{Tuning, Variant};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis (-1 left, 1 right), level-triggered
    pub move_x: f32,
    /// Vertical axis (-1 up, 1 down), level-triggered
    pub move_y: f32,
    /// Fire key pressed this frame
    pub fire: bool,
    /// Fire key currently down (auto-fire)
    pub fire_held: bool,
    /// Start key pressed this frame
    pub start: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,
    /// Restart pressed this frame
    pub restart: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they have been consumed
    pub fn clear_edges(&mut self) {
        self.fire = false;
        self.start = false;
        self.pause = false;
        self.restart = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
        return;
    }
    if input.start {
        state.start();
    }
    if input.pause {
        state.toggle_pause();
    }

    // Clock (and with it every timer) only runs during play
    match state.phase {
        GamePhase::Running | GamePhase::LevelClear => {}
        _ => return,
    }

    state.clock_ms += dt as f64 * 1000.0;
    run_timers(state);

    match state.phase {
        GamePhase::Running => {}
        GamePhase::LevelClear => {
            // Controls lock between waves; leftover shots keep flying
            move_entities(state, dt);
            cull_off_field(state);
            return;
        }
        _ => return,
    }

    update_player(state, input, dt);
    move_entities(state, dt);
    cull_off_field(state);
    enemy_fire(state);

    for event in detect_overlaps(state) {
        resolve(state, event);
    }

    check_wave_cleared(state);
}

/// Deliver every timer due at the current clock
fn run_timers(state: &mut GameState) {
    while let Some(kind) = state.timers.pop_due(state.clock_ms) {
        match kind {
            TimerKind::EnemySpawn => {
                spawn_enemy(state);
            }
            TimerKind::PowerUpSpawn => {
                spawn_power_up(state);
            }
            TimerKind::Difficulty => difficulty::step(state),
            TimerKind::ComboReset => expire_combo(state),
            TimerKind::NextWave => {
                if state.phase == GamePhase::LevelClear {
                    state.phase = GamePhase::Running;
                    spawn_wave(state);
                }
            }
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let dir = Vec2::new(input.move_x, input.move_y).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    let player = &mut state.player;
    let half = Vec2::new(PLAYER_HALF_EXTENTS.0, PLAYER_HALF_EXTENTS.1);
    let bounds = Vec2::new(state.tuning.width, state.tuning.height);
    player.pos = (player.pos + dir * player.stats.move_speed * dt).clamp(half, bounds - half);

    let wants_fire = if state.tuning.auto_fire {
        (input.fire || input.fire_held) && can_auto_fire(state)
    } else {
        input.fire
    };
    if wants_fire {
        fire_volley(state);
    }
}

fn move_entities(state: &mut GameState, dt: f32) {
    let pools = &mut state.pools;
    for (_, b) in pools.bullets.iter_mut() {
        b.pos += b.vel * dt;
    }
    for (_, b) in pools.enemy_bullets.iter_mut() {
        b.pos += b.vel * dt;
    }
    for (_, p) in pools.power_ups.iter_mut() {
        p.pos += p.vel * dt;
    }
    let dt_ms = dt * 1000.0;
    for (_, e) in pools.enemies.iter_mut() {
        e.pos = match e.patrol.as_mut() {
            Some(patrol) => patrol.advance(dt_ms),
            None => e.pos + e.vel * dt,
        };
    }
}

/// Past the top or bottom edge by more than the cull margin
pub fn is_off_field(pos: Vec2, tuning: &Tuning) -> bool {
    pos.y < -tuning.cull_margin || pos.y > tuning.height + tuning.cull_margin
}

fn cull_off_field(state: &mut GameState) {
    let tuning = &state.tuning;
    let pools = &mut state.pools;
    pools.bullets.release_where(|b| is_off_field(b.pos, tuning));
    pools.enemy_bullets.release_where(|b| is_off_field(b.pos, tuning));
    pools.power_ups.release_where(|p| is_off_field(p.pos, tuning));
    let escaped = pools.enemies.release_where(|e| is_off_field(e.pos, tuning));
    if escaped > 0 {
        log::debug!("{} enemies left the field", escaped);
    }
}

/// Wave variant: an empty field completes the level
fn check_wave_cleared(state: &mut GameState) {
    if state.variant() != Variant::Wave
        || state.phase != GamePhase::Running
        || state.enemies_remaining() > 0
    {
        return;
    }
    let cleared = state.level;
    log::info!("Level {} complete", cleared);
    state.events.push(GameEvent::WaveCleared { level: cleared });
    difficulty::step(state);
    state.phase = GamePhase::LevelClear;
    let now = state.clock_ms;
    let delay = state.tuning.next_wave_delay_ms;
    state.timers.schedule(TimerKind::NextWave, now, delay, false);
}
