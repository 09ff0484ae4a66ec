//! Difficulty progression
//!
//! Stream variant: stepped by the repeating `Difficulty` timer.
//! Wave variant: stepped when a wave is cleared.

use super::state::{GameEvent, GameState};
use super::timer::TimerKind;
use crate::tuning::Variant;

/// Spawn interval after one step, never below the floor
pub fn next_spawn_rate(rate_ms: f64, step_ms: f64, floor_ms: f64) -> f64 {
    (rate_ms - step_ms).max(floor_ms)
}

/// Raise the level and enemy stats by one step
pub fn step(state: &mut GameState) {
    let tuning = &state.tuning;
    state.level += 1;
    state.enemy_stats.health += tuning.health_step;
    state.enemy_stats.speed += tuning.speed_step;
    state.enemy_stats.spawn_rate_ms = next_spawn_rate(
        state.enemy_stats.spawn_rate_ms,
        tuning.spawn_rate_step_ms,
        tuning.spawn_rate_floor_ms,
    );

    // The spawn timer has a fixed period; re-arm it to pick up the new rate
    if state.variant() == Variant::Stream && state.timers.cancel(TimerKind::EnemySpawn) {
        let now = state.clock_ms;
        let rate = state.enemy_stats.spawn_rate_ms;
        state.timers.schedule(TimerKind::EnemySpawn, now, rate, true);
    }

    log::info!(
        "Level {}: enemy hp {}, speed {}, spawn every {}ms",
        state.level,
        state.enemy_stats.health,
        state.enemy_stats.speed,
        state.enemy_stats.spawn_rate_ms
    );
    state.events.push(GameEvent::LevelUp { level: state.level });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_rate_floor_example() {
        let mut rate = 2000.0;
        for _ in 0..10 {
            rate = next_spawn_rate(rate, 200.0, 500.0);
        }
        assert_eq!(rate, 500.0);
    }

    #[test]
    fn test_step_raises_stats() {
        let mut state = GameState::new(Tuning::stream(), 5, 0);
        state.start();
        step(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemy_stats.health, 30);
        assert_eq!(state.enemy_stats.speed, 110.0);
        assert_eq!(state.enemy_stats.spawn_rate_ms, 1800.0);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_step_rearms_spawn_timer() {
        let mut state = GameState::new(Tuning::stream(), 5, 0);
        state.start();
        state.clock_ms = 30_000.0;
        step(&mut state);
        let timer = state.timers.get(TimerKind::EnemySpawn).unwrap();
        assert_eq!(timer.due_ms, 31_800.0);
        assert_eq!(timer.period_ms, Some(1800.0));
    }

    #[test]
    fn test_wave_step_keeps_one_shot_enemies() {
        let mut state = GameState::new(Tuning::wave(), 5, 0);
        state.start();
        step(&mut state);
        assert_eq!(state.enemy_stats.health, 10);
        assert!(!state.timers.is_pending(TimerKind::EnemySpawn));
    }

    proptest! {
        #[test]
        fn prop_spawn_rate_after_n_steps(n in 0u32..50) {
            let mut state = GameState::new(Tuning::stream(), 1, 0);
            state.start();
            for _ in 0..n {
                step(&mut state);
            }
            let expected = (2000.0 - 200.0 * n as f64).max(500.0);
            prop_assert_eq!(state.enemy_stats.spawn_rate_ms, expected);
            prop_assert_eq!(state.level, 1 + n);
        }
    }
}
