//! Fixed timestep driver
//!
//! Owns the session, the persistence store and the HUD sync. The host calls
//! `update` once per animation frame with the elapsed wall time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::hud::{HudSink, HudSync};
use crate::persistence::ScalarStore;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct App<S: ScalarStore> {
    pub state: GameState,
    /// Input accumulated by the host between frames
    pub input: TickInput,
    store: S,
    high_score: HighScore,
    hud: HudSync,
    accumulator: f32,
}

impl<S: ScalarStore> App<S> {
    /// Boot: read the high score once and create a not-yet-started session
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::new(tuning, seed, high_score.best),
            input: TickInput::default(),
            store,
            high_score,
            hud: HudSync::new(),
            accumulator: 0.0,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start button
    pub fn request_start(&mut self) {
        self.input.start = true;
    }

    /// Pause button / key
    pub fn request_pause(&mut self) {
        self.input.pause = true;
    }

    /// Restart button
    pub fn request_restart(&mut self) {
        self.input.restart = true;
    }

    /// Run simulation ticks for `dt` seconds of wall time, then push the HUD.
    ///
    /// Returns the gameplay events produced during this frame.
    pub fn update(&mut self, dt: f32, hud: &mut dyn HudSink) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_edges();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let events = self.state.take_events();
        for event in &events {
            if let GameEvent::GameOver { score, .. } = event {
                if self.high_score.record(*score) {
                    self.high_score.save(&mut self.store);
                }
            }
        }

        self.hud.sync(&self.state, hud);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudState;
    use crate::persistence::MemoryStore;
    use crate::sim::{GamePhase, Projectile};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder(Vec<HudState>);

    impl HudSink for Recorder {
        fn push(&mut self, hud: &HudState) {
            self.0.push(hud.clone());
        }
    }

    fn store_with(best: u64) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.save_scalar(HighScore::STORAGE_KEY, best);
        store
    }

    fn quiet_wave() -> Tuning {
        let mut tuning = Tuning::wave();
        tuning.per_frame_fire_chance = 0.0;
        tuning
    }

    fn kill_player(app: &mut App<MemoryStore>) {
        let pos = app.state.player.pos;
        let lives = app.state.health;
        for _ in 0..lives {
            app.state.pools.enemy_bullets.acquire(Projectile {
                pos,
                vel: Vec2::ZERO,
                damage: 1,
            });
        }
    }

    #[test]
    fn test_boot_loads_high_score() {
        let app = App::new(Tuning::wave(), 1, store_with(750));
        assert_eq!(app.high_score(), 750);
        assert_eq!(app.state.high_score, 750);
        assert_eq!(app.state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_start_button_consumed_once() {
        let mut app = App::new(quiet_wave(), 1, MemoryStore::new());
        let mut hud = Recorder::default();
        app.request_start();
        let events = app.update(SIM_DT * 3.0, &mut hud);
        assert_eq!(app.state.phase, GamePhase::Running);
        assert!(events.contains(&GameEvent::Started));
        assert!(!app.input.start);
        assert_eq!(hud.0.last().unwrap().enemies_remaining, 7);
    }

    #[test]
    fn test_edge_waits_for_a_substep() {
        let mut app = App::new(quiet_wave(), 1, MemoryStore::new());
        let mut hud = Recorder::default();
        app.request_start();
        app.update(SIM_DT / 4.0, &mut hud);
        assert_eq!(app.state.phase, GamePhase::NotStarted);
        assert!(app.input.start);
        app.update(SIM_DT, &mut hud);
        assert_eq!(app.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_persists_new_record() {
        let mut app = App::new(quiet_wave(), 1, store_with(50));
        let mut hud = Recorder::default();
        app.request_start();
        app.update(SIM_DT, &mut hud);
        app.state.score = 300;
        kill_player(&mut app);
        let events = app.update(SIM_DT, &mut hud);
        assert!(events.contains(&GameEvent::GameOver {
            score: 300,
            new_high_score: true
        }));
        assert_eq!(app.high_score(), 300);
        assert_eq!(app.store().load_scalar(HighScore::STORAGE_KEY), Some(300));
    }

    #[test]
    fn test_game_over_below_record_not_saved() {
        let mut app = App::new(quiet_wave(), 1, store_with(5000));
        let mut hud = Recorder::default();
        app.request_start();
        app.update(SIM_DT, &mut hud);
        app.state.score = 300;
        kill_player(&mut app);
        app.update(SIM_DT, &mut hud);
        assert_eq!(app.state.phase, GamePhase::GameOver);
        assert_eq!(app.store().load_scalar(HighScore::STORAGE_KEY), Some(5000));
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut app = App::new(quiet_wave(), 1, MemoryStore::new());
        let mut hud = Recorder::default();
        app.request_start();
        app.update(SIM_DT, &mut hud);
        app.state.score = 800;
        kill_player(&mut app);
        app.update(SIM_DT, &mut hud);

        app.request_restart();
        app.update(SIM_DT, &mut hud);
        let last = hud.0.last().unwrap();
        assert_eq!(last.phase, GamePhase::NotStarted);
        assert_eq!(last.score, 0);
        assert_eq!(last.level, 1);
        assert_eq!(last.health, 3);
        assert_eq!(last.high_score, 800);
    }

    #[test]
    fn test_substeps_capped() {
        let mut app = App::new(quiet_wave(), 1, MemoryStore::new());
        let mut hud = Recorder::default();
        app.request_start();
        app.update(SIM_DT, &mut hud);
        let clock = app.state.clock_ms;
        app.update(10.0, &mut hud);
        let advanced = app.state.clock_ms - clock;
        assert!(advanced <= (MAX_SUBSTEPS as f64) * SIM_DT as f64 * 1000.0 + 1e-6);
    }
}
