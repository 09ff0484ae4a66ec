//! HUD state push
//!
//! The simulation never reads the HUD. After each update the driver builds a
//! snapshot and `HudSync` forwards it to the sink only when a field changed.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Everything the HUD displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudState {
    pub score: u64,
    pub level: u32,
    /// Health, or lives in the wave variant
    pub health: i32,
    pub max_health: i32,
    pub high_score: u64,
    pub enemies_remaining: usize,
    pub phase: GamePhase,
    pub combo_visible: bool,
    pub combo_count: u32,
    pub combo_multiplier: u32,
}

impl HudState {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            health: state.health,
            max_health: state.max_health,
            high_score: state.high_score.max(state.score),
            enemies_remaining: state.enemies_remaining(),
            phase: state.phase,
            // Only a real chain is worth showing
            combo_visible: state.combo > 1,
            combo_count: state.combo,
            combo_multiplier: state.combo_multiplier(),
        }
    }
}

/// Receiver of HUD snapshots (DOM on web, logger on native)
pub trait HudSink {
    fn push(&mut self, hud: &HudState);
}

/// Pushes a snapshot only when it differs from the last one pushed
#[derive(Debug, Clone, Default)]
pub struct HudSync {
    last: Option<HudState>,
}

impl HudSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the sink was updated
    pub fn sync(&mut self, state: &GameState, sink: &mut dyn HudSink) -> bool {
        let hud = HudState::from_state(state);
        if self.last.as_ref() == Some(&hud) {
            return false;
        }
        sink.push(&hud);
        self.last = Some(hud);
        true
    }
}

/// Native sink: logs HUD changes
#[derive(Debug, Default)]
pub struct LogHud;

impl HudSink for LogHud {
    fn push(&mut self, hud: &HudState) {
        log::debug!(
            "HUD score={} level={} health={}/{} best={} enemies={} combo={}x{}",
            hud.score,
            hud.level,
            hud.health,
            hud.max_health,
            hud.high_score,
            hud.enemies_remaining,
            hud.combo_count,
            hud.combo_multiplier
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder(Vec<HudState>);

    impl HudSink for Recorder {
        fn push(&mut self, hud: &HudState) {
            self.0.push(hud.clone());
        }
    }

    #[test]
    fn test_pushes_only_on_change() {
        let mut state = GameState::new(Tuning::stream(), 1, 40);
        let mut sync = HudSync::new();
        let mut sink = Recorder::default();

        assert!(sync.sync(&state, &mut sink));
        assert!(!sync.sync(&state, &mut sink));
        state.score = 10;
        assert!(sync.sync(&state, &mut sink));
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[1].score, 10);
    }

    #[test]
    fn test_combo_visibility() {
        let mut state = GameState::new(Tuning::stream(), 1, 0);
        state.combo = 1;
        assert!(!HudState::from_state(&state).combo_visible);
        state.combo = 3;
        let hud = HudState::from_state(&state);
        assert!(hud.combo_visible);
        assert_eq!(hud.combo_multiplier, 2);
    }

    #[test]
    fn test_high_score_tracks_live_score() {
        let mut state = GameState::new(Tuning::stream(), 1, 100);
        state.score = 150;
        assert_eq!(HudState::from_state(&state).high_score, 150);
    }
}
