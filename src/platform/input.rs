//! Keyboard mapping
//!
//! Movement keys are level-triggered (held state feeds the axes); fire,
//! start, pause and restart are edge-triggered and only latch on the first
//! keydown, ignoring auto-repeat.

use crate::sim::TickInput;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Start,
    Pause,
    Restart,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value (WASD and arrows)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(KeyAction::Left),
            "d" | "D" | "ArrowRight" => Some(KeyAction::Right),
            "w" | "W" | "ArrowUp" => Some(KeyAction::Up),
            "s" | "S" | "ArrowDown" => Some(KeyAction::Down),
            " " => Some(KeyAction::Fire),
            "Enter" => Some(KeyAction::Start),
            "p" | "P" | "Escape" => Some(KeyAction::Pause),
            "r" | "R" => Some(KeyAction::Restart),
            _ => None,
        }
    }
}

/// Held-key tracker
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    fire: bool,
    start: bool,
    pause: bool,
    restart: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown and latch any edge into `input`
    pub fn key_down(&mut self, action: KeyAction, input: &mut TickInput) {
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            KeyAction::Up => self.up = true,
            KeyAction::Down => self.down = true,
            KeyAction::Fire => {
                if !self.fire {
                    input.fire = true;
                }
                self.fire = true;
            }
            KeyAction::Start => input.start |= latch(&mut self.start),
            KeyAction::Pause => input.pause |= latch(&mut self.pause),
            KeyAction::Restart => input.restart |= latch(&mut self.restart),
        }
        self.write_axes(input);
    }

    pub fn key_up(&mut self, action: KeyAction, input: &mut TickInput) {
        match action {
            KeyAction::Left => self.left = false,
            KeyAction::Right => self.right = false,
            KeyAction::Up => self.up = false,
            KeyAction::Down => self.down = false,
            KeyAction::Fire => self.fire = false,
            KeyAction::Start => self.start = false,
            KeyAction::Pause => self.pause = false,
            KeyAction::Restart => self.restart = false,
        }
        self.write_axes(input);
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self, input: &mut TickInput) {
        *self = Self::default();
        self.write_axes(input);
    }

    fn write_axes(&self, input: &mut TickInput) {
        // Left wins over right, up wins over down
        input.move_x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        input.move_y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        input.fire_held = self.fire;
    }
}

/// Mark a key held; true only on the transition from released
fn latch(held: &mut bool) -> bool {
    !std::mem::replace(held, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key("ArrowLeft"), Some(KeyAction::Left));
        assert_eq!(KeyAction::from_key("D"), Some(KeyAction::Right));
        assert_eq!(KeyAction::from_key(" "), Some(KeyAction::Fire));
        assert_eq!(KeyAction::from_key("Escape"), Some(KeyAction::Pause));
        assert_eq!(KeyAction::from_key("q"), None);
    }

    #[test]
    fn test_axes_follow_held_keys() {
        let mut kb = Keyboard::new();
        let mut input = TickInput::default();
        kb.key_down(KeyAction::Right, &mut input);
        kb.key_down(KeyAction::Up, &mut input);
        assert_eq!((input.move_x, input.move_y), (1.0, -1.0));
        kb.key_down(KeyAction::Left, &mut input);
        assert_eq!(input.move_x, -1.0);
        kb.key_up(KeyAction::Left, &mut input);
        assert_eq!(input.move_x, 1.0);
        kb.release_all(&mut input);
        assert_eq!((input.move_x, input.move_y), (0.0, 0.0));
    }

    #[test]
    fn test_fire_edge_ignores_repeat() {
        let mut kb = Keyboard::new();
        let mut input = TickInput::default();
        kb.key_down(KeyAction::Fire, &mut input);
        assert!(input.fire && input.fire_held);
        input.clear_edges();
        // Auto-repeat keydown while held
        kb.key_down(KeyAction::Fire, &mut input);
        assert!(!input.fire);
        assert!(input.fire_held);
        kb.key_up(KeyAction::Fire, &mut input);
        assert!(!input.fire_held);
    }

    #[test]
    fn test_held_pause_toggles_once() {
        use crate::sim::{GamePhase, GameState, tick};
        use crate::{Tuning, consts::SIM_DT};

        let mut state = GameState::new(Tuning::stream(), 3, 0);
        state.start();
        let mut kb = Keyboard::new();
        let mut input = TickInput::default();

        // Auto-repeat delivers keydown after keydown while P is held
        let mut phases = Vec::new();
        for _ in 0..4 {
            kb.key_down(KeyAction::Pause, &mut input);
            tick(&mut state, &input, SIM_DT);
            input.clear_edges();
            phases.push(state.phase);
        }
        assert_eq!(phases, vec![GamePhase::Paused; 4]);

        kb.key_up(KeyAction::Pause, &mut input);
        kb.key_down(KeyAction::Pause, &mut input);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_start_and_restart_ignore_repeat() {
        let mut kb = Keyboard::new();
        let mut input = TickInput::default();
        kb.key_down(KeyAction::Restart, &mut input);
        kb.key_down(KeyAction::Start, &mut input);
        assert!(input.restart && input.start);
        input.clear_edges();

        kb.key_down(KeyAction::Restart, &mut input);
        kb.key_down(KeyAction::Start, &mut input);
        assert!(!input.restart && !input.start);

        // Losing focus counts as releasing every key
        kb.release_all(&mut input);
        kb.key_down(KeyAction::Restart, &mut input);
        assert!(input.restart);
    }
}
