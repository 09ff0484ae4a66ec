//! Galaxy Defender - wave and stream arcade shooters
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, spawning, combat, difficulty, lifecycle)
//! - `tuning`: Data-driven game balance per variant
//! - `hud`: One-way HUD state push
//! - `persistence`: Scalar storage (LocalStorage on web)
//! - `highscores`: Persisted best score
//! - `app`: Fixed timestep driver owned by the host page
//! - `platform`: Browser/native platform abstraction

pub mod app;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use highscores::HighScore;
pub use hud::{HudSink, HudState, HudSync};
pub use persistence::{MemoryStore, ScalarStore};
pub use tuning::{Tuning, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player ship hitbox half extents (40px texture at 1.5x scale)
    pub const PLAYER_HALF_EXTENTS: (f32, f32) = (30.0, 30.0);
    /// Enemy hitbox half extents (40x25 texture at 0.9x scale)
    pub const ENEMY_HALF_EXTENTS: (f32, f32) = (18.0, 11.25);
    /// Bullet hitbox half extents (3x12 laser)
    pub const BULLET_HALF_EXTENTS: (f32, f32) = (1.5, 6.0);
    /// Power-up hitbox half extents
    pub const POWER_UP_HALF_EXTENTS: (f32, f32) = (10.0, 10.0);

    /// Horizontal spacing between burst bullets
    pub const BURST_SPREAD: f32 = 10.0;
    /// Muzzle offset from the firing ship's center
    pub const MUZZLE_OFFSET: f32 = 20.0;
}

/// Sine in-out easing over `t` in [0, 1]
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((std::f32::consts::PI * t).cos() - 1.0) / 2.0
}

/// Yoyo progress for a looping tween: 0 -> 1 -> 0 every `2 * duration`
#[inline]
pub fn yoyo_progress(elapsed_ms: f32, duration_ms: f32) -> f32 {
    if duration_ms <= 0.0 {
        return 0.0;
    }
    let cycle = (elapsed_ms / duration_ms).rem_euclid(2.0);
    let t = if cycle <= 1.0 { cycle } else { 2.0 - cycle };
    ease_in_out_sine(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-6);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_yoyo_returns_to_origin() {
        assert!(yoyo_progress(0.0, 2000.0).abs() < 1e-6);
        assert!((yoyo_progress(2000.0, 2000.0) - 1.0).abs() < 1e-6);
        assert!(yoyo_progress(4000.0, 2000.0).abs() < 1e-5);
        // Halfway back
        assert!((yoyo_progress(3000.0, 2000.0) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_yoyo_zero_duration() {
        assert_eq!(yoyo_progress(100.0, 0.0), 0.0);
    }
}
