//! Data-driven game balance
//!
//! Every gameplay constant lives here so a variant can be re-balanced from
//! JSON without touching simulation code.

use serde::{Deserialize, Serialize};

/// Which spawn model drives the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Batches of enemies per level, next batch after the field is cleared
    #[default]
    Wave,
    /// Continuous periodic single-enemy spawning with power-up drops
    Stream,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Wave => "Wave",
            Variant::Stream => "Stream",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wave" | "a" => Some(Variant::Wave),
            "stream" | "b" => Some(Variant::Stream),
            _ => None,
        }
    }
}

/// Complete balance sheet for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub variant: Variant,

    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Entities further than this past the top/bottom edge are culled
    pub cull_margin: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,

    // === Pool capacities ===
    pub bullet_capacity: usize,
    pub enemy_bullet_capacity: usize,
    pub enemy_capacity: usize,
    pub power_up_capacity: usize,

    // === Player ===
    /// Starting (and maximum) health; lives in the wave variant
    pub starting_health: i32,
    pub move_speed: f32,
    /// Minimum ms between auto-fire volleys
    pub attack_speed_ms: f32,
    pub bullet_damage: i32,
    pub burst_count: u32,
    pub bullet_speed: f32,
    /// Fire continuously while the fire key is held
    pub auto_fire: bool,

    // === Damage taken ===
    pub contact_damage: i32,
    pub enemy_bullet_damage: i32,

    // === Enemies ===
    pub enemy_health: i32,
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    /// Chance per enemy per tick to fire (frame-rate dependent)
    pub per_frame_fire_chance: f64,
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,

    // === Stream spawning ===
    pub enemy_spawn_rate_ms: f64,
    pub power_up_spawn_rate_ms: f64,
    pub power_up_speed: f32,

    // === Wave spawning ===
    pub wave_base_enemies: u32,
    pub wave_enemies_per_level: u32,
    pub wave_y_min: f32,
    pub wave_y_max: f32,
    pub patrol_dx: f32,
    pub patrol_dy: f32,
    pub patrol_min_ms: f32,
    pub patrol_max_ms: f32,
    pub next_wave_delay_ms: f64,

    // === Difficulty ===
    pub difficulty_period_ms: f64,
    pub health_step: i32,
    pub speed_step: f32,
    pub spawn_rate_step_ms: f64,
    pub spawn_rate_floor_ms: f64,

    // === Scoring ===
    pub base_score: u64,
    pub combo_window_ms: f64,
    /// Kills per multiplier tier
    pub combo_tier: u32,
    pub max_combo_multiplier: u32,

    // === Power-ups ===
    pub heal_amount: i32,
    pub attack_speed_step_ms: f32,
    pub attack_speed_floor_ms: f32,
    pub max_burst: u32,
    pub burst_damage_bonus: i32,
    pub shield_max_bonus: i32,
    pub shield_heal: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::wave()
    }
}

impl Tuning {
    /// Wave variant: three lives, one-shot patrolling enemies, batch levels
    pub fn wave() -> Self {
        Self {
            variant: Variant::Wave,

            width: 800.0,
            height: 600.0,
            cull_margin: 10.0,
            player_start_x: 400.0,
            player_start_y: 550.0,

            bullet_capacity: 30,
            enemy_bullet_capacity: 50,
            enemy_capacity: 64,
            power_up_capacity: 8,

            starting_health: 3,
            move_speed: 350.0,
            attack_speed_ms: 0.0,
            bullet_damage: 10,
            burst_count: 1,
            bullet_speed: 500.0,
            auto_fire: false,

            contact_damage: 1,
            enemy_bullet_damage: 1,

            enemy_health: 10,
            enemy_speed: 0.0,
            enemy_bullet_speed: 250.0,
            per_frame_fire_chance: 2.0 / 1000.0,
            spawn_x_min: 50.0,
            spawn_x_max: 750.0,

            enemy_spawn_rate_ms: 2000.0,
            power_up_spawn_rate_ms: 10_000.0,
            power_up_speed: 100.0,

            wave_base_enemies: 5,
            wave_enemies_per_level: 2,
            wave_y_min: 50.0,
            wave_y_max: 200.0,
            patrol_dx: 100.0,
            patrol_dy: 50.0,
            patrol_min_ms: 1500.0,
            patrol_max_ms: 3000.0,
            next_wave_delay_ms: 2500.0,

            difficulty_period_ms: 30_000.0,
            health_step: 0,
            speed_step: 0.0,
            spawn_rate_step_ms: 200.0,
            spawn_rate_floor_ms: 500.0,

            base_score: 100,
            combo_window_ms: 2000.0,
            combo_tier: 3,
            max_combo_multiplier: 5,

            heal_amount: 30,
            attack_speed_step_ms: 50.0,
            attack_speed_floor_ms: 100.0,
            max_burst: 5,
            burst_damage_bonus: 5,
            shield_max_bonus: 20,
            shield_heal: 20,
        }
    }

    /// Stream variant: health bar, falling enemies, power-ups, timed difficulty
    pub fn stream() -> Self {
        Self {
            variant: Variant::Stream,
            starting_health: 100,
            move_speed: 300.0,
            attack_speed_ms: 300.0,
            auto_fire: true,
            contact_damage: 20,
            enemy_bullet_damage: 10,
            enemy_health: 20,
            enemy_speed: 100.0,
            per_frame_fire_chance: 1.0 / 1000.0,
            health_step: 10,
            speed_step: 10.0,
            base_score: 10,
            ..Self::wave()
        }
    }

    /// Preset for a variant
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Wave => Self::wave(),
            Variant::Stream => Self::stream(),
        }
    }

    /// Parse a tuning sheet. Fields it leaves out come from the preset of
    /// its `variant` (wave when absent).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Self::from_json_for(json, Variant::default())
    }

    /// Like `from_json`, but a sheet without a `variant` applies to `fallback`
    pub fn from_json_for(json: &str, fallback: Variant) -> serde_json::Result<Self> {
        let serde_json::Value::Object(overrides) = serde_json::from_str(json)? else {
            return Err(serde::de::Error::custom("tuning sheet must be a JSON object"));
        };
        let variant = match overrides.get("variant") {
            Some(v) => Variant::deserialize(v)?,
            None => fallback,
        };
        let mut sheet = match serde_json::to_value(Self::for_variant(variant))? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for (key, value) in overrides {
            sheet.insert(key, value);
        }
        serde_json::from_value(serde_json::Value::Object(sheet))
    }

    /// Serialize for export/editing
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Number of enemies in the batch for `level`
    pub fn wave_size(&self, level: u32) -> u32 {
        self.wave_base_enemies + level * self.wave_enemies_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_size() {
        let t = Tuning::wave();
        assert_eq!(t.wave_size(1), 7);
        assert_eq!(t.wave_size(4), 13);
    }

    #[test]
    fn test_stream_overrides() {
        let t = Tuning::stream();
        assert_eq!(t.variant, Variant::Stream);
        assert_eq!(t.starting_health, 100);
        assert!(t.auto_fire);
        // Shared playfield
        assert_eq!(t.width, Tuning::wave().width);
    }

    #[test]
    fn test_from_json_partial() {
        let t = Tuning::from_json(r#"{ "variant": "Stream", "base_score": 25 }"#).unwrap();
        assert_eq!(t.variant, Variant::Stream);
        assert_eq!(t.base_score, 25);
        assert_eq!(t.combo_window_ms, 2000.0);
        // Unlisted fields come from the stream preset, not the wave one
        assert_eq!(t.starting_health, 100);
        assert_eq!(t.contact_damage, 20);
        assert!(t.auto_fire);
    }

    #[test]
    fn test_from_json_without_variant_uses_wave() {
        let t = Tuning::from_json(r#"{ "next_wave_delay_ms": 1000.0 }"#).unwrap();
        assert_eq!(t.variant, Variant::Wave);
        assert_eq!(t.next_wave_delay_ms, 1000.0);
        assert_eq!(t.starting_health, 3);
    }

    #[test]
    fn test_from_json_for_fallback_variant() {
        let t = Tuning::from_json_for(r#"{ "base_score": 50 }"#, Variant::Stream).unwrap();
        assert_eq!(t.variant, Variant::Stream);
        assert_eq!(t.base_score, 50);
        assert_eq!(t.enemy_health, 20);

        // An explicit variant in the sheet wins
        let t = Tuning::from_json_for(r#"{ "variant": "Wave" }"#, Variant::Stream).unwrap();
        assert_eq!(t, Tuning::wave());
    }

    #[test]
    fn test_json_roundtrip() {
        let t = Tuning::stream();
        let json = t.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
        assert!(Tuning::from_json("[1, 2]").is_err());
        assert!(Tuning::from_json(r#"{ "variant": "Arena" }"#).is_err());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("STREAM"), Some(Variant::Stream));
        assert_eq!(Variant::from_str("a"), Some(Variant::Wave));
        assert_eq!(Variant::from_str("x"), None);
    }
}
