//! Game state and lifecycle
//!
//! Everything the simulation mutates lives in one `GameState` owned by the
//! driver. Only the combat resolver, the difficulty controller and the
//! lifecycle methods below touch the session counters.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::timer::{TimerKind, Timers};
use crate::tuning::{Tuning, Variant};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Booted, waiting for start
    NotStarted,
    /// Active gameplay
    Running,
    /// Wave cleared, next batch pending (wave variant)
    LevelClear,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    AttackSpeed,
    BurstDamage,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::AttackSpeed,
        PowerUpKind::BurstDamage,
        PowerUpKind::Shield,
    ];
}

/// Pooled entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bullet,
    EnemyBullet,
    Enemy,
    PowerUp,
}

/// A player or enemy bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
}

/// Looping yoyo path between `origin` and `origin + offset`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patrol {
    pub origin: Vec2,
    pub offset: Vec2,
    /// One-way travel time
    pub duration_ms: f32,
    pub elapsed_ms: f32,
}

impl Patrol {
    /// Advance and return the new position
    pub fn advance(&mut self, dt_ms: f32) -> Vec2 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms) % (2.0 * self.duration_ms).max(1.0);
        self.origin + self.offset * crate::yoyo_progress(self.elapsed_ms, self.duration_ms)
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    /// Wave enemies patrol instead of drifting with `vel`
    pub patrol: Option<Patrol>,
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
}

/// One pool per entity kind
#[derive(Debug, Clone)]
pub struct Pools {
    pub bullets: Pool<Projectile>,
    pub enemy_bullets: Pool<Projectile>,
    pub enemies: Pool<Enemy>,
    pub power_ups: Pool<PowerUp>,
}

impl Pools {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bullets: Pool::new(tuning.bullet_capacity),
            enemy_bullets: Pool::new(tuning.enemy_bullet_capacity),
            enemies: Pool::new(tuning.enemy_capacity),
            power_ups: Pool::new(tuning.power_up_capacity),
        }
    }

    pub fn capacity(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Bullet => self.bullets.capacity(),
            EntityKind::EnemyBullet => self.enemy_bullets.capacity(),
            EntityKind::Enemy => self.enemies.capacity(),
            EntityKind::PowerUp => self.power_ups.capacity(),
        }
    }

    pub fn active_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Bullet => self.bullets.active_count(),
            EntityKind::EnemyBullet => self.enemy_bullets.active_count(),
            EntityKind::Enemy => self.enemies.active_count(),
            EntityKind::PowerUp => self.power_ups.active_count(),
        }
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
    }
}

/// Ratchet stats improved by power-ups, reset each run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub attack_speed_ms: f32,
    pub bullet_damage: i32,
    pub burst_count: u32,
    pub move_speed: f32,
}

impl PlayerStats {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            attack_speed_ms: tuning.attack_speed_ms,
            bullet_damage: tuning.bullet_damage,
            burst_count: tuning.burst_count,
            move_speed: tuning.move_speed,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub stats: PlayerStats,
    /// Clock time of the last volley
    pub last_shot_ms: Option<f64>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_y),
            stats: PlayerStats::from_tuning(tuning),
            last_shot_ms: None,
        }
    }
}

/// Stats stamped onto newly spawned enemies; raised by the difficulty controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    pub speed: f32,
    pub spawn_rate_ms: f64,
}

impl EnemyStats {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            health: tuning.enemy_health,
            speed: tuning.enemy_speed,
            spawn_rate_ms: tuning.enemy_spawn_rate_ms,
        }
    }
}

/// Notable things that happened during a tick, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    EnemyKilled { pos: Vec2, score_gain: u64, combo: u32 },
    PlayerDamaged { amount: i32, health: i32 },
    PowerUpCollected(PowerUpKind),
    ComboExpired,
    LevelUp { level: u32 },
    WaveSpawned { level: u32, count: u32 },
    WaveCleared { level: u32 },
    GameOver { score: u64, new_high_score: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation clock (ms); frozen while paused
    pub clock_ms: f64,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Health, or lives in the wave variant
    pub health: i32,
    pub max_health: i32,
    pub combo: u32,
    pub kill_streak: u32,
    pub last_kill_ms: Option<f64>,
    /// Best score seen, loaded at boot
    pub high_score: u64,
    pub player: Player,
    pub enemy_stats: EnemyStats,
    pub pools: Pools,
    pub timers: Timers,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Boot a session with defaults; gameplay begins on `start`
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            clock_ms: 0.0,
            score: 0,
            level: 1,
            health: tuning.starting_health,
            max_health: tuning.starting_health,
            combo: 0,
            kill_streak: 0,
            last_kill_ms: None,
            high_score,
            player: Player::new(&tuning),
            enemy_stats: EnemyStats::from_tuning(&tuning),
            pools: Pools::new(&tuning),
            timers: Timers::new(),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn variant(&self) -> Variant {
        self.tuning.variant
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.phase, GamePhase::NotStarted | GamePhase::GameOver)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Current score multiplier from the combo counter
    pub fn combo_multiplier(&self) -> u32 {
        super::combat::combo_multiplier(
            self.combo,
            self.tuning.combo_tier,
            self.tuning.max_combo_multiplier,
        )
    }

    /// Enemies left on the field
    pub fn enemies_remaining(&self) -> usize {
        self.pools.enemies.active_count()
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset every per-run value to its default (high score is kept)
    fn reset_run(&mut self) {
        self.clock_ms = 0.0;
        self.score = 0;
        self.level = 1;
        self.health = self.tuning.starting_health;
        self.max_health = self.tuning.starting_health;
        self.combo = 0;
        self.kill_streak = 0;
        self.last_kill_ms = None;
        self.player = Player::new(&self.tuning);
        self.enemy_stats = EnemyStats::from_tuning(&self.tuning);
        self.pools.clear();
        self.timers.cancel_all();
    }

    /// Begin a run. Only valid from `NotStarted`; returns false otherwise.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.reset_run();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("{} run started (seed {})", self.variant().as_str(), self.seed);

        match self.variant() {
            Variant::Wave => {
                super::spawn::spawn_wave(self);
            }
            Variant::Stream => {
                let now = self.clock_ms;
                let enemy_rate = self.enemy_stats.spawn_rate_ms;
                let power_up_rate = self.tuning.power_up_spawn_rate_ms;
                let difficulty_period = self.tuning.difficulty_period_ms;
                self.timers.schedule(TimerKind::EnemySpawn, now, enemy_rate, true);
                self.timers.schedule(TimerKind::PowerUpSpawn, now, power_up_rate, true);
                self.timers.schedule(TimerKind::Difficulty, now, difficulty_period, true);
            }
        }
        true
    }

    /// Pause a running game; no-op in any other phase
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Resume a paused game; no-op in any other phase
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// End the run. Returns true if the score set a new record.
    pub fn game_over(&mut self) -> bool {
        if !self.is_started() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.timers.cancel_all();

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        log::info!(
            "Game over at level {} with score {}{}",
            self.level,
            self.score,
            if new_high_score { " (new high score)" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
        new_high_score
    }

    /// Return to `NotStarted` with default stats, keeping the high score
    pub fn restart(&mut self) {
        self.reset_run();
        self.phase = GamePhase::NotStarted;
        log::info!("Session reset (high score {})", self.high_score);
    }
}
