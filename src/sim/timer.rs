//! Simulation-clock timers
//!
//! One slot per timer kind. Scheduling a kind replaces whatever was pending
//! in its slot, so re-arming never produces duplicate firings. Timers only
//! advance when the simulation clock does, which is how pause freezes them.

use serde::{Deserialize, Serialize};

/// Every timer the simulation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    EnemySpawn,
    PowerUpSpawn,
    Difficulty,
    ComboReset,
    NextWave,
}

impl TimerKind {
    pub const ALL: [TimerKind; 5] = [
        TimerKind::EnemySpawn,
        TimerKind::PowerUpSpawn,
        TimerKind::Difficulty,
        TimerKind::ComboReset,
        TimerKind::NextWave,
    ];

    fn slot(self) -> usize {
        match self {
            TimerKind::EnemySpawn => 0,
            TimerKind::PowerUpSpawn => 1,
            TimerKind::Difficulty => 2,
            TimerKind::ComboReset => 3,
            TimerKind::NextWave => 4,
        }
    }
}

/// A pending timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// Clock time (ms) of the next firing
    pub due_ms: f64,
    /// Repeat period, `None` for one-shot
    pub period_ms: Option<f64>,
}

/// Timer table keyed by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    slots: [Option<Timer>; 5],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire `delay_ms` after `now_ms`, replacing any pending instance
    pub fn schedule(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64, repeat: bool) {
        let delay_ms = delay_ms.max(0.0);
        self.slots[kind.slot()] = Some(Timer {
            due_ms: now_ms + delay_ms,
            // A zero period would fire forever within one advance
            period_ms: (repeat && delay_ms > 0.0).then_some(delay_ms),
        });
    }

    /// Cancel a pending timer. Returns false if nothing was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn get(&self, kind: TimerKind) -> Option<&Timer> {
        self.slots[kind.slot()].as_ref()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.get(kind).is_some()
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Repeating timers are re-armed one period later; one-shots are cleared.
    /// Call repeatedly until `None` so that callbacks which re-arm timers see
    /// the table in a consistent state between firings.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter_map(|k| self.get(k).map(|t| (k, t.due_ms)))
            .filter(|&(_, due)| due <= now_ms)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)?;

        let slot = &mut self.slots[kind.slot()];
        match slot.and_then(|t| t.period_ms) {
            Some(period) => {
                if let Some(timer) = slot.as_mut() {
                    timer.due_ms += period;
                }
            }
            None => *slot = None,
        }
        Some(kind)
    }
}
