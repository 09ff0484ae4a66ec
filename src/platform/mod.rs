//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time and run seeds
//! - Keyboard input mapping

pub mod input;

pub use input::{KeyAction, Keyboard};

/// Wall-clock milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run
pub fn new_seed() -> u64 {
    now_ms() as u64
}
