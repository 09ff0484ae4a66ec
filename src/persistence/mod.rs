//! Scalar persistence
//!
//! The game stores single integers by key. On the web that is LocalStorage;
//! elsewhere an in-memory map stands in. Storage problems are logged and
//! treated as a missing value so they never interrupt play.

use std::collections::HashMap;

/// Key/value store of integer scalars
pub trait ScalarStore {
    fn load_scalar(&self, key: &str) -> Option<u64>;
    fn save_scalar(&mut self, key: &str, value: u64);
}

/// Parse a stored scalar; tolerates whitespace and a float rendering ("1200.0")
pub fn parse_scalar(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

/// In-memory store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScalarStore for MemoryStore {
    fn load_scalar(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    fn save_scalar(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScalarStore for LocalStorage {
    fn load_scalar(&self, key: &str) -> Option<u64> {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, '{}' not loaded", key);
            return None;
        };
        let raw = storage.get_item(key).ok().flatten()?;
        let value = parse_scalar(&raw);
        if value.is_none() {
            log::warn!("Ignoring unreadable '{}' value: {:?}", key, raw);
        }
        value
    }

    fn save_scalar(&mut self, key: &str, value: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &value.to_string()).is_err() {
                    log::warn!("Failed to save '{}'", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, '{}' not saved", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_scalar("highScore"), None);
        store.save_scalar("highScore", 1200);
        assert_eq!(store.load_scalar("highScore"), Some(1200));
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("1200"), Some(1200));
        assert_eq!(parse_scalar(" 42\n"), Some(42));
        assert_eq!(parse_scalar("300.0"), Some(300));
        assert_eq!(parse_scalar("-5"), None);
        assert_eq!(parse_scalar("abc"), None);
        assert_eq!(parse_scalar(""), None);
    }
}
