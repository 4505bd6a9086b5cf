//! Held-key tracking for terminals that may never report key releases.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A key counts as held if its last press/repeat arrived within this window.
/// OS key repeat runs at 15 Hz or faster, so a held key is always refreshed
/// before it expires, whatever the frame rate.
pub const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Last time each key was pressed or repeated.
#[derive(Debug, Clone)]
pub struct HeldKeys<K> {
    last_seen: HashMap<K, Instant>,
    window: Duration,
}

impl<K: Eq + Hash> Default for HeldKeys<K> {
    fn default() -> Self {
        Self::new(HOLD_WINDOW)
    }
}

impl<K: Eq + Hash> HeldKeys<K> {
    pub fn new(window: Duration) -> Self {
        Self {
            last_seen: HashMap::new(),
            window,
        }
    }

    /// Record a press or repeat.
    pub fn touch(&mut self, key: K, at: Instant) {
        self.last_seen.insert(key, at);
    }

    /// Drop a key on an explicit release.
    pub fn release(&mut self, key: &K) {
        self.last_seen.remove(key);
    }

    pub fn is_held(&self, key: &K, now: Instant) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| now.saturating_duration_since(last) <= self.window)
            .unwrap_or(false)
    }

    pub fn any_held(&self, keys: &[K], now: Instant) -> bool {
        keys.iter().any(|k| self.is_held(k, now))
    }
}
