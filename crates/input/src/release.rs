//! Synthetic key releases for terminals without key-release events.
//!
//! Most terminals only report presses (plus their own auto-repeat presses).
//! The tracker remembers when each held control was last seen and emits the
//! matching key-up intent once it has been quiet for longer than the timeout.

use std::time::{Duration, Instant};

use crate::map::Control;
use crate::types::Intent;
use crate::Intents;

// Short enough that a single tap does not turn into a sustained hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

const HELD_CONTROLS: [Control; 3] = [Control::Left, Control::Right, Control::SoftDrop];

#[derive(Debug, Clone)]
pub struct KeyReleaseTracker {
    timeout: Duration,
    /// Last press per held control, in `HELD_CONTROLS` order
    last_seen: [Option<Instant>; 3],
}

impl KeyReleaseTracker {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            last_seen: [None; 3],
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Record an intent that is about to reach the engine
    ///
    /// Presses of held controls refresh their timestamp; real releases forget
    /// them. Everything else is ignored, so tapping rotate does not keep a
    /// stale movement key alive.
    pub fn observe(&mut self, intent: Intent, now: Instant) {
        let (slot, pressed) = match intent {
            Intent::MoveLeftDown => (0, true),
            Intent::MoveLeftUp => (0, false),
            Intent::MoveRightDown => (1, true),
            Intent::MoveRightUp => (1, false),
            Intent::SoftDropDown => (2, true),
            Intent::SoftDropUp => (2, false),
            _ => return,
        };
        self.last_seen[slot] = pressed.then_some(now);
    }

    /// Push key-up intents for every control quiet for longer than the timeout
    ///
    /// A control stays held until its key-up actually fits in `out`; a full
    /// buffer defers the release to the next call.
    pub fn expire(&mut self, now: Instant, out: &mut Intents) {
        for (slot, control) in HELD_CONTROLS.iter().enumerate() {
            let Some(seen) = self.last_seen[slot] else {
                continue;
            };
            if now.saturating_duration_since(seen) <= self.timeout {
                continue;
            }
            let Some(intent) = control.release() else {
                continue;
            };
            if out.try_push(intent).is_ok() {
                self.last_seen[slot] = None;
            }
        }
    }

    /// Whether any held control is still considered down
    pub fn any_held(&self) -> bool {
        self.last_seen.iter().any(Option::is_some)
    }
}

impl Default for KeyReleaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> KeyReleaseTracker {
        KeyReleaseTracker::with_timeout(Duration::from_millis(50))
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Intent::MoveLeftDown, start);

        let mut out = Intents::new();
        t.expire(start + Duration::from_millis(50), &mut out);
        assert!(out.is_empty());

        t.expire(start + Duration::from_millis(51), &mut out);
        assert_eq!(out.as_slice(), &[Intent::MoveLeftUp]);
        assert!(!t.any_held());

        // Already released; nothing more.
        out.clear();
        t.expire(start + Duration::from_secs(5), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_repeated_press_extends_hold() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Intent::SoftDropDown, start);
        t.observe(Intent::SoftDropDown, start + Duration::from_millis(40));

        let mut out = Intents::new();
        t.expire(start + Duration::from_millis(80), &mut out);
        assert!(out.is_empty());
        assert!(t.any_held());
    }

    #[test]
    fn test_non_movement_key_does_not_extend_timeout() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Intent::MoveRightDown, start);
        t.observe(Intent::RotateCw, start + Duration::from_millis(45));

        let mut out = Intents::new();
        t.expire(start + Duration::from_millis(60), &mut out);
        assert_eq!(out.as_slice(), &[Intent::MoveRightUp]);
    }

    #[test]
    fn test_real_release_is_not_repeated() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Intent::MoveLeftDown, start);
        t.observe(Intent::MoveLeftUp, start + Duration::from_millis(10));

        let mut out = Intents::new();
        t.expire(start + Duration::from_secs(1), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_release_waits_for_room_in_full_buffer() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Intent::MoveLeftDown, start);

        let mut out = Intents::new();
        while out.try_push(Intent::RotateCw).is_ok() {}
        t.expire(start + Duration::from_millis(60), &mut out);
        assert!(!out.contains(&Intent::MoveLeftUp));
        assert!(t.any_held());

        out.clear();
        t.expire(start + Duration::from_secs(10), &mut out);
        assert_eq!(out.as_slice(), &[Intent::MoveLeftUp]);
        assert!(!t.any_held());
    }

    #[test]
    fn test_default_timeout_is_non_zero() {
        assert!(KeyReleaseTracker::new().timeout() > Duration::ZERO);
    }
}
