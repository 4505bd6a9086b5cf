use std::time::{Duration, Instant};

use life_invaders::input::{HeldKeys, HOLD_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    Left,
    Right,
}

#[test]
fn unseen_key_is_not_held() {
    let held: HeldKeys<Key> = HeldKeys::default();
    assert!(!held.is_held(&Key::Left, Instant::now()));
}

#[test]
fn held_between_os_repeats_at_any_frame_rate() {
    // 15 Hz repeat → ≈66 ms between events; at 240 FPS that is 16 frames
    let t0 = Instant::now();
    let mut held = HeldKeys::default();
    held.touch(Key::Left, t0);
    assert!(held.is_held(&Key::Left, t0 + Duration::from_millis(66)));
    assert!(held.is_held(&Key::Left, t0 + HOLD_WINDOW));
}

#[test]
fn key_expires_after_window() {
    let t0 = Instant::now();
    let mut held = HeldKeys::default();
    held.touch(Key::Left, t0);
    assert!(!held.is_held(&Key::Left, t0 + HOLD_WINDOW + Duration::from_millis(1)));
}

#[test]
fn repeat_refreshes_the_window() {
    let t0 = Instant::now();
    let mut held = HeldKeys::default();
    held.touch(Key::Right, t0);
    held.touch(Key::Right, t0 + Duration::from_millis(100));
    assert!(held.is_held(&Key::Right, t0 + Duration::from_millis(200)));
}

#[test]
fn release_drops_immediately() {
    let t0 = Instant::now();
    let mut held = HeldKeys::default();
    held.touch(Key::Left, t0);
    held.release(&Key::Left);
    assert!(!held.is_held(&Key::Left, t0));
}

#[test]
fn any_held_checks_every_alias() {
    let t0 = Instant::now();
    let mut held = HeldKeys::new(Duration::from_millis(50));
    held.touch(Key::Right, t0);
    assert!(held.any_held(&[Key::Left, Key::Right], t0 + Duration::from_millis(10)));
    assert!(!held.any_held(&[Key::Left], t0));
}
