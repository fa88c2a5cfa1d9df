//! Host-level tests for the presence sensor's pure parts: echo conversion
//! and the refire gate.

use lamp_kit::ultrasonic::{FIRE_REFRACTORY_MILLIS, echo_micros_to_cm};
use lamp_kit::{FireGate, TickMillis};

#[test]
fn echo_time_converts_to_distance() {
    // Sound covers ~58µs per round-trip centimeter.
    assert_eq!(echo_micros_to_cm(0), 0);
    assert_eq!(echo_micros_to_cm(58), 0);
    assert_eq!(echo_micros_to_cm(59), 1);
    assert_eq!(echo_micros_to_cm(1_000), 17);
    assert_eq!(echo_micros_to_cm(5_880), 99);
    // The sensor's advertised ~4m limit.
    assert_eq!(echo_micros_to_cm(23_530), 400);
}

#[test]
fn first_fire_is_always_allowed() {
    let mut gate = FireGate::new();
    assert!(gate.try_fire(TickMillis(0)));

    let mut gate = FireGate::new();
    assert!(gate.try_fire(TickMillis(u64::MAX)));
}

#[test]
fn refires_inside_the_window_are_blocked() {
    let mut gate = FireGate::new();
    assert!(gate.try_fire(TickMillis(10_000)));
    assert!(!gate.try_fire(TickMillis(10_001)));
    assert!(!gate.try_fire(TickMillis(10_000 + FIRE_REFRACTORY_MILLIS)));
    assert!(gate.try_fire(TickMillis(10_001 + FIRE_REFRACTORY_MILLIS)));
}

#[test]
fn blocked_attempts_do_not_extend_the_window() {
    let mut gate = FireGate::new();
    assert!(gate.try_fire(TickMillis(0)));
    // Hammering the gate mid-window must not push the reopening out.
    assert!(!gate.try_fire(TickMillis(300)));
    assert!(!gate.try_fire(TickMillis(499)));
    assert!(gate.try_fire(TickMillis(FIRE_REFRACTORY_MILLIS + 1)));
}

#[test]
fn gate_survives_a_counter_wrap() {
    let mut gate = FireGate::new();
    assert!(gate.try_fire(TickMillis(u64::MAX - 100)));
    // 200ms of true elapsed time, spanning the wrap: still inside the window.
    assert!(!gate.try_fire(TickMillis(99)));
    // Once the true elapsed time clears the window, fires flow again.
    assert!(gate.try_fire(TickMillis(FIRE_REFRACTORY_MILLIS)));
}
