//! Host-level tests for the day clock arithmetic.

use lamp_kit::day_clock::{DayClock, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use lamp_kit::TickMillis;

#[test]
fn construct_assumes_midnight() {
    let clock = DayClock::new(TickMillis(0));
    assert_eq!(clock.time_of_day(TickMillis(0)), (0, 0, 0));

    // The boot reading is arbitrary; midnight is wherever it happened.
    let clock = DayClock::new(TickMillis(987_654_321));
    assert_eq!(clock.time_of_day(TickMillis(987_654_321)), (0, 0, 0));
}

#[test]
fn example_scenario_3661_seconds_after_boot() {
    let clock = DayClock::new(TickMillis(0));
    assert_eq!(clock.time_of_day(TickMillis(3_661_000)), (1, 1, 1));
}

#[test]
fn set_then_read_round_trips_every_time_of_day() {
    let readings = [
        TickMillis(0),
        TickMillis(123_456_789),
        TickMillis(u64::MAX - 10_000),
    ];
    for reading in readings {
        let mut clock = DayClock::new(TickMillis(0));
        for hours in 0..24 {
            for minutes in 0..60 {
                for seconds in 0..60 {
                    clock.set_time(hours, minutes, seconds, reading);
                    assert_eq!(clock.time_of_day(reading), (hours, minutes, seconds));
                }
            }
        }
    }
}

#[test]
fn set_time_is_idempotent() {
    let mut clock = DayClock::new(TickMillis(42));
    clock.set_time(13, 37, 0, TickMillis(5_000_000));
    let first = clock.time_of_day_millis(TickMillis(6_000_000));
    clock.set_time(13, 37, 0, TickMillis(5_000_000));
    assert_eq!(clock.time_of_day_millis(TickMillis(6_000_000)), first);
}

#[test]
fn clock_advances_in_lock_step_with_the_counter() {
    let mut clock = DayClock::new(TickMillis(1_000));
    clock.set_time(6, 30, 15, TickMillis(1_000_000));

    let r1 = TickMillis(2_000_000);
    let base = clock.time_of_day_millis(r1);
    for k in [0, 1, 999, 60_000, MILLIS_PER_DAY - 1, 3 * MILLIS_PER_DAY + 5] {
        let r2 = TickMillis(r1.as_u64() + k);
        assert_eq!(clock.time_of_day_millis(r2), (base + k) % MILLIS_PER_DAY);
    }
}

#[test]
fn counter_wrap_shifts_phase_by_exactly_the_wrap_magnitude() {
    // The counter's modulus (2^64) is not a whole number of days, so the
    // single wrap appears as a fixed phase jump of (2^64 mod one day).
    // The clock must add no error beyond that.
    let wrap_slip = (u64::MAX % MILLIS_PER_DAY + 1) % MILLIS_PER_DAY;

    let clock = DayClock::new(TickMillis(0));
    let r1 = TickMillis(u64::MAX - 10_000);
    let elapsed = 25_000; // true elapsed wall-time, spanning the wrap
    let r2 = r1.wrapping_add(elapsed);
    assert_eq!(r2.as_u64(), 14_999);

    let expected =
        (clock.time_of_day_millis(r1) + elapsed + MILLIS_PER_DAY - wrap_slip) % MILLIS_PER_DAY;
    assert_eq!(clock.time_of_day_millis(r2), expected);
}

#[test]
fn resynchronizing_after_the_wrap_restores_lock_step() {
    let mut clock = DayClock::new(TickMillis(u64::MAX - 1_000));
    // Post-wrap reading; the user re-syncs the display.
    let r = TickMillis(500_000);
    clock.set_time(8, 0, 0, r);
    assert_eq!(clock.time_of_day(r), (8, 0, 0));
    assert_eq!(
        clock.time_of_day(TickMillis(r.as_u64() + 90 * MILLIS_PER_MINUTE)),
        (9, 30, 0)
    );
}

#[test]
fn hour_increment_wraps_at_the_day_boundary() {
    let r = TickMillis(7_777_777);
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(23, 30, 0, r);
    clock.increment_hour(r, 1);
    assert_eq!(clock.time_of_day(r), (0, 30, 0));
}

#[test]
fn negative_hour_increment_wraps_below_midnight() {
    let r = TickMillis(31_415);
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(0, 0, 0, r);
    clock.increment_hour(r, -1);
    assert_eq!(clock.time_of_day(r), (23, 0, 0));
}

#[test]
fn hour_increment_folds_large_deltas() {
    let r = TickMillis(1_000);
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(10, 15, 30, r);
    clock.increment_hour(r, 49); // 49 mod 24 == 1
    assert_eq!(clock.time_of_day(r), (11, 15, 30));
    clock.increment_hour(r, -25); // -25 mod 24 == -1
    assert_eq!(clock.time_of_day(r), (10, 15, 30));
}

// Minute and second increments wrap within their own field without
// carrying. That matches the lamp's original hand-set behavior and is
// intentional, surprising as it looks.
#[test]
fn minute_increment_does_not_carry_into_the_hour() {
    let r = TickMillis(98_765);
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(10, 59, 30, r);
    clock.increment_minute(r, 1);
    assert_eq!(clock.time_of_day(r), (10, 0, 30));

    clock.set_time(5, 0, 10, r);
    clock.increment_minute(r, -1);
    assert_eq!(clock.time_of_day(r), (5, 59, 10));
}

#[test]
fn second_increment_wraps_without_carrying() {
    let r = TickMillis(55_555);
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(10, 0, 59, r);
    clock.increment_second(r);
    assert_eq!(clock.time_of_day(r), (10, 0, 0));
}

#[test]
fn reads_are_pure_and_repeatable() {
    let mut clock = DayClock::new(TickMillis(0));
    clock.set_time(12, 34, 56, TickMillis(1_000));

    let r = TickMillis(9_999_999);
    let first = clock.time_of_day(r);
    for _ in 0..100 {
        assert_eq!(clock.time_of_day(r), first);
        assert_eq!(
            clock.time_of_day_millis(r),
            clock.time_of_day_millis(r),
            "reads must not mutate the stored offset"
        );
    }
}

#[test]
fn out_of_range_set_folds_instead_of_trapping() {
    let r = TickMillis(0);
    let mut clock = DayClock::new(r);
    // 25:00:00 is nonsense but must not panic; it folds to 01:00:00.
    clock.set_time(25, 0, 0, r);
    assert_eq!(clock.time_of_day(r), (1, 0, 0));
}

#[test]
fn fields_always_come_back_in_range() {
    let mut clock = DayClock::new(TickMillis(3));
    clock.set_time(19, 47, 3, TickMillis(77));
    let mut r = TickMillis(0);
    for _ in 0..10_000 {
        let (hours, minutes, seconds) = clock.time_of_day(r);
        assert!(hours < 24);
        assert!(minutes < 60);
        assert!(seconds < 60);
        r = r.wrapping_add(7 * MILLIS_PER_HOUR + 11);
    }
}
