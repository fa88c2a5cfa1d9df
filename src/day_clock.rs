//! Day-relative wall-clock tracking over the free-running millisecond counter.
//!
//! The lamp has no battery-backed real-time clock: its only time source is a
//! monotonic millisecond counter that starts at an arbitrary epoch (typically
//! boot) and eventually wraps from its maximum value to zero. [`DayClock`]
//! stores a single day-relative correction (the "fudge offset") and derives
//! hours, minutes and seconds from any counter reading the caller passes in.
//!
//! Unlike most device abstractions in this crate, [`DayClock`] does not require
//! static resources and can be instantiated directly.

use crate::tick_millis::TickMillis;

/// Milliseconds in one second.
pub const MILLIS_PER_SECOND: u64 = 1000;
/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
/// Milliseconds in one day.
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Reduce `value` into `[0, modulus)` regardless of its sign.
///
/// The `%` operator follows the sign of the dividend, so a plain
/// `value % modulus` is negative for negative `value`. Adding the modulus
/// before the final reduction keeps every operand non-negative.
#[expect(
    clippy::integer_division_remainder_used,
    clippy::arithmetic_side_effects,
    reason = "value % modulus is within (-modulus, modulus), so adding the modulus cannot overflow"
)]
const fn wrap_mod(value: i64, modulus: i64) -> i64 {
    (value % modulus + modulus) % modulus
}

/// A drift-free day clock over the wrapping millisecond counter.
///
/// The clock never reads time itself; every operation takes the current
/// counter reading as an argument. Displayed time is always
/// `(reading + fudge offset) mod one day`, so a wrap of the underlying
/// counter folds into the day arithmetic instead of corrupting a stored
/// delta.
///
/// `DayClock` holds one word of state and provides no internal
/// synchronization: it assumes a single execution context. To share it
/// between tasks, wrap it in an `embassy_sync` mutex or confine updates
/// and reads to one task.
///
/// # Example
///
/// ```
/// use lamp_kit::day_clock::DayClock;
/// use lamp_kit::TickMillis;
///
/// // At boot the counter reads 0 and the display starts at midnight.
/// let mut clock = DayClock::new(TickMillis(0));
///
/// // 3661 seconds later the display reads 01:01:01.
/// assert_eq!(clock.time_of_day(TickMillis(3_661_000)), (1, 1, 1));
///
/// // The user dials in the real time; later readings advance from there.
/// clock.set_time(7, 30, 0, TickMillis(3_661_000));
/// assert_eq!(clock.time_of_day(TickMillis(3_661_000)), (7, 30, 0));
/// ```
pub struct DayClock {
    /// Correction added (mod one day) to a counter reading to obtain
    /// milliseconds since midnight. Always in `[0, MILLIS_PER_DAY)`.
    fudge_millis: u64,
}

impl DayClock {
    /// Create a clock that reads midnight at `counter`.
    #[must_use]
    pub fn new(counter: TickMillis) -> Self {
        Self {
            fudge_millis: Self::compute_offset(0, 0, 0, counter),
        }
    }

    /// Fudge offset that makes `counter` read as `hours:minutes:seconds`.
    ///
    /// Out-of-range fields are not rejected; they fold modularly into a
    /// defined (if meaningless) offset. A clock display must keep running,
    /// so validation is left to the caller.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Both operands of the subtraction are below one day, so the i64 delta cannot overflow"
    )]
    #[expect(
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        reason = "Values are reduced modulo one day before each cast"
    )]
    fn compute_offset(hours: u8, minutes: u8, seconds: u8, counter: TickMillis) -> u64 {
        // Where the raw counter sits within a notional day, ignoring
        // wall-clock meaning.
        let relative_offset = counter.as_u64() % MILLIS_PER_DAY;
        let desired_offset = u64::from(hours) * MILLIS_PER_HOUR
            + u64::from(minutes) * MILLIS_PER_MINUTE
            + u64::from(seconds) * MILLIS_PER_SECOND;
        let delta = desired_offset as i64 - relative_offset as i64;
        wrap_mod(delta, MILLIS_PER_DAY as i64) as u64
    }

    /// Set the displayed time at the given counter reading.
    ///
    /// Idempotent: repeating the call with the same arguments stores the
    /// same offset.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8, counter: TickMillis) {
        self.fudge_millis = Self::compute_offset(hours, minutes, seconds, counter);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "set {:02}:{:02}:{:02} at counter {} -> fudge {}ms",
            hours,
            minutes,
            seconds,
            counter.as_u64(),
            self.fudge_millis
        );
    }

    /// Milliseconds since midnight at the given counter reading.
    ///
    /// Pure: reads never mutate the stored offset. The addition wraps, so a
    /// counter that has rolled over past its maximum still produces a value
    /// in `[0, MILLIS_PER_DAY)`.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Reduction modulo one day is the whole point"
    )]
    #[must_use]
    pub fn time_of_day_millis(&self, counter: TickMillis) -> u64 {
        counter.as_u64().wrapping_add(self.fudge_millis) % MILLIS_PER_DAY
    }

    /// Hour, minute and second at the given counter reading.
    ///
    /// Always returns hour in `[0, 23]` and minute/second in `[0, 59]`.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Successive division of a value below one day cannot overflow or divide by zero"
    )]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Each field is below its modulus, well within u8"
    )]
    #[must_use]
    pub fn time_of_day(&self, counter: TickMillis) -> (u8, u8, u8) {
        let mut remainder = self.time_of_day_millis(counter);
        let hours = remainder / MILLIS_PER_HOUR;
        remainder -= hours * MILLIS_PER_HOUR;
        let minutes = remainder / MILLIS_PER_MINUTE;
        remainder -= minutes * MILLIS_PER_MINUTE;
        let seconds = remainder / MILLIS_PER_SECOND;
        (hours as u8, minutes as u8, seconds as u8)
    }

    /// Shift the displayed hour by `delta` (any sign), leaving minutes and
    /// seconds unchanged. Wraps at the day boundary, so `23 + 1` lands on 0.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "wrap_mod reduces the sum into [0, 24)"
    )]
    pub fn increment_hour(&mut self, counter: TickMillis, delta: i32) {
        let (hours, minutes, seconds) = self.time_of_day(counter);
        let new_hours = wrap_mod(i64::from(hours).wrapping_add(i64::from(delta)), 24) as u8;
        self.set_time(new_hours, minutes, seconds, counter);
    }

    /// Shift the displayed minute by `delta` (any sign), leaving hour and
    /// second unchanged.
    ///
    /// Wraps within the minute field only: stepping past 59 does NOT carry
    /// into the hour. The lamp's original firmware behaved this way and the
    /// hand-set UI depends on it, so it is kept rather than "fixed".
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "wrap_mod reduces the sum into [0, 60)"
    )]
    pub fn increment_minute(&mut self, counter: TickMillis, delta: i32) {
        let (hours, minutes, seconds) = self.time_of_day(counter);
        let new_minutes = wrap_mod(i64::from(minutes).wrapping_add(i64::from(delta)), 60) as u8;
        self.set_time(hours, new_minutes, seconds, counter);
    }

    /// Advance the displayed second by one, wrapping 59 back to 0 without
    /// carrying into the minute (same quirk as [`increment_minute`](Self::increment_minute)).
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "seconds is below 60, so the increment cannot overflow"
    )]
    pub fn increment_second(&mut self, counter: TickMillis) {
        let (hours, minutes, seconds) = self.time_of_day(counter);
        self.set_time(hours, minutes, (seconds + 1) % 60, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::wrap_mod;

    #[test]
    fn wrap_mod_covers_both_signs() {
        assert_eq!(wrap_mod(0, 24), 0);
        assert_eq!(wrap_mod(25, 24), 1);
        assert_eq!(wrap_mod(-1, 24), 23);
        assert_eq!(wrap_mod(-49, 24), 23);
        assert_eq!(wrap_mod(i64::from(i32::MIN), 60), 52);
    }
}
