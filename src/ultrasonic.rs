//! HC-SR04 ultrasonic presence sensor.
//!
//! The echo-to-distance conversion and the refire gate are pure;
//! [`Ultrasonic`] below them owns the pins and is only built for the Pico.

#[cfg(feature = "pico1")]
use embassy_rp::gpio::{Input, Output};
#[cfg(feature = "pico1")]
use embassy_time::{with_timeout, Duration, Instant, Timer};

use crate::tick_millis::TickMillis;

/// Minimum quiet time between two fire events.
pub const FIRE_REFRACTORY_MILLIS: u64 = 500;

/// Echo pulses longer than this are out of the sensor's range.
#[cfg(feature = "pico1")]
const ECHO_TIMEOUT: Duration = Duration::from_millis(30);

/// Round-trip echo time to target distance.
///
/// Sound travels 0.034 cm/µs; halved because the pulse goes out and back.
#[expect(
    clippy::integer_division_remainder_used,
    clippy::arithmetic_side_effects,
    reason = "Echo times are bounded by the sensor's ~30ms range, far from overflowing u32"
)]
#[must_use]
pub const fn echo_micros_to_cm(micros: u32) -> u32 {
    micros * 17 / 1000
}

/// Rate limiter over the wrapping millisecond counter: at most one fire per
/// refractory window.
///
/// Elapsed time is computed with wrapping subtraction, so a counter rollover
/// between two fires does not freeze the gate.
pub struct FireGate {
    last_fired: Option<TickMillis>,
}

impl FireGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_fired: None }
    }

    /// Record a fire attempt at `now`. Returns whether it is allowed.
    pub fn try_fire(&mut self, now: TickMillis) -> bool {
        if let Some(last) = self.last_fired {
            let elapsed = now.as_u64().wrapping_sub(last.as_u64());
            if elapsed <= FIRE_REFRACTORY_MILLIS {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }
}

impl Default for FireGate {
    fn default() -> Self {
        Self::new()
    }
}

/// The sensor itself: trigger and echo pins, an optional power pin, and the
/// configured presence distance.
#[cfg(feature = "pico1")]
pub struct Ultrasonic<'a> {
    trigger: Output<'a>,
    echo: Input<'a>,
    // Held so the sensor stays powered; some builds wire VCC directly instead.
    _power: Option<Output<'a>>,
    trigger_distance_cm: u32,
    gate: FireGate,
}

#[cfg(feature = "pico1")]
impl<'a> Ultrasonic<'a> {
    /// Create the sensor. If `power` is given, it must already be driven
    /// high (the pin substitutes for a VCC connection).
    #[must_use]
    pub fn new(
        trigger: Output<'a>,
        echo: Input<'a>,
        power: Option<Output<'a>>,
        trigger_distance_cm: u32,
    ) -> Self {
        Self {
            trigger,
            echo,
            _power: power,
            trigger_distance_cm,
            gate: FireGate::new(),
        }
    }

    /// Measure the distance to the nearest obstacle in centimeters.
    ///
    /// Returns 0 when no echo comes back in time, which also covers a
    /// disconnected sensor.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The echo wait is capped at 30ms, well within u32 microseconds"
    )]
    pub async fn distance_cm(&mut self) -> u32 {
        // The HC-SR04 wants a clean 10µs trigger pulse: low to settle,
        // then high, then low again before listening.
        self.trigger.set_low();
        Timer::after(Duration::from_micros(2)).await;
        self.trigger.set_high();
        Timer::after(Duration::from_micros(10)).await;
        self.trigger.set_low();

        if with_timeout(ECHO_TIMEOUT, self.echo.wait_for_high())
            .await
            .is_err()
        {
            return 0;
        }
        let start = Instant::now();
        if with_timeout(ECHO_TIMEOUT, self.echo.wait_for_low())
            .await
            .is_err()
        {
            return 0;
        }
        let micros = start.elapsed().as_micros() as u32;
        echo_micros_to_cm(micros)
    }

    /// Whether something is within the trigger distance, at most once per
    /// refractory window.
    pub async fn has_fired(&mut self) -> bool {
        let distance_cm = self.distance_cm().await;

        // A zero reading should not be possible from a live sensor;
        // treat it as disconnected.
        if distance_cm == 0 {
            return false;
        }

        distance_cm < self.trigger_distance_cm && self.gate.try_fire(Instant::now().into())
    }
}
