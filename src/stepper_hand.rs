//! Stepper-motor clock hand: a 28BYJ-48 geared stepper pointing at a
//! fraction of a circular dial.
//!
//! The dial arithmetic is pure; [`StepperHand`] below it owns the coil
//! outputs and is only built for the Pico.

#[cfg(feature = "pico1")]
use defmt::info;
#[cfg(feature = "pico1")]
use embassy_time::{Duration, Timer};

#[cfg(feature = "pico1")]
use crate::output_array::OutputArray;
#[cfg(feature = "pico1")]
use crate::shared_constants::COIL_COUNT;
#[cfg(feature = "pico1")]
use crate::Result;

/// Steps per output-shaft revolution of the 28BYJ-48 behind its gearbox.
pub const STEPS_PER_REVOLUTION: i32 = 2048;
/// Rated motor speed.
pub const MOTOR_RPM: u32 = 10;

/// Absolute step index for a dial position given as a fraction in
/// `[0.0, 1.0)`. Truncates toward zero, matching the step grid.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "The dial has 2048 positions; f32 represents every one of them exactly"
)]
#[must_use]
pub fn dial_to_steps(fraction: f32) -> i32 {
    (STEPS_PER_REVOLUTION as f32 * fraction) as i32
}

/// Signed step adjustment from `current` to `target`, taking the short way
/// around the dial: any move longer than half a revolution goes the other
/// direction instead.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "Both positions are within one revolution, so the difference fits easily in i32"
)]
#[must_use]
pub const fn shortest_path(current: i32, target: i32) -> i32 {
    let mut adjustment = target - current;
    if adjustment.abs() > STEPS_PER_REVOLUTION / 2 {
        if adjustment > 0 {
            adjustment -= STEPS_PER_REVOLUTION;
        } else {
            adjustment += STEPS_PER_REVOLUTION;
        }
    }
    adjustment
}

/// Full-step coil energization sequence; bit `i` drives coil `i`.
#[cfg(feature = "pico1")]
const COIL_PATTERNS: [u8; 4] = [0b0101, 0b0110, 0b1010, 0b1001];

/// Delay between steps at the rated speed:
/// 60 s / (10 rpm * 2048 steps) ≈ 2929 µs.
#[cfg(feature = "pico1")]
const STEP_INTERVAL: Duration = Duration::from_micros(2_929);

/// The clock hand itself: four coil outputs plus the current dial position.
#[cfg(feature = "pico1")]
pub struct StepperHand<'a> {
    coils: OutputArray<'a, COIL_COUNT>,
    /// Current position in `[0, STEPS_PER_REVOLUTION)`; assumed to start
    /// at the dial's zero mark.
    step_index: i32,
}

#[cfg(feature = "pico1")]
impl<'a> StepperHand<'a> {
    #[must_use]
    pub fn new(coils: OutputArray<'a, COIL_COUNT>) -> Self {
        Self {
            coils,
            step_index: 0,
        }
    }

    /// Move the hand to the given fraction of the dial via the shortest
    /// path. Returns once the move is complete.
    ///
    /// # Errors
    /// Returns an error if a coil output cannot be set.
    pub async fn point_to(&mut self, fraction: f32) -> Result<()> {
        let target = dial_to_steps(fraction);
        let adjustment = shortest_path(self.step_index, target);
        info!(
            "hand: {} -> {} steps (adjust {})",
            self.step_index, target, adjustment
        );
        self.step(adjustment).await?;
        self.step_index = target;
        Ok(())
    }

    /// Run `count` steps (sign is direction), pacing at the rated speed.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "The phase accumulator stays within one revolution of its start"
    )]
    #[expect(
        clippy::indexing_slicing,
        clippy::cast_sign_loss,
        reason = "rem_euclid(4) lands inside the 4-entry pattern table"
    )]
    async fn step(&mut self, count: i32) -> Result<()> {
        let direction = count.signum();
        let mut phase = self.step_index;
        for _ in 0..count.unsigned_abs() {
            phase += direction;
            let pattern = COIL_PATTERNS[phase.rem_euclid(4) as usize];
            self.coils.set_from_bits(pattern)?;
            Timer::after(STEP_INTERVAL).await;
        }
        Ok(())
    }
}
