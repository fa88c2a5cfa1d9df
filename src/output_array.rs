use core::convert::Infallible;

use embassy_rp::gpio;
use embedded_hal::digital::OutputPin;

/// A bundle of GPIO outputs driven together from a bit pattern.
pub struct OutputArray<'a, const N: usize>([gpio::Output<'a>; N]);

impl<'a, const N: usize> OutputArray<'a, N> {
    pub fn new(outputs: [gpio::Output<'a>; N]) -> Self {
        Self(outputs)
    }

    /// Drive every output from the low-order `N` bits of `bits`
    /// (bit 0 goes to the first output).
    #[inline]
    #[must_use = "Possible error result should not be ignored"]
    // on some hardware (but not here), setting a bit can fail, so we return a Result
    pub fn set_from_bits(&mut self, mut bits: u8) -> Result<(), Infallible> {
        for output in &mut self.0 {
            let state = (bits & 1) == 1;
            output.set_state(state.into())?;
            bits >>= 1;
        }
        Ok(())
    }
}
