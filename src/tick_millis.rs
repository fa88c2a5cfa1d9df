//! Counter-reading type shared by the time-related devices.

/// Units-safe wrapper for a reading of the free-running millisecond counter.
///
/// The counter starts at an arbitrary epoch (typically device boot), increases
/// monotonically, and wraps from `u64::MAX` back to zero. Nothing in this
/// crate assumes the wrap never happens.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickMillis(pub u64);

impl TickMillis {
    /// Get the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The reading `delta` milliseconds after `self`, wrapping at the
    /// counter's maximum.
    #[must_use]
    pub const fn wrapping_add(self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

impl From<embassy_time::Instant> for TickMillis {
    fn from(instant: embassy_time::Instant) -> Self {
        Self(instant.as_millis())
    }
}
