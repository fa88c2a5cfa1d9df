use embassy_time::Duration;

// The lamp's display is a 4-digit 8-segment module.
pub const CELL_COUNT: usize = 4;
pub const SEGMENT_COUNT: usize = 8;

// The clock hand is a 4-coil geared stepper.
pub const COIL_COUNT: usize = 4;

pub const ONE_SECOND: Duration = Duration::from_secs(1);
pub const ONE_MINUTE: Duration = Duration::from_secs(60);
pub const ONE_HOUR: Duration = Duration::from_secs(60 * 60);
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Repeat rate for hour adjustment while a remote button is held.
pub const HOUR_EDIT_SPEED: Duration = Duration::from_millis(500);
/// Repeat rate for minute adjustment while a remote button is held.
pub const MINUTE_EDIT_SPEED: Duration = Duration::from_millis(250);
/// Dwell time per display cell while multiplexing.
pub const MULTIPLEX_SLEEP: Duration = Duration::from_millis(3);
/// How often the presence sensor is polled.
pub const PRESENCE_POLL: Duration = Duration::from_millis(100);
/// How long the display stays lit after presence is detected or a button
/// is pressed.
pub const DISPLAY_WAKE: Duration = Duration::from_secs(10);
