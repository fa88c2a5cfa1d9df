//! The LED lamp clock: an IR remote sets the time, a stepper hand tracks the
//! hour on a dial, and an ultrasonic sensor wakes the 4-digit display when
//! someone comes near.
//!
//! Controls: CH+/CH- step the hour, +/- step the minute (hold to repeat),
//! EQ zeroes the seconds, and two digit presses in a row set the hour
//! directly.
#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Instant, Timer};
use heapless::String;
use lamp_kit::{
    BitMatrix, DayClock, MiniRemote, MiniRemoteNotifier, Never, OutputArray, RemoteButton,
    RemoteEvent, Result, StepperHand, TickMillis, Ultrasonic, CELL_COUNT, DISPLAY_WAKE,
    MULTIPLEX_SLEEP, PRESENCE_POLL, SEGMENT_COUNT,
};
use panic_probe as _;

/// Presence closer than this wakes the display.
const WAKE_DISTANCE_CM: u32 = 50;

/// Frames sent to the display task; `None` blanks the display.
type FrameNotifier = Channel<CriticalSectionRawMutex, Option<BitMatrix>, 4>;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // 4-digit display, common pins multiplexed by the display task.
    let cells = OutputArray::new([
        Output::new(p.PIN_1, Level::High),
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
    ]);
    let segments = OutputArray::new([
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    ]);
    static FRAMES: FrameNotifier = Channel::new();
    spawner.spawn(display_task(cells, segments, &FRAMES))?;

    static REMOTE_NOTIFIER: MiniRemoteNotifier = MiniRemote::notifier();
    let remote = MiniRemote::new(p.PIN_28, Pull::Up, &REMOTE_NOTIFIER, spawner)?;

    let mut hand = StepperHand::new(OutputArray::new([
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::Low),
    ]));

    let mut sensor = Ultrasonic::new(
        Output::new(p.PIN_14, Level::Low),
        Input::new(p.PIN_15, Pull::None),
        None,
        WAKE_DISTANCE_CM,
    );

    // No battery-backed clock: every boot starts at an assumed midnight
    // until the user dials in the real time.
    let mut clock = DayClock::new(Instant::now().into());
    let mut display_until = Instant::now() + DISPLAY_WAKE;
    let mut pending_digit: Option<u8> = None;
    let mut shown = (u8::MAX, u8::MAX);
    let mut hand_at = (u8::MAX, u8::MAX);

    info!("LED lamp started");
    loop {
        let now = TickMillis::from(Instant::now());
        let (hours, minutes, _seconds) = clock.time_of_day(now);

        let awake = Instant::now() < display_until;
        if awake && shown != (hours, minutes) {
            FRAMES.send(Some(render(hours, minutes)?)).await;
            shown = (hours, minutes);
        } else if !awake && shown != (u8::MAX, u8::MAX) {
            FRAMES.send(None).await;
            shown = (u8::MAX, u8::MAX);
        }

        // Keep the hand on the hour mark. A full catch-up sweep takes a
        // few seconds, during which input waits.
        if hand_at != (hours, minutes) {
            hand.point_to(hour_fraction(hours, minutes)).await?;
            hand_at = (hours, minutes);
        }

        // The poll timer doubles as the tick that notices minute changes
        // and the display going dark.
        match select(remote.wait(), Timer::after(PRESENCE_POLL)).await {
            Either::First(event) => {
                display_until = Instant::now() + DISPLAY_WAKE;
                shown = (u8::MAX, u8::MAX); // force a redraw with fresh time
                let counter = TickMillis::from(Instant::now());
                pending_digit = apply_button(&mut clock, counter, event, pending_digit);
            }
            Either::Second(()) => {
                if sensor.has_fired().await {
                    info!("presence detected - waking display");
                    display_until = Instant::now() + DISPLAY_WAKE;
                }
            }
        }
    }
}

/// Apply one remote event to the clock. Returns the digit-entry state:
/// the first digit of a two-digit hour entry, if one is pending.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Digits are 0-9, so the two-digit hour fits in u8 and is folded modulo 24"
)]
fn apply_button(
    clock: &mut DayClock,
    counter: TickMillis,
    event: RemoteEvent,
    pending_digit: Option<u8>,
) -> Option<u8> {
    // Hour/minute stepping repeats while held; everything else wants a
    // fresh press.
    match event.button() {
        RemoteButton::ChPlus => clock.increment_hour(counter, 1),
        RemoteButton::ChMinus => clock.increment_hour(counter, -1),
        RemoteButton::Plus => clock.increment_minute(counter, 1),
        RemoteButton::Minus => clock.increment_minute(counter, -1),
        RemoteButton::Eq if matches!(event, RemoteEvent::Press(_)) => {
            let (hours, minutes, _seconds) = clock.time_of_day(counter);
            clock.set_time(hours, minutes, 0, counter);
        }
        RemoteButton::Digit(digit) if matches!(event, RemoteEvent::Press(_)) => {
            return match pending_digit {
                None => Some(digit),
                Some(tens) => {
                    let (_hours, minutes, seconds) = clock.time_of_day(counter);
                    // Fold out-of-range entries like 29 instead of rejecting.
                    let hours = (tens * 10 + digit) % 24;
                    clock.set_time(hours, minutes, seconds, counter);
                    None
                }
            };
        }
        _ => {}
    }
    None
}

/// "HH.MM" with the decimal point as the hour/minute separator.
fn render(hours: u8, minutes: u8) -> Result<BitMatrix> {
    let mut text: String<8> = String::new();
    write!(text, "{hours:02}.{minutes:02}")?;
    Ok(BitMatrix::from_text(&text))
}

/// Where on the dial the hour hand belongs, including minute creep.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    clippy::cast_precision_loss,
    reason = "At most 719 minutes around the dial, exactly representable in f32"
)]
fn hour_fraction(hours: u8, minutes: u8) -> f32 {
    let twelfths = u32::from(hours % 12) * 60 + u32::from(minutes);
    twelfths as f32 / 720.0
}

/// Multiplex the display: light each cell in turn, fast enough that the eye
/// sees all four at once.
#[embassy_executor::task]
async fn display_task(
    mut cells: OutputArray<'static, CELL_COUNT>,
    mut segments: OutputArray<'static, SEGMENT_COUNT>,
    frames: &'static FrameNotifier,
) -> ! {
    let mut frame: Option<BitMatrix> = None;
    loop {
        match &frame {
            None => {
                // Dark: park the pins and wait for the next frame.
                let _ = segments.set_from_bits(0);
                let _ = cells.set_from_bits(0xFF);
                frame = frames.receive().await;
            }
            Some(bit_matrix) => {
                for (index, &bits) in bit_matrix.iter().enumerate() {
                    let _ = segments.set_from_bits(bits);
                    // Cells are active-low: clear one bit to light one digit.
                    let _ = cells.set_from_bits(!(1 << index));
                    Timer::after(MULTIPLEX_SLEEP).await;
                }
                if let Ok(next) = frames.try_receive() {
                    frame = next;
                }
            }
        }
    }
}
