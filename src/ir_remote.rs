//! Device abstraction for the lamp's 21-button NEC "mini remote".
//!
//! The button table and event types are pure; the receiver device below them
//! is hardware-facing and only built for the Pico.

#[cfg(feature = "pico1")]
use defmt::info;
#[cfg(feature = "pico1")]
use embassy_executor::Spawner;
#[cfg(feature = "pico1")]
use embassy_rp::Peri;
#[cfg(feature = "pico1")]
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
#[cfg(feature = "pico1")]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(feature = "pico1")]
use embassy_sync::channel::Channel;
#[cfg(feature = "pico1")]
use embassy_time::Instant;
#[cfg(feature = "pico1")]
use heapless::LinearMap;

#[cfg(feature = "pico1")]
use crate::nec::{NecDecoder, NecEvent};
#[cfg(feature = "pico1")]
use crate::{Error, Result};

/// The NEC address every button of the mini remote transmits.
pub const MINI_REMOTE_ADDR: u8 = 0x00;

/// One of the mini remote's buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteButton {
    ChMinus,
    Ch,
    ChPlus,
    Prev,
    Next,
    PlayPause,
    Minus,
    Plus,
    Eq,
    Hundred,
    TwoHundred,
    Digit(u8),
}

/// A recognized button, distinguishing a fresh press from a held repeat so
/// callers can implement hold-to-adjust.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteEvent {
    Press(RemoteButton),
    Repeat(RemoteButton),
}

impl RemoteEvent {
    /// The button, ignoring whether it was a press or a repeat.
    #[must_use]
    pub const fn button(self) -> RemoteButton {
        match self {
            Self::Press(button) | Self::Repeat(button) => button,
        }
    }
}

/// NEC command byte of every button, LSB-first as the decoder produces them.
pub const BUTTON_CODES: [(u8, RemoteButton); 21] = [
    (0x45, RemoteButton::ChMinus),
    (0x46, RemoteButton::Ch),
    (0x47, RemoteButton::ChPlus),
    (0x44, RemoteButton::Prev),
    (0x40, RemoteButton::Next),
    (0x43, RemoteButton::PlayPause),
    (0x07, RemoteButton::Minus),
    (0x15, RemoteButton::Plus),
    (0x09, RemoteButton::Eq),
    (0x19, RemoteButton::Hundred),
    (0x0D, RemoteButton::TwoHundred),
    (0x16, RemoteButton::Digit(0)),
    (0x0C, RemoteButton::Digit(1)),
    (0x18, RemoteButton::Digit(2)),
    (0x5E, RemoteButton::Digit(3)),
    (0x08, RemoteButton::Digit(4)),
    (0x1C, RemoteButton::Digit(5)),
    (0x5A, RemoteButton::Digit(6)),
    (0x42, RemoteButton::Digit(7)),
    (0x52, RemoteButton::Digit(8)),
    (0x4A, RemoteButton::Digit(9)),
];

/// Channel carrying raw decoder events from the receiver task.
#[cfg(feature = "pico1")]
pub type MiniRemoteNotifier = Channel<CriticalSectionRawMutex, NecEvent, 8>;

/// The IR receiver plus the button mapping for the mini remote.
///
/// # Example
/// ```no_run
/// # use embassy_executor::Spawner;
/// # use embassy_rp::gpio::Pull;
/// # use lamp_kit::{MiniRemote, MiniRemoteNotifier, RemoteEvent};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> lamp_kit::Result<()> {
/// static NOTIFIER: MiniRemoteNotifier = MiniRemote::notifier();
///
/// let remote = MiniRemote::new(p.PIN_28, Pull::Up, &NOTIFIER, spawner)?;
/// loop {
///     match remote.wait().await {
///         RemoteEvent::Press(button) => defmt::info!("pressed {:?}", button),
///         RemoteEvent::Repeat(button) => defmt::info!("held {:?}", button),
///     }
/// }
/// # }
/// ```
#[cfg(feature = "pico1")]
pub struct MiniRemote<'a> {
    notifier: &'a MiniRemoteNotifier,
    button_map: LinearMap<u8, RemoteButton, 21>,
}

#[cfg(feature = "pico1")]
impl MiniRemote<'_> {
    /// Create a new notifier channel for decoder events.
    #[must_use]
    pub const fn notifier() -> MiniRemoteNotifier {
        Channel::new()
    }

    /// Start the receiver task on the given GPIO pin.
    ///
    /// IR receiver modules idle high, so `Pull::Up` is the usual choice.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        pull: Pull,
        notifier: &'static MiniRemoteNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let any: Peri<'static, AnyPin> = pin.into();
        spawner
            .spawn(receiver_task(ReceiverDevice::new(any, pull), notifier))
            .map_err(Error::TaskSpawn)?;

        let mut button_map = LinearMap::new();
        for (cmd, button) in BUTTON_CODES {
            let _ = button_map.insert(cmd, button);
        }

        Ok(Self {
            notifier,
            button_map,
        })
    }

    /// Wait for the next recognized button.
    ///
    /// Codes from other remotes (or corrupted frames that still verify)
    /// are logged and ignored.
    pub async fn wait(&self) -> RemoteEvent {
        loop {
            let event = self.notifier.receive().await;
            let (NecEvent::Press { addr, cmd } | NecEvent::Repeat { addr, cmd }) = event;
            if addr != MINI_REMOTE_ADDR {
                info!("IR from foreign remote - addr=0x{:02X} (ignoring)", addr);
                continue;
            }
            if let Some(&button) = self.button_map.get(&cmd) {
                return match event {
                    NecEvent::Press { .. } => RemoteEvent::Press(button),
                    NecEvent::Repeat { .. } => RemoteEvent::Repeat(button),
                };
            }
            info!("IR unknown command 0x{:02X} (ignoring)", cmd);
        }
    }
}

#[cfg(feature = "pico1")]
struct ReceiverDevice {
    pin: Input<'static>,
}

#[cfg(feature = "pico1")]
impl ReceiverDevice {
    fn new(pin: Peri<'static, AnyPin>, pull: Pull) -> Self {
        let pin = Input::new(pin, pull);
        Self { pin }
    }
}

#[cfg(feature = "pico1")]
#[embassy_executor::task]
async fn receiver_task(mut device: ReceiverDevice, notifier: &'static MiniRemoteNotifier) -> ! {
    let mut decoder = NecDecoder::new();
    let mut level_low = device.pin.is_low();
    let mut last_edge = Instant::now();

    info!("IR receiver task started");
    loop {
        device.pin.wait_for_any_edge().await;

        let now = Instant::now();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "NEC pulse widths are far below u32 microseconds; longer gaps saturate harmlessly"
        )]
        let dt_us = now.duration_since(last_edge).as_micros() as u32;
        last_edge = now;

        // Active-low receiver: every edge toggles the level.
        level_low = !level_low;

        if let Some(event) = decoder.edge(level_low, dt_us) {
            notifier.send(event).await;
        }
    }
}
