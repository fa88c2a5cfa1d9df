//! Device abstractions for the LED lamp clock project.
//!
//! The core is [`DayClock`], a day clock over the wrapping millisecond
//! counter. Around it: a 7-segment digit encoder, an NEC remote decoder,
//! a stepper-motor clock hand and an ultrasonic presence sensor.
#![no_std]

mod bit_matrix;
pub mod day_clock;
mod error;
pub mod ir_remote;
mod leds;
pub mod nec;
mod never;
#[cfg(feature = "pico1")]
mod output_array;
mod shared_constants;
pub mod stepper_hand;
mod tick_millis;
pub mod ultrasonic;

// Re-export commonly used items
pub use bit_matrix::BitMatrix;
pub use day_clock::DayClock;
pub use error::{Error, Result};
#[cfg(feature = "pico1")]
pub use ir_remote::{MiniRemote, MiniRemoteNotifier};
pub use ir_remote::{RemoteButton, RemoteEvent};
pub use leds::Leds;
pub use nec::{NecDecoder, NecEvent};
pub use never::Never;
#[cfg(feature = "pico1")]
pub use output_array::OutputArray;
pub use shared_constants::*;
#[cfg(feature = "pico1")]
pub use stepper_hand::StepperHand;
pub use tick_millis::TickMillis;
pub use ultrasonic::FireGate;
#[cfg(feature = "pico1")]
pub use ultrasonic::Ultrasonic;
