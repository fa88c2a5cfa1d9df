//! Compile-only verification for the lamp's device constructors.
//!
//! Run via: `cargo xtask check-all` (compiled for thumbv6m-none-eabi)

#![cfg(not(feature = "host"))]
#![no_std]
#![no_main]
#![allow(dead_code, reason = "Compile-time verification only")]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use lamp_kit::{
    MiniRemote, MiniRemoteNotifier, OutputArray, RemoteEvent, Result, StepperHand, Ultrasonic,
};
use panic_probe as _;

/// Verify the mini-remote constructor and its wait loop shape.
async fn test_mini_remote(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<()> {
    static NOTIFIER: MiniRemoteNotifier = MiniRemote::notifier();
    let remote = MiniRemote::new(p.PIN_28, Pull::Up, &NOTIFIER, spawner)?;

    let _event: RemoteEvent = remote.wait().await;

    Ok(())
}

/// Verify the stepper hand over a 4-coil output bundle.
async fn test_stepper_hand(p: embassy_rp::Peripherals) -> Result<()> {
    let coils = OutputArray::new([
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::Low),
    ]);
    let mut hand = StepperHand::new(coils);
    hand.point_to(0.25).await?;

    Ok(())
}

/// Verify the ultrasonic sensor with a GPIO-powered VCC pin.
async fn test_ultrasonic_powered(p: embassy_rp::Peripherals) {
    let mut sensor = Ultrasonic::new(
        Output::new(p.PIN_14, Level::Low),
        Input::new(p.PIN_15, Pull::None),
        Some(Output::new(p.PIN_16, Level::High)),
        50,
    );
    let _distance_cm = sensor.distance_cm().await;
    let _fired = sensor.has_fired().await;
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // This main function exists only to satisfy the compiler.
    // The actual verification happens at compile time via the functions above.
}

#[cfg(not(any(target_arch = "arm", target_arch = "riscv32", target_arch = "riscv64")))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo<'_>) -> ! {
    loop {}
}
