//! Pulse-timing decoder for the NEC infrared remote protocol.
//!
//! Pure state machine over edge timings so it can be exercised without
//! hardware; the receiver task that feeds it lives in [`crate::ir_remote`].
//!
//! An NEC frame is a 9 ms leader burst, a 4.5 ms gap, then 32 bits sent
//! LSB-first as address, inverted address, command, inverted command.
//! Holding a button sends a shorter "repeat" tail instead of a full frame.

/// A decoded remote event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NecEvent {
    /// A full, complement-verified frame.
    Press { addr: u8, cmd: u8 },
    /// A repeat tail; carries the last verified code.
    Repeat { addr: u8, cmd: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DecoderState {
    Idle,
    LeaderLow,
    LeaderHigh,
    BitLow { n: u8, v: u32 },
    BitHigh { n: u8, v: u32 },
    RepeatTail,
}

// µs windows
const GLITCH: u32 = 120;
const LEADER_LOW: (u32, u32) = (7_500, 10_500);
const LEADER_HIGH: (u32, u32) = (3_700, 5_300);
const REPEAT_HIGH: (u32, u32) = (1_750, 2_750);
const BIT_LOW: (u32, u32) = (360, 760);
const BIT0_HIGH: (u32, u32) = (310, 810);
const BIT1_HIGH: (u32, u32) = (1_190, 2_190);

#[inline]
fn in_range(x: u32, range: (u32, u32)) -> bool {
    x >= range.0 && x <= range.1
}

/// Check the address/command complements of a 32-bit frame.
#[inline]
fn verify(frame: u32) -> Option<(u8, u8)> {
    let addr = (frame & 0xFF) as u8;
    let addr_inv = ((frame >> 8) & 0xFF) as u8;
    let cmd = ((frame >> 16) & 0xFF) as u8;
    let cmd_inv = ((frame >> 24) & 0xFF) as u8;
    ((addr ^ addr_inv) == 0xFF && (cmd ^ cmd_inv) == 0xFF).then_some((addr, cmd))
}

/// Edge-fed NEC decoder.
///
/// Call [`edge`](Self::edge) on every level change of the (active-low)
/// receiver output. Sub-glitch pulses are ignored; anything else that does
/// not fit the protocol timings drops the decoder back to idle, where the
/// next leader starts a fresh frame.
pub struct NecDecoder {
    state: DecoderState,
    last_code: Option<(u8, u8)>,
}

impl NecDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            last_code: None,
        }
    }

    /// Feed one edge: `level_low` is the line level after the edge and
    /// `dt_us` how long the previous level lasted.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The bit counter stops at 32, far below u8::MAX"
    )]
    pub fn edge(&mut self, level_low: bool, dt_us: u32) -> Option<NecEvent> {
        if dt_us < GLITCH {
            return None;
        }
        match self.state {
            DecoderState::Idle => {
                if level_low {
                    self.state = DecoderState::LeaderLow;
                }
                None
            }
            DecoderState::LeaderLow => {
                self.state = if !level_low && in_range(dt_us, LEADER_LOW) {
                    DecoderState::LeaderHigh
                } else {
                    DecoderState::Idle
                };
                None
            }
            DecoderState::LeaderHigh => {
                self.state = if level_low && in_range(dt_us, LEADER_HIGH) {
                    DecoderState::BitLow { n: 0, v: 0 }
                } else if level_low && in_range(dt_us, REPEAT_HIGH) {
                    DecoderState::RepeatTail
                } else {
                    DecoderState::Idle
                };
                None
            }
            DecoderState::RepeatTail => {
                let event = if !level_low && in_range(dt_us, BIT_LOW) {
                    self.last_code
                        .map(|(addr, cmd)| NecEvent::Repeat { addr, cmd })
                } else {
                    None
                };
                self.state = DecoderState::Idle;
                event
            }
            DecoderState::BitLow { n, v } => {
                self.state = if !level_low && in_range(dt_us, BIT_LOW) {
                    DecoderState::BitHigh { n, v }
                } else {
                    DecoderState::Idle
                };
                None
            }
            DecoderState::BitHigh { n, mut v } => {
                if level_low && in_range(dt_us, BIT1_HIGH) {
                    v |= 1u32 << n;
                } else if !(level_low && in_range(dt_us, BIT0_HIGH)) {
                    self.state = DecoderState::Idle;
                    return None;
                }

                let n2 = n + 1;
                if n2 == 32 {
                    self.state = DecoderState::Idle;
                    if let Some((addr, cmd)) = verify(v) {
                        self.last_code = Some((addr, cmd));
                        return Some(NecEvent::Press { addr, cmd });
                    }
                    None
                } else {
                    self.state = DecoderState::BitLow { n: n2, v };
                    None
                }
            }
        }
    }
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}
