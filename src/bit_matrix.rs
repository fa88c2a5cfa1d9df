//! Per-cell segment masks for the 4-digit display.

use core::{array, ops::BitOrAssign, slice};

use crate::leds::Leds;
use crate::shared_constants::CELL_COUNT;

/// One segment bitmask per display cell.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitMatrix([u8; CELL_COUNT]);

impl BitMatrix {
    #[must_use]
    pub const fn new(bits: [u8; CELL_COUNT]) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self([bits; CELL_COUNT])
    }

    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, u8> {
        self.0.iter_mut()
    }

    /// Render text onto the display cells.
    ///
    /// A `.` does not occupy a cell of its own; it lights the decimal point
    /// of the glyph before it (a leading `.` has no home and is dropped).
    /// Characters without a glyph render as [`Leds::ERROR_GLYPH`]. Text
    /// longer than the display turns on every decimal point as an overflow
    /// signal. Unused trailing cells stay dark.
    #[must_use]
    pub fn from_text(input: &str) -> Self {
        let mut bit_matrix = Self::default();
        let mut cell_index: Option<usize> = None;

        for char in input.chars() {
            if char == '.' {
                if let Some(bits) = cell_index.and_then(|index| bit_matrix.0.get_mut(index)) {
                    *bits |= Leds::DECIMAL;
                }
                continue;
            }
            let next = cell_index.map_or(0, |index| index.saturating_add(1));
            let Some(bits) = bit_matrix.0.get_mut(next) else {
                // Too much text for the display.
                bit_matrix |= Leds::DECIMAL;
                break;
            };
            *bits = Self::glyph(char);
            cell_index = Some(next);
        }

        bit_matrix
    }

    #[must_use]
    pub fn from_chars(chars: &[char; CELL_COUNT]) -> Self {
        Self::new(chars.map(Self::glyph))
    }

    #[expect(
        clippy::indexing_slicing,
        clippy::integer_division_remainder_used,
        reason = "Indexing and arithmetic are safe: Leds::DIGITS has 10 elements, and (number % 10) is in 0..9. \
        Modulo is required for digit extraction in no_std."
    )]
    #[must_use]
    pub fn from_number(mut number: u16, padding: u8) -> Self {
        let mut bit_matrix = Self::from_bits(padding);

        for bits in bit_matrix.iter_mut().rev() {
            *bits = Leds::DIGITS[(number % 10) as usize]; // Get the last digit
            number /= 10; // Remove the last digit
            if number == 0 {
                break;
            }
        }
        // If the original number was out of range, turn on all decimal points
        if number > 0 {
            bit_matrix |= Leds::DECIMAL;
        }

        bit_matrix
    }

    fn glyph(char: char) -> u8 {
        match Leds::ASCII_TABLE.get(char as usize) {
            Some(&bits) if bits != 0 || char == ' ' => bits,
            _ => Leds::ERROR_GLYPH,
        }
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self([0; CELL_COUNT])
    }
}

// Implement `|=` for `BitMatrix`
impl BitOrAssign<u8> for BitMatrix {
    fn bitor_assign(&mut self, rhs: u8) {
        self.0.iter_mut().for_each(|bits| *bits |= rhs);
    }
}

impl IntoIterator for BitMatrix {
    type Item = u8;
    type IntoIter = array::IntoIter<u8, CELL_COUNT>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitMatrix {
    type Item = &'a u8;
    type IntoIter = slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut BitMatrix {
    type Item = &'a mut u8;
    type IntoIter = slice::IterMut<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

// implement index for BitMatrix and &BitMatrix
impl core::ops::Index<usize> for BitMatrix {
    type Output = u8;

    #[expect(
        clippy::indexing_slicing,
        reason = "Bounds checking is the caller's responsibility."
    )]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

// index that you can assign to
#[expect(
    clippy::indexing_slicing,
    reason = "Bounds checking is the caller's responsibility."
)]
impl core::ops::IndexMut<usize> for BitMatrix {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}
