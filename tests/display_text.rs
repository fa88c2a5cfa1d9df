//! Host-level tests for the digit encoder and display masks.

use lamp_kit::{BitMatrix, Leds};

#[test]
fn digits_render_from_the_digit_table() {
    let bit_matrix = BitMatrix::from_text("0123");
    assert_eq!(bit_matrix[0], Leds::DIGITS[0]);
    assert_eq!(bit_matrix[1], Leds::DIGITS[1]);
    assert_eq!(bit_matrix[2], Leds::DIGITS[2]);
    assert_eq!(bit_matrix[3], Leds::DIGITS[3]);
}

#[test]
fn decimal_point_merges_into_the_previous_cell() {
    // The lamp renders time as "HH.MM": four glyph cells, with the dot
    // riding on the hour's ones digit.
    let bit_matrix = BitMatrix::from_text("12.34");
    assert_eq!(bit_matrix[0], Leds::DIGITS[1]);
    assert_eq!(bit_matrix[1], Leds::DIGITS[2] | Leds::DECIMAL);
    assert_eq!(bit_matrix[2], Leds::DIGITS[3]);
    assert_eq!(bit_matrix[3], Leds::DIGITS[4]);
}

#[test]
fn leading_decimal_point_has_no_home_and_is_dropped() {
    let bit_matrix = BitMatrix::from_text(".5");
    assert_eq!(bit_matrix[0], Leds::DIGITS[5]);
    assert_eq!(bit_matrix[1], 0);
}

#[test]
fn unknown_characters_render_the_error_glyph() {
    let bit_matrix = BitMatrix::from_text("1z2*");
    assert_eq!(bit_matrix[0], Leds::DIGITS[1]);
    assert_eq!(bit_matrix[1], Leds::ERROR_GLYPH);
    assert_eq!(bit_matrix[2], Leds::DIGITS[2]);
    assert_eq!(bit_matrix[3], Leds::ERROR_GLYPH);
}

#[test]
fn space_is_a_blank_cell_not_an_error() {
    let bit_matrix = BitMatrix::from_text("1 2");
    assert_eq!(bit_matrix[0], Leds::DIGITS[1]);
    assert_eq!(bit_matrix[1], 0);
    assert_eq!(bit_matrix[2], Leds::DIGITS[2]);
    assert_eq!(bit_matrix[3], 0);
}

#[test]
fn short_text_leaves_trailing_cells_dark() {
    let bit_matrix = BitMatrix::from_text("42");
    assert_eq!(bit_matrix[0], Leds::DIGITS[4]);
    assert_eq!(bit_matrix[1], Leds::DIGITS[2]);
    assert_eq!(bit_matrix[2], 0);
    assert_eq!(bit_matrix[3], 0);
}

#[test]
fn overflowing_text_lights_every_decimal_point() {
    let bit_matrix = BitMatrix::from_text("12345");
    for &bits in &bit_matrix {
        assert_eq!(bits & Leds::DECIMAL, Leds::DECIMAL);
    }
}

#[test]
fn lamp_prompt_glyphs_exist() {
    let bit_matrix = BitMatrix::from_text("HM_-");
    assert_eq!(bit_matrix[0], Leds::ASCII_TABLE[b'H' as usize]);
    assert_eq!(bit_matrix[1], Leds::ASCII_TABLE[b'M' as usize]);
    assert_eq!(bit_matrix[2], Leds::SEG_D);
    assert_eq!(bit_matrix[3], Leds::SEG_G);
    assert_ne!(bit_matrix[0], 0);
    assert_ne!(bit_matrix[1], 0);
}

#[test]
fn hex_renders_in_both_cases() {
    assert_eq!(
        BitMatrix::from_text("AbCd"),
        BitMatrix::from_text("abcd"),
        "upper and lower case share glyphs"
    );
}

#[test]
fn from_number_right_aligns_and_pads() {
    let bit_matrix = BitMatrix::from_number(42, 0);
    assert_eq!(bit_matrix[0], 0);
    assert_eq!(bit_matrix[1], 0);
    assert_eq!(bit_matrix[2], Leds::DIGITS[4]);
    assert_eq!(bit_matrix[3], Leds::DIGITS[2]);
}

#[test]
fn from_number_flags_out_of_range_values() {
    let bit_matrix = BitMatrix::from_number(65_535, 0);
    for &bits in &bit_matrix {
        assert_eq!(bits & Leds::DECIMAL, Leds::DECIMAL);
    }
}

#[test]
fn from_chars_matches_from_text_for_plain_glyphs() {
    assert_eq!(
        BitMatrix::from_chars(&['1', '2', '3', '4']),
        BitMatrix::from_text("1234")
    );
}
