//! Page geometry and the static font-metric table for the letter font.
//!
//! The letter uses Times-Roman, one of the 14 standard PDF fonts, so nothing
//! is embedded: the viewer supplies the glyphs and we only need the advance
//! widths to break lines. Widths come from the Adobe AFM for Times-Roman,
//! divided by 1000 to give em units. The table covers ASCII 0x20..=0x7E
//! (95 printable characters). Index = (char as usize) - 32.
//!
//! Text is written with `WinAnsiEncoding`; characters outside that code page
//! are rendered (and measured) as `?`.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

pub const POINTS_PER_INCH: f32 = 72.0;

/// Geometry of a letter page, in PDF points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
}

impl PageConfig {
    /// Usable text width between the left and right margins.
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - self.margin_left_pt - self.margin_right_pt
    }

    /// Y coordinate of the top margin (PDF origin is bottom-left).
    pub fn top_pt(&self) -> f32 {
        self.page_height_pt - self.margin_top_pt
    }
}

/// US letter (8.5" × 11"), 1.0" margins all sides.
pub fn letter_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 8.5 * POINTS_PER_INCH,
        page_height_pt: 11.0 * POINTS_PER_INCH,
        margin_left_pt: POINTS_PER_INCH,
        margin_right_pt: POINTS_PER_INCH,
        margin_top_pt: POINTS_PER_INCH,
        margin_bottom_pt: POINTS_PER_INCH,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a standard Type1 font.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
pub struct FontMetricTable {
    /// PostScript name written to the font dictionary.
    pub base_font: &'static str,
    widths: [f32; 95],
    /// Width used for encodable non-ASCII characters without a dedicated entry.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units, as it will be rendered.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{2018}' | '\u{2019}' => 0.333,
            '\u{201C}' | '\u{201D}' => 0.444,
            '\u{2013}' => 0.500,
            '\u{2014}' | '\u{2026}' => 1.000,
            '\u{2022}' => 0.350,
            '\u{00A0}' => self.space_width,
            _ if win_ansi_byte(c).is_some() => self.average_char_width,
            _ => self.widths[('?' as usize) - 32],
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in points at `font_size_pt`.
    pub fn measure_pt(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt
    }
}

/// Times-Roman (Adobe AFM advance widths / 1000).
pub static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    base_font: "Times-Roman",
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.480,
    space_width: 0.250,
};

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps a character to its single WinAnsi (Windows-1252) byte, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    if c.is_ascii() {
        return Some(c as u8);
    }
    let mut buf = [0u8; 4];
    let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    if unmappable || bytes.len() != 1 {
        None
    } else {
        Some(bytes[0])
    }
}

/// Encodes text for a `WinAnsiEncoding` string operand.
///
/// Control characters are dropped and unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
