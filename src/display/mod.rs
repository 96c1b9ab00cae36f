//! Panel content: colors, text lines and the full-screen update.
//!
//! A [`DisplayUpdate`] is always a complete description of the screen.
//! Sinks redraw from it without diffing against what they showed before.

pub mod arbiter;

use serde::{Deserialize, Serialize};

use crate::readings::Sample;

/// Longest line the panel can show at the configured font.
pub const MAX_LINE_CHARS: usize = 17;

/// Text rows on the panel.
pub const MAX_ROWS: usize = 16;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Named panel colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Sensor failure.
    Gray,
    DarkBlue,
    LightBlue,
    Green,
    Orange,
    DarkRed,
    White,
    Black,
}

impl Color {
    /// 24-bit `0xRRGGBB`.
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Gray => 0x80_80_80,
            Self::DarkBlue => 0x00_00_80,
            Self::LightBlue => 0x80_80_FF,
            Self::Green => 0x00_FF_00,
            Self::Orange => 0xFF_A5_00,
            Self::DarkRed => 0x80_00_00,
            Self::White => 0xFF_FF_FF,
            Self::Black => 0x00_00_00,
        }
    }

    /// Opaque `0xAARRGGBB` as written to the LTDC layer.
    pub const fn argb(self) -> u32 {
        0xFF00_0000 | self.rgb()
    }
}

/// Upper bounds (inclusive, °C) of each temperature band.
const BANDS: [(f32, Color); 4] = [
    (18.0, Color::DarkBlue),
    (22.0, Color::LightBlue),
    (25.0, Color::Green),
    (28.0, Color::Orange),
];

/// Background for a temperature.  Total: every input maps to a color.
pub fn background_for(temperature: Sample) -> Color {
    let Some(t) = temperature else {
        return Color::Gray;
    };
    if t.is_nan() {
        return Color::Gray;
    }
    BANDS
        .iter()
        .find(|(limit, _)| t <= *limit)
        .map_or(Color::DarkRed, |&(_, color)| color)
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// One row of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub row: u8,
    pub text: heapless::String<MAX_LINE_CHARS>,
    pub alignment: Alignment,
}

impl DisplayLine {
    /// Text longer than [`MAX_LINE_CHARS`] is cut at a char boundary.
    pub fn new(row: u8, text: &str, alignment: Alignment) -> Self {
        Self {
            row,
            text: bounded_text(text),
            alignment,
        }
    }
}

/// Copy as much of `text` as fits into `N` bytes without splitting a char.
pub(crate) fn bounded_text<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Everything needed to redraw the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub background: Color,
    pub text_color: Color,
    pub lines: heapless::Vec<DisplayLine, MAX_ROWS>,
}

impl Default for DisplayUpdate {
    /// Blank gray panel, shown until the first reading arrives.
    fn default() -> Self {
        Self {
            background: Color::Gray,
            text_color: Color::White,
            lines: heapless::Vec::new(),
        }
    }
}

impl DisplayUpdate {
    /// Line texts in row order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|l| l.text.as_str())
    }
}
