// src/color.rs

//! Defines the fixed 16-color palette (`PaletteColor`), the `Rgb` value type,
//! and the bijection between a palette entry and its single-character wire code.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of legal colors. The wire encoding is one hex digit per cell, so the
/// palette can never grow past 16 without a new grid-state format.
pub const PALETTE_SIZE: u8 = 16;

/// Errors produced by palette lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// An index outside `[0, 16)` was used to address the palette.
    #[error("palette index {0} out of range (must be 0-15)")]
    OutOfRangeIndex(u8),
    /// A character that is not a hex digit was used as a wire code.
    #[error("invalid palette code {0:?} (expected a hex digit)")]
    InvalidCode(char),
    /// An RGB value that is not one of the 16 legal colors.
    #[error("color {0} is not in the palette")]
    UnknownColor(Rgb),
}

/// A 24-bit RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// Formats as `#RRGGBB`, uppercase, matching the wire format used by the
    /// color toolbar and the server's color validation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// The 16 legal colors of the shared bitmap, in wire order.
///
/// Index stability is load-bearing: the grid-state encoding stores the
/// discriminant as a hex digit, so the sequence is fixed and never reordered
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PaletteColor {
    /// Index 0 is the server's cleared/initial cell value.
    #[default]
    White = 0,
    LightGrey = 1,
    Grey = 2,
    Black = 3,
    Pink = 4,
    Red = 5,
    Orange = 6,
    Brown = 7,
    Yellow = 8,
    LightGreen = 9,
    Green = 10,
    Cyan = 11,
    LightBlue = 12,
    Blue = 13,
    LightPurple = 14,
    Purple = 15,
}

/// All palette entries in index order.
pub const PALETTE: [PaletteColor; PALETTE_SIZE as usize] = [
    PaletteColor::White,
    PaletteColor::LightGrey,
    PaletteColor::Grey,
    PaletteColor::Black,
    PaletteColor::Pink,
    PaletteColor::Red,
    PaletteColor::Orange,
    PaletteColor::Brown,
    PaletteColor::Yellow,
    PaletteColor::LightGreen,
    PaletteColor::Green,
    PaletteColor::Cyan,
    PaletteColor::LightBlue,
    PaletteColor::Blue,
    PaletteColor::LightPurple,
    PaletteColor::Purple,
];

impl PaletteColor {
    /// Converts a wire index (0-15) to a palette entry.
    pub fn from_index(idx: u8) -> Result<Self, PaletteError> {
        PALETTE
            .get(idx as usize)
            .copied()
            .ok_or(PaletteError::OutOfRangeIndex(idx))
    }

    /// The wire index of this color.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The single-character wire code (lowercase hex digit), matching the
    /// nibble encoding the state endpoint serves.
    pub fn code(self) -> char {
        char::from_digit(self.index() as u32, 16).expect("palette index is always a hex digit")
    }

    /// Parses one wire-code character into a palette entry.
    pub fn from_code(code: char) -> Result<Self, PaletteError> {
        let digit = code.to_digit(16).ok_or(PaletteError::InvalidCode(code))? as u8;
        Self::from_index(digit)
    }

    /// The sRGB value rendered for this palette entry.
    pub fn rgb(self) -> Rgb {
        match self {
            PaletteColor::White => Rgb(0xFF, 0xFF, 0xFF),
            PaletteColor::LightGrey => Rgb(0xE4, 0xE4, 0xE4),
            PaletteColor::Grey => Rgb(0x88, 0x88, 0x88),
            PaletteColor::Black => Rgb(0x22, 0x22, 0x22),
            PaletteColor::Pink => Rgb(0xFF, 0xA7, 0xD1),
            PaletteColor::Red => Rgb(0xE5, 0x00, 0x00),
            PaletteColor::Orange => Rgb(0xE5, 0x95, 0x00),
            PaletteColor::Brown => Rgb(0xA0, 0x6A, 0x42),
            PaletteColor::Yellow => Rgb(0xE5, 0xD9, 0x00),
            PaletteColor::LightGreen => Rgb(0x94, 0xE0, 0x44),
            PaletteColor::Green => Rgb(0x02, 0xBE, 0x01),
            PaletteColor::Cyan => Rgb(0x00, 0xD3, 0xDD),
            PaletteColor::LightBlue => Rgb(0x00, 0x83, 0xC7),
            PaletteColor::Blue => Rgb(0x00, 0x00, 0xEA),
            PaletteColor::LightPurple => Rgb(0xCD, 0x6E, 0xEA),
            PaletteColor::Purple => Rgb(0x82, 0x00, 0x80),
        }
    }

    /// Finds the palette entry for an RGB value.
    pub fn from_rgb(rgb: Rgb) -> Result<Self, PaletteError> {
        PALETTE
            .iter()
            .copied()
            .find(|c| c.rgb() == rgb)
            .ok_or(PaletteError::UnknownColor(rgb))
    }

    /// Whether an RGB value is one of the 16 legal colors.
    pub fn is_valid(rgb: Rgb) -> bool {
        Self::from_rgb(rgb).is_ok()
    }
}
