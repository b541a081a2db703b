//! 24-bit comment colors

use core::fmt;

/// A 24-bit RGB color stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb(u32);

impl Rgb {
    /// Pure white, the default comment color
    pub const WHITE: Self = Self(0x00FF_FFFF);
    /// Pure black
    pub const BLACK: Self = Self(0x0000_0000);

    /// Create a color from `0xRRGGBB`; bits above the low 24 are discarded
    #[must_use]
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Create a color from individual channels
    #[must_use]
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Packed `0xRRGGBB` value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Red channel
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#RRGGBB`
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Rgb {
    fn from(rgb: u32) -> Self {
        Self::new(rgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
