use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Color tag of a piece and of the cells it leaves behind.
///
/// Colors are drawn independently of the shape, so any shape may appear in any color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Magenta = 4,
    Cyan = 5,
    Gray = 6,
}

impl Distribution<Color> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::ALL[rng.random_range(0..Color::LEN)]
    }
}

impl Color {
    /// Number of colors (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Magenta,
        Self::Cyan,
        Self::Gray,
    ];

    /// Returns the 16-bit RGB565 value of this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::Color;
    ///
    /// assert_eq!(Color::Red.rgb565(), 0xF800);
    /// assert_eq!(Color::Gray.rgb565(), 0x7BEF);
    /// ```
    #[must_use]
    pub const fn rgb565(self) -> u16 {
        match self {
            Self::Red => 0xF800,
            Self::Green => 0x07E0,
            Self::Blue => 0x001F,
            Self::Yellow => 0xFFE0,
            Self::Magenta => 0xF81F,
            Self::Cyan => 0x07FF,
            Self::Gray => 0x7BEF,
        }
    }

    /// Expands the RGB565 value to 8 bits per channel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn rgb888(self) -> (u8, u8, u8) {
        let value = self.rgb565() as u32;
        let r = (value >> 11) & 0x1F;
        let g = (value >> 5) & 0x3F;
        let b = value & 0x1F;
        (
            ((r * 255 + 15) / 31) as u8,
            ((g * 255 + 31) / 63) as u8,
            ((b * 255 + 15) / 31) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_colors_are_distinct() {
        let values: HashSet<u16> = Color::ALL.iter().map(|c| c.rgb565()).collect();
        assert_eq!(values.len(), Color::LEN);
    }

    #[test]
    fn test_rgb888_extremes() {
        assert_eq!(Color::Red.rgb888(), (255, 0, 0));
        assert_eq!(Color::Green.rgb888(), (0, 255, 0));
        assert_eq!(Color::Blue.rgb888(), (0, 0, 255));
        assert_eq!(Color::Cyan.rgb888(), (0, 255, 255));
    }

    #[test]
    fn test_color_serialization() {
        let serialized = serde_json::to_string(&Color::Magenta).unwrap();
        assert_eq!(serialized, "\"Magenta\"");
        let deserialized: Color = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Color::Magenta);
    }
}
