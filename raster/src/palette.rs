//! VT colour depths and nearest-colour reduction.
//!
//! Colour indices always refer to the standard 256-entry ISO 11783-6 palette:
//! 16 named colours, a 6x6x6 colour cube (indices 16..=231) and 24
//! proprietary entries. Reduction to a smaller depth is a pure table lookup.

/// Number of colours a VT can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorDepth {
    /// Monochrome (1 bit per pixel).
    Mono,
    /// 16 colours (4 bits per pixel).
    Sixteen,
    /// Full 256-colour palette (8 bits per pixel).
    #[default]
    Full,
}

impl ColorDepth {
    /// Maps a colour count to a depth, `None` for anything but 2, 16 or 256.
    #[must_use]
    pub const fn from_colors(colors: u32) -> Option<Self> {
        match colors {
            2 => Some(Self::Mono),
            16 => Some(Self::Sixteen),
            256 => Some(Self::Full),
            _ => None,
        }
    }

    /// Returns the number of colours.
    #[must_use]
    pub const fn colors(self) -> u32 {
        match self {
            Self::Mono => 2,
            Self::Sixteen => 16,
            Self::Full => 256,
        }
    }

    /// Returns the bits used by one packed pixel.
    #[must_use]
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Sixteen => 4,
            Self::Full => 8,
        }
    }

    /// Picture graphic `format` attribute for this depth.
    #[must_use]
    pub const fn picture_format(self) -> u8 {
        match self {
            Self::Mono => 0,
            Self::Sixteen => 1,
            Self::Full => 2,
        }
    }

    /// Bytes needed for one packed row of `width` pixels.
    #[must_use]
    pub const fn row_bytes(self, width: usize) -> usize {
        (width * self.bits_per_pixel()).div_ceil(8)
    }

    /// Reduces a 256-palette index to the nearest index at this depth.
    #[must_use]
    pub const fn reduce(self, index: u8) -> u8 {
        match self {
            Self::Full => index,
            Self::Sixteen => COLORS_256_TO_16[index as usize],
            Self::Mono => COLORS_256_TO_2[index as usize],
        }
    }
}

/// Reduces `index` to the nearest colour available at `depth`.
#[must_use]
pub const fn reduce_color(index: u8, depth: ColorDepth) -> u8 {
    depth.reduce(index)
}

// Entries 232..=255 are proprietary in ISO 11783-6 and map to black.
const COLORS_256_TO_16: [u8; 256] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, //
    0, 0, 15, 15, 9, 9, 0, 0, 15, 15, 9, 9, 2, 2, 3, 3, //
    3, 9, 2, 2, 3, 3, 3, 3, 2, 2, 3, 3, 3, 11, 10, 10, //
    10, 3, 11, 11, 0, 0, 15, 15, 9, 9, 0, 0, 15, 15, 9, 9, //
    2, 2, 3, 3, 3, 9, 2, 2, 3, 3, 3, 3, 2, 2, 3, 3, //
    3, 11, 10, 10, 10, 3, 11, 11, 4, 4, 5, 5, 5, 9, 4, 4, //
    5, 5, 5, 9, 6, 6, 8, 8, 8, 8, 6, 6, 8, 8, 8, 8, //
    6, 6, 8, 8, 7, 7, 10, 10, 8, 8, 7, 11, 4, 4, 5, 5, //
    5, 5, 4, 4, 5, 5, 5, 5, 6, 6, 8, 8, 8, 8, 6, 6, //
    8, 8, 8, 8, 6, 6, 8, 8, 7, 7, 6, 6, 8, 8, 7, 1, //
    4, 4, 5, 5, 5, 13, 4, 4, 5, 5, 5, 13, 6, 6, 8, 8, //
    7, 7, 6, 6, 8, 8, 7, 7, 6, 6, 7, 7, 7, 7, 14, 14, //
    7, 7, 7, 1, 12, 12, 12, 5, 13, 13, 12, 12, 12, 5, 13, 13, //
    12, 12, 8, 8, 7, 13, 6, 6, 8, 8, 7, 1, 14, 14, 7, 7, //
    7, 1, 14, 14, 14, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
];

const COLORS_256_TO_2: [u8; 256] = [
    0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, //
    0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, //
    1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 1, //
    0, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, //
    0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, //
    1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 1, 1, //
    1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1, //
    0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_colors_accepts_supported_depths() {
        assert_eq!(ColorDepth::from_colors(2), Some(ColorDepth::Mono));
        assert_eq!(ColorDepth::from_colors(16), Some(ColorDepth::Sixteen));
        assert_eq!(ColorDepth::from_colors(256), Some(ColorDepth::Full));
    }

    #[test]
    fn from_colors_rejects_other_counts() {
        for colors in [0, 1, 4, 8, 15, 17, 255, 257, 65536] {
            assert_eq!(ColorDepth::from_colors(colors), None, "{colors}");
        }
    }

    #[test]
    fn default_is_full_palette() {
        assert_eq!(ColorDepth::default(), ColorDepth::Full);
    }

    #[test]
    fn full_depth_is_identity() {
        for index in 0..=255u8 {
            assert_eq!(reduce_color(index, ColorDepth::Full), index);
        }
    }

    #[test]
    fn sixteen_keeps_named_colours() {
        for index in 0..16u8 {
            assert_eq!(reduce_color(index, ColorDepth::Sixteen), index);
        }
    }

    #[test]
    fn reduced_values_stay_in_range() {
        for index in 0..=255u8 {
            assert!(reduce_color(index, ColorDepth::Sixteen) < 16);
            assert!(reduce_color(index, ColorDepth::Mono) < 2);
        }
    }

    #[test]
    fn mono_maps_black_and_white() {
        assert_eq!(reduce_color(0, ColorDepth::Mono), 0);
        assert_eq!(reduce_color(1, ColorDepth::Mono), 1);
        // silver and yellow are light, navy is dark
        assert_eq!(reduce_color(7, ColorDepth::Mono), 1);
        assert_eq!(reduce_color(14, ColorDepth::Mono), 1);
        assert_eq!(reduce_color(15, ColorDepth::Mono), 0);
    }

    #[test]
    fn cube_white_maps_to_white() {
        // 231 is #FFFFFF in the colour cube
        assert_eq!(reduce_color(231, ColorDepth::Sixteen), 1);
        assert_eq!(reduce_color(231, ColorDepth::Mono), 1);
    }

    #[test]
    fn proprietary_entries_map_to_black() {
        for index in 232..=255u8 {
            assert_eq!(reduce_color(index, ColorDepth::Sixteen), 0);
            assert_eq!(reduce_color(index, ColorDepth::Mono), 0);
        }
    }

    #[test]
    fn row_bytes_rounds_up() {
        assert_eq!(ColorDepth::Full.row_bytes(5), 5);
        assert_eq!(ColorDepth::Sixteen.row_bytes(4), 2);
        assert_eq!(ColorDepth::Sixteen.row_bytes(5), 3);
        assert_eq!(ColorDepth::Mono.row_bytes(8), 1);
        assert_eq!(ColorDepth::Mono.row_bytes(9), 2);
        assert_eq!(ColorDepth::Mono.row_bytes(0), 0);
    }

    #[test]
    fn picture_format_codes() {
        assert_eq!(ColorDepth::Mono.picture_format(), 0);
        assert_eq!(ColorDepth::Sixteen.picture_format(), 1);
        assert_eq!(ColorDepth::Full.picture_format(), 2);
    }
}
