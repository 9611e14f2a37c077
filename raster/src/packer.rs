//! Row-aligned pixel packer for reduced colour depths.

use crate::error::{RasterError, RasterResult};
use crate::palette::ColorDepth;

/// Packs pixels MSB-first into rows that start on a byte boundary.
///
/// At 16 colours the first pixel of a pair lands in the high nibble; at 2
/// colours the first pixel of eight lands in the most significant bit. The
/// unused tail of the last byte of every row is zero.
#[derive(Debug)]
pub struct RowPacker {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being written (not yet pushed to bytes).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
    depth: ColorDepth,
    width: usize,
    /// Pixels written to the current row.
    column: usize,
    rows: usize,
}

impl RowPacker {
    /// Creates a packer for rows of `width` pixels.
    #[must_use]
    pub const fn new(depth: ColorDepth, width: usize) -> Self {
        Self {
            bytes: Vec::new(),
            current_byte: 0,
            bit_count: 0,
            depth,
            width,
            column: 0,
            rows: 0,
        }
    }

    /// Creates a packer with room for `height` rows pre-allocated.
    #[must_use]
    pub fn with_rows(depth: ColorDepth, width: usize, height: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(depth.row_bytes(width) * height),
            ..Self::new(depth, width)
        }
    }

    /// Returns the number of completed rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of bits written so far, padding included.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Appends one pixel already expressed at the packer's depth.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::ValueOutOfRange`] if `value` doesn't fit the
    /// depth's bits per pixel, and [`RasterError::RowOverflow`] for a packer
    /// whose width is zero.
    pub fn push(&mut self, value: u8) -> RasterResult<()> {
        let bits = self.depth.bits_per_pixel();
        if bits < 8 && value >= (1u8 << bits) {
            return Err(RasterError::ValueOutOfRange { value, bits });
        }
        if self.width == 0 {
            return Err(RasterError::RowOverflow { width: 0 });
        }

        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        self.column += 1;
        if self.column == self.width {
            self.end_row();
        }
        Ok(())
    }

    fn write_bit(&mut self, value: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    fn end_row(&mut self) {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
        self.column = 0;
        self.rows += 1;
    }

    /// Finishes packing and returns the byte buffer.
    ///
    /// A partially written row is padded like a complete one.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.column > 0 {
            self.end_row();
        }
        self.bytes
    }
}

/// Quantizes 256-palette `pixels` to `depth` and packs them row by row.
///
/// # Errors
///
/// Returns [`RasterError::SizeMismatch`] if `pixels.len() != width * height`.
pub fn pack_image(
    pixels: &[u8],
    width: usize,
    height: usize,
    depth: ColorDepth,
) -> RasterResult<Vec<u8>> {
    let expected = width * height;
    if pixels.len() != expected {
        return Err(RasterError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    if depth == ColorDepth::Full {
        return Ok(pixels.to_vec());
    }

    let mut packer = RowPacker::with_rows(depth, width, height);
    for &pixel in pixels {
        packer.push(depth.reduce(pixel))?;
    }
    Ok(packer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_packer() {
        let packer = RowPacker::new(ColorDepth::Mono, 8);
        assert_eq!(packer.bits_written(), 0);
        assert!(packer.finish().is_empty());
    }

    #[test]
    fn sixteen_colours_high_nibble_first() {
        let mut packer = RowPacker::new(ColorDepth::Sixteen, 4);
        for value in [0x1, 0x2, 0x3, 0x4] {
            packer.push(value).unwrap();
        }
        assert_eq!(packer.rows(), 1);
        assert_eq!(packer.finish(), vec![0x12, 0x34]);
    }

    #[test]
    fn sixteen_colours_odd_width_pads_each_row() {
        let mut packer = RowPacker::new(ColorDepth::Sixteen, 3);
        for value in [0xA, 0xB, 0xC, 0x1, 0x2, 0x3] {
            packer.push(value).unwrap();
        }
        assert_eq!(packer.finish(), vec![0xAB, 0xC0, 0x12, 0x30]);
    }

    #[test]
    fn mono_msb_first() {
        let mut packer = RowPacker::new(ColorDepth::Mono, 8);
        for value in [1, 0, 1, 0, 1, 0, 1, 0] {
            packer.push(value).unwrap();
        }
        assert_eq!(packer.finish(), vec![0b1010_1010]);
    }

    #[test]
    fn mono_row_padding() {
        // 10 pixels per row -> 2 bytes per row, 6 zero bits of padding
        let mut packer = RowPacker::new(ColorDepth::Mono, 10);
        for _ in 0..20 {
            packer.push(1).unwrap();
        }
        assert_eq!(
            packer.finish(),
            vec![0xFF, 0b1100_0000, 0xFF, 0b1100_0000]
        );
    }

    #[test]
    fn partial_row_is_padded_on_finish() {
        let mut packer = RowPacker::new(ColorDepth::Mono, 8);
        packer.push(1).unwrap();
        assert_eq!(packer.bits_written(), 1);
        assert_eq!(packer.finish(), vec![0b1000_0000]);
    }

    #[test]
    fn value_out_of_range() {
        let mut packer = RowPacker::new(ColorDepth::Sixteen, 2);
        assert_eq!(
            packer.push(16),
            Err(RasterError::ValueOutOfRange { value: 16, bits: 4 })
        );
        let mut packer = RowPacker::new(ColorDepth::Mono, 2);
        assert_eq!(
            packer.push(2),
            Err(RasterError::ValueOutOfRange { value: 2, bits: 1 })
        );
    }

    #[test]
    fn zero_width_rejects_pixels() {
        let mut packer = RowPacker::new(ColorDepth::Full, 0);
        assert_eq!(packer.push(0), Err(RasterError::RowOverflow { width: 0 }));
    }

    #[test]
    fn pack_image_full_depth_is_copy() {
        let pixels = [3, 200, 17, 255];
        assert_eq!(
            pack_image(&pixels, 2, 2, ColorDepth::Full).unwrap(),
            pixels.to_vec()
        );
    }

    #[test]
    fn pack_image_quantizes_before_packing() {
        // 231 (cube white) -> 1, 0 (black) -> 0
        let pixels = [231, 0, 0, 231];
        assert_eq!(
            pack_image(&pixels, 4, 1, ColorDepth::Sixteen).unwrap(),
            vec![0x10, 0x01]
        );
        assert_eq!(
            pack_image(&pixels, 4, 1, ColorDepth::Mono).unwrap(),
            vec![0b1001_0000]
        );
    }

    #[test]
    fn pack_image_size_mismatch() {
        let err = pack_image(&[0; 5], 2, 2, ColorDepth::Mono).unwrap_err();
        assert_eq!(
            err,
            RasterError::SizeMismatch {
                expected: 4,
                actual: 5
            }
        );
    }
}
