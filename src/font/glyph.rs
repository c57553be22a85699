//! Glyph bitmap decoding
//!
//! Glyph data is column-major: for each vertical byte `i` there is a run of
//! `width` bytes, one per column, least significant bit on top. When a glyph
//! needs more than one vertical byte, the last one is shifted so its bit 0
//! lands on row `height - 8`, which packs odd heights without padding rows.

use bitvec::prelude::*;

use super::ProgramMemory;

/// Where one pixel row of a glyph column lives inside the packed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRow {
    /// Vertical byte index within the column.
    pub byte: u8,
    /// Bit within that byte.
    pub bit: u8,
    /// Pixel row inside the glyph.
    pub row: u8,
}

/// Enumerate the packed position of every row of a glyph column, exactly
/// `height` items, walking the vertical bytes from the last one down.
pub fn packed_rows(height: u8) -> impl Iterator<Item = PackedRow> {
    let height = height as usize;
    let bytes = (height + 7) / 8;
    (0..bytes).rev().flat_map(move |i| {
        let base = if i == bytes - 1 && bytes > 1 {
            height - 8
        } else {
            i * 8
        };
        (0..8usize).filter_map(move |bit| {
            let row = base + bit;
            if row >= i * 8 && row < height {
                Some(PackedRow {
                    byte: i as u8,
                    bit: bit as u8,
                    row: row as u8,
                })
            } else {
                None
            }
        })
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u8,
    height: u8,
    /// Column-major, `height` bits per column.
    pixels: BitVec,
}

impl GlyphBitmap {
    pub fn decode(memory: &dyn ProgramMemory, offset: usize, width: u8, height: u8) -> GlyphBitmap {
        let w = width as usize;
        let h = height as usize;
        let mut pixels = bitvec![0; w * h];

        for column in 0..w {
            for packed in packed_rows(height) {
                let data = memory.read_byte(offset + column + packed.byte as usize * w);
                if data & (1 << packed.bit) != 0 {
                    pixels.set(column * h + packed.row as usize, true);
                }
            }
        }

        GlyphBitmap {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn pixel(&self, column: u8, row: u8) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        self.pixels[column as usize * self.height as usize + row as usize]
    }

    /// Every pixel as `(column, row, lit)`, column by column.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, bool)> + '_ {
        let height = self.height;
        (0..self.width)
            .flat_map(move |column| (0..height).map(move |row| (column, row)))
            .map(move |(column, row)| (column, row, self.pixel(column, row)))
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.count_ones()
    }
}
