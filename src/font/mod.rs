//! Bitmap font access
//!
//! Fonts live in read-only memory owned by the caller. A `Font` borrows that
//! memory together with its parsed header; glyph widths and bitmap data are
//! read lazily through `ProgramMemory`.

pub mod glyph;
pub mod header;

use std::fmt;

use log::debug;

pub use glyph::{packed_rows, GlyphBitmap, PackedRow};
pub use header::{FontHeader, HEADER_SIZE};

/// Byte addressable read-only memory (flash, ROM, or a plain slice).
pub trait ProgramMemory {
    fn read_byte(&self, addr: usize) -> u8;
}

/// Reads past the end of a slice yield 0.
impl ProgramMemory for [u8] {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self.get(addr).copied().unwrap_or(0)
    }
}

impl ProgramMemory for Vec<u8> {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self.as_slice().read_byte(addr)
    }
}

impl<const N: usize> ProgramMemory for [u8; N] {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self[..].read_byte(addr)
    }
}

/// Which bank of 255 codes a letter addresses. The extended page is reached
/// through the 255 escape byte and covers codes 256..=510.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePage {
    Base,
    Extended,
}

impl CodePage {
    pub const EXTENDED_OFFSET: u16 = 255;

    #[inline]
    pub fn code(self, letter: u8) -> u16 {
        match self {
            CodePage::Base => letter as u16,
            CodePage::Extended => letter as u16 + Self::EXTENDED_OFFSET,
        }
    }
}

impl From<bool> for CodePage {
    fn from(over_byte: bool) -> Self {
        if over_byte {
            CodePage::Extended
        } else {
            CodePage::Base
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLocation {
    /// The space character is never looked up; it is drawn as a filled box
    /// `width` pixels wide.
    Space { width: u8 },
    Glyph { width: u8, offset: usize },
    Missing,
}

impl GlyphLocation {
    pub fn width(&self) -> u8 {
        match self {
            GlyphLocation::Space { width } | GlyphLocation::Glyph { width, .. } => *width,
            GlyphLocation::Missing => 0,
        }
    }
}

#[derive(Clone, Copy)]
enum FontMemory<'a> {
    Slice(&'a [u8]),
    Program(&'a dyn ProgramMemory),
}

impl ProgramMemory for FontMemory<'_> {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        match self {
            FontMemory::Slice(data) => data.read_byte(addr),
            FontMemory::Program(memory) => memory.read_byte(addr),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Font<'a> {
    memory: FontMemory<'a>,
    header: FontHeader,
}

impl<'a> Font<'a> {
    pub fn new(memory: &'a dyn ProgramMemory) -> Result<Font<'a>, String> {
        Self::with_memory(FontMemory::Program(memory))
    }

    pub fn from_bytes(data: &'a [u8]) -> Result<Font<'a>, String> {
        if data.len() < HEADER_SIZE {
            return Err(format!(
                "Font data too small for header ({} bytes, need >= {})",
                data.len(),
                HEADER_SIZE
            ));
        }
        Self::with_memory(FontMemory::Slice(data))
    }

    fn with_memory(memory: FontMemory<'a>) -> Result<Font<'a>, String> {
        let mut raw = [0u8; HEADER_SIZE];
        for (addr, byte) in raw.iter_mut().enumerate() {
            *byte = memory.read_byte(addr);
        }
        let header = FontHeader::from_bytes(&raw)?;
        debug!(
            "Font header: height={} first=0x{:02X} count={} fixed={} size={}",
            header.height,
            header.first_char,
            header.char_count,
            header.fixed_width,
            header.size
        );
        Ok(Font { memory, header })
    }

    #[inline]
    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.header.height
    }

    /// Resolve a letter to its advance width and bitmap offset.
    pub fn locate(&self, letter: u8, page: CodePage) -> GlyphLocation {
        let header = &self.header;
        if letter == b' ' {
            return GlyphLocation::Space {
                width: header.fixed_width,
            };
        }

        let code = page.code(letter);
        if !header.contains(code) {
            return GlyphLocation::Missing;
        }
        let index = (code - header.first_char as u16) as usize;
        let bytes = header.bytes_per_column();

        if header.is_fixed_width() {
            let width = header.fixed_width;
            GlyphLocation::Glyph {
                width,
                offset: HEADER_SIZE + index * bytes * width as usize,
            }
        } else {
            let preceding: usize = (0..index)
                .map(|i| self.memory.read_byte(HEADER_SIZE + i) as usize)
                .sum();
            GlyphLocation::Glyph {
                width: self.memory.read_byte(HEADER_SIZE + index),
                offset: preceding * bytes + header.char_count as usize + HEADER_SIZE,
            }
        }
    }

    /// Advance width of a base page letter, 0 when the font lacks it.
    pub fn char_width(&self, letter: u8) -> u8 {
        self.locate(letter, CodePage::Base).width()
    }

    /// Decode the bitmap of a located glyph.
    pub fn glyph_bitmap(&self, width: u8, offset: usize) -> GlyphBitmap {
        GlyphBitmap::decode(&self.memory, offset, width, self.header.height)
    }
}

impl fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").field("header", &self.header).finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_fonts::*;
    use super::*;

    #[test]
    fn test_fixed_width_offsets() {
        let data = fixed_3x8();
        let font = Font::from_bytes(&data).unwrap();
        assert_eq!(
            font.locate(b'0', CodePage::Base),
            GlyphLocation::Glyph { width: 3, offset: 6 }
        );
        assert_eq!(
            font.locate(b'2', CodePage::Base),
            GlyphLocation::Glyph { width: 3, offset: 12 }
        );
    }

    #[test]
    fn test_fixed_width_char_width_everywhere() {
        let data = fixed_3x8();
        let font = Font::from_bytes(&data).unwrap();
        for c in b'0'..=b'2' {
            assert_eq!(font.char_width(c), 3);
        }
        assert_eq!(font.char_width(b' '), 3);
    }

    #[test]
    fn test_variable_width_table_round_trip() {
        let data = variable_12();
        let font = Font::from_bytes(&data).unwrap();
        let widths: Vec<u8> = (b'A'..=b'C').map(|c| font.char_width(c)).collect();
        assert_eq!(widths, vec![2, 1, 3]);
        let total: u32 = widths.iter().map(|w| *w as u32).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_variable_width_offsets() {
        let data = variable_12();
        let font = Font::from_bytes(&data).unwrap();
        // header + width table
        assert_eq!(
            font.locate(b'A', CodePage::Base),
            GlyphLocation::Glyph { width: 2, offset: 9 }
        );
        // two columns of two vertical bytes precede 'B'
        assert_eq!(
            font.locate(b'B', CodePage::Base),
            GlyphLocation::Glyph { width: 1, offset: 13 }
        );
        assert_eq!(
            font.locate(b'C', CodePage::Base),
            GlyphLocation::Glyph { width: 3, offset: 15 }
        );
    }

    #[test]
    fn test_out_of_range_is_missing() {
        let data = fixed_3x8();
        let font = Font::from_bytes(&data).unwrap();
        assert_eq!(font.locate(b'/', CodePage::Base), GlyphLocation::Missing);
        assert_eq!(font.locate(b'3', CodePage::Base), GlyphLocation::Missing);
        assert_eq!(font.char_width(b'A'), 0);
    }

    #[test]
    fn test_space_ignores_font_range() {
        let data = variable_12();
        let font = Font::from_bytes(&data).unwrap();
        assert_eq!(
            font.locate(b' ', CodePage::Extended),
            GlyphLocation::Space { width: 4 }
        );
    }

    #[test]
    fn test_extended_page_lookup() {
        // fixed 1x8 font covering codes 250..=259
        let mut data = vec![0x00, 0x00, 1, 8, 250, 10];
        data.extend((0..10u8).map(|i| i + 1));
        let font = Font::from_bytes(&data).unwrap();
        // escape + 1 addresses code 256, index 6
        assert_eq!(
            font.locate(1, CodePage::Extended),
            GlyphLocation::Glyph { width: 1, offset: 12 }
        );
        assert_eq!(font.locate(1, CodePage::Base), GlyphLocation::Missing);
        assert_eq!(font.locate(5, CodePage::Extended), GlyphLocation::Missing);
    }

    #[test]
    fn test_program_memory_font_matches_slice() {
        struct Flash(Vec<u8>);
        impl ProgramMemory for Flash {
            fn read_byte(&self, addr: usize) -> u8 {
                self.0.get(addr).copied().unwrap_or(0xFF)
            }
        }

        let flash = Flash(variable_12());
        let font = Font::new(&flash).unwrap();
        let data = variable_12();
        let slice_font = Font::from_bytes(&data).unwrap();
        assert_eq!(font.header(), slice_font.header());
        assert_eq!(
            font.glyph_bitmap(3, 15),
            slice_font.glyph_bitmap(3, 15)
        );
    }

    #[test]
    fn test_short_font_data_rejected() {
        assert!(Font::from_bytes(&[0, 0, 5]).is_err());
    }
}
