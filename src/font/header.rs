//! Font header parser
//!
//! Fonts start with a fixed 6 byte record (GLCD creator layout):
//! size(2, big endian) + fixedWidth(1) + height(1) + firstChar(1) + charCount(1)

use binary_reader::{BinaryReader, Endian};

pub const HEADER_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    /// Total encoded glyph table size. Zero flags a fixed width font
    /// (no per-glyph width table follows the header).
    pub size: u16,
    pub fixed_width: u8,
    pub height: u8,
    pub first_char: u8,
    pub char_count: u8,
}

impl FontHeader {
    pub fn read(reader: &mut BinaryReader) -> Result<FontHeader, String> {
        reader.set_endian(Endian::Big);

        let size = reader
            .read_u16()
            .map_err(|e| format!("Failed to read font size: {:?}", e))?;
        let fixed_width = reader
            .read_u8()
            .map_err(|e| format!("Failed to read fixed width: {:?}", e))?;
        let height = reader
            .read_u8()
            .map_err(|e| format!("Failed to read font height: {:?}", e))?;
        let first_char = reader
            .read_u8()
            .map_err(|e| format!("Failed to read first char: {:?}", e))?;
        let char_count = reader
            .read_u8()
            .map_err(|e| format!("Failed to read char count: {:?}", e))?;

        Ok(FontHeader {
            size,
            fixed_width,
            height,
            first_char,
            char_count,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<FontHeader, String> {
        if data.len() < HEADER_SIZE {
            return Err(format!(
                "Font data too small for header ({} bytes, need >= {})",
                data.len(),
                HEADER_SIZE
            ));
        }
        let mut reader = BinaryReader::from_u8(&data[..HEADER_SIZE]);
        Self::read(&mut reader)
    }

    #[inline]
    pub fn is_fixed_width(&self) -> bool {
        self.size == 0
    }

    /// Number of vertical bytes per glyph column.
    #[inline]
    pub fn bytes_per_column(&self) -> usize {
        (self.height as usize + 7) / 8
    }

    /// One past the last code covered by the font. Can exceed 255 for fonts
    /// that extend into the second code page.
    #[inline]
    pub fn end_char(&self) -> u16 {
        self.first_char as u16 + self.char_count as u16
    }

    #[inline]
    pub fn contains(&self, code: u16) -> bool {
        code >= self.first_char as u16 && code < self.end_char()
    }
}
