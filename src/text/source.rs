use crate::font::ProgramMemory;

/// Indexed byte access over a NUL terminated character sequence. Positions
/// past the end of the backing store read as the terminator.
pub trait TextSource {
    fn byte_at(&self, index: usize) -> u8;

    /// Bytes up to (not including) the terminator.
    fn iter_bytes(&self) -> TextBytes<'_, Self> {
        TextBytes {
            source: self,
            index: 0,
        }
    }
}

pub struct TextBytes<'a, S: TextSource + ?Sized> {
    source: &'a S,
    index: usize,
}

impl<S: TextSource + ?Sized> Iterator for TextBytes<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        match self.source.byte_at(self.index) {
            0 => None,
            byte => {
                self.index += 1;
                Some(byte)
            }
        }
    }
}

impl TextSource for [u8] {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.get(index).copied().unwrap_or(0)
    }
}

impl TextSource for Vec<u8> {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.as_slice().byte_at(index)
    }
}

impl TextSource for str {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.as_bytes().byte_at(index)
    }
}

impl TextSource for String {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.as_bytes().byte_at(index)
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        (**self).byte_at(index)
    }
}

/// A string stored in read-only program memory, read one byte at a time.
#[derive(Clone, Copy)]
pub struct RegionText<'a> {
    memory: &'a dyn ProgramMemory,
    start: usize,
}

impl<'a> RegionText<'a> {
    pub fn new(memory: &'a dyn ProgramMemory, start: usize) -> RegionText<'a> {
        RegionText { memory, start }
    }
}

impl TextSource for RegionText<'_> {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.memory.read_byte(self.start + index)
    }
}
