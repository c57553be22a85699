//! Text layout and glyph drawing
//!
//! `TextRenderer` is the rendering context: it remembers the selected font and
//! drives glyph lookup, rasterization and string layout against any
//! `DisplaySurface`.

pub mod source;

use log::warn;

use crate::{
    display::{DisplaySurface, GraphicsMode},
    font::{CodePage, Font, GlyphBitmap, GlyphLocation},
};

pub use source::{RegionText, TextBytes, TextSource};

/// Byte that switches the following byte to the extended code page.
pub const ESCAPE_BYTE: u8 = 255;

#[derive(Debug, Clone, Default)]
pub struct TextRenderer<'f> {
    font: Option<Font<'f>>,
}

impl<'f> TextRenderer<'f> {
    pub fn new() -> Self {
        Self { font: None }
    }

    pub fn with_font(font: Font<'f>) -> Self {
        Self { font: Some(font) }
    }

    /// Default font for every later call that doesn't pass one explicitly.
    pub fn select_font(&mut self, font: Font<'f>) {
        self.font = Some(font);
    }

    pub fn selected_font(&self) -> Option<&Font<'f>> {
        self.font.as_ref()
    }

    fn resolve_font<'a>(&'a self, font: Option<&'a Font<'a>>) -> Option<&'a Font<'a>> {
        let resolved = font.or_else(|| self.font.as_ref());
        if resolved.is_none() {
            warn!("No font selected");
        }
        resolved
    }

    /// Draw one character with its top left corner at `(x, y)`.
    ///
    /// Returns the advance width, 0 when the font has no glyph for `letter`,
    /// or -1 when the origin lies right of or below the surface.
    pub fn draw_char<D: DisplaySurface + ?Sized>(
        &self,
        surface: &mut D,
        x: i32,
        y: i32,
        letter: u8,
        mode: GraphicsMode,
        page: CodePage,
        font: Option<&Font>,
    ) -> i32 {
        let font = match self.resolve_font(font) {
            Some(font) => font,
            None => return 0,
        };
        if x >= surface.width() as i32 || y >= surface.height() as i32 {
            return -1;
        }
        let height = font.height() as i32;

        let (width, offset) = match font.locate(letter, page) {
            GlyphLocation::Space { width } => {
                let width = width as i32;
                surface.draw_filled_box(x, y, x + width, y + height, mode.inverse());
                return width;
            }
            GlyphLocation::Glyph { width, offset } => (width, offset),
            GlyphLocation::Missing => return 0,
        };

        if x < -(width as i32) || y < -height {
            return width as i32;
        }

        let glyph = font.glyph_bitmap(width, offset);
        rasterize(surface, x, y, &glyph, mode);
        width as i32
    }

    /// Lay out and draw a NUL terminated string starting at `(x, y)`.
    ///
    /// Each `'\n'` starts a new line `height + 1` pixels above the current
    /// one. A 255 byte draws the byte after it from the extended code page.
    pub fn draw_string<D, S>(
        &self,
        surface: &mut D,
        x: i32,
        y: i32,
        text: &S,
        mode: GraphicsMode,
        font: Option<&Font>,
    ) where
        D: DisplaySurface + ?Sized,
        S: TextSource + ?Sized,
    {
        let font = match self.resolve_font(font) {
            Some(font) => font,
            None => return,
        };
        if x >= surface.width() as i32 || y >= surface.height() as i32 {
            return;
        }
        let height = font.height() as i32;
        if y + height < 0 {
            return;
        }

        let inverted = mode.inverse();
        let mut y = y;
        let mut str_width = 0;
        if x > 0 {
            surface.draw_line(x - 1, y, x - 1, y + height - 1, inverted);
        }

        let mut idx = 0;
        loop {
            let c = text.byte_at(idx);
            if c == 0 {
                break;
            }
            if c == b'\n' {
                str_width = 0;
                y = y - height - 1;
            } else {
                let char_wide = if c == ESCAPE_BYTE {
                    idx += 1;
                    let c = text.byte_at(idx);
                    if c == 0 {
                        break;
                    }
                    self.draw_char(surface, x + str_width, y, c, mode, CodePage::Extended, Some(font))
                } else {
                    self.draw_char(surface, x + str_width, y, c, mode, CodePage::Base, Some(font))
                };

                if char_wide > 0 {
                    str_width += char_wide;
                    surface.draw_line(x + str_width, y, x + str_width, y + height - 1, inverted);
                    str_width += 1;
                } else if char_wide < 0 {
                    return;
                }
            }
            idx += 1;
        }
    }

    /// Advance width of a single base page character, 0 if absent.
    pub fn char_width(&self, letter: u8, font: Option<&Font>) -> u8 {
        self.resolve_font(font)
            .map_or(0, |font| font.char_width(letter))
    }

    /// Width of a single line of text including the one pixel gaps between
    /// glyphs. Newlines and escape bytes are measured like any other byte.
    pub fn string_width<S: TextSource + ?Sized>(&self, text: &S, font: Option<&Font>) -> u32 {
        let font = match self.resolve_font(font) {
            Some(font) => font,
            None => return 0,
        };
        let width: u32 = text
            .iter_bytes()
            .map(|c| font.char_width(c) as u32)
            .filter(|w| *w > 0)
            .map(|w| w + 1)
            .sum();
        width.saturating_sub(1)
    }
}

/// Emit one pixel per glyph position. Inverse mode swaps lit and unlit.
fn rasterize<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    x: i32,
    y: i32,
    glyph: &GlyphBitmap,
    mode: GraphicsMode,
) {
    let inverse = mode == GraphicsMode::Inverse;
    for (column, row, lit) in glyph.pixels() {
        let pixel_mode = if lit != inverse {
            GraphicsMode::On
        } else {
            GraphicsMode::Off
        };
        surface.set_pixel(x + column as i32, y + row as i32, pixel_mode);
    }
}
