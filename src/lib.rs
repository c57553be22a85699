//! Bitmap font text rendering for dot-matrix LED panels.
//!
//! Fonts are read from a packed byte image (6 byte header, optional width
//! table, column-major glyph bitmaps) through [`font::ProgramMemory`], drawn
//! onto any [`display::DisplaySurface`] by [`text::TextRenderer`], and UTF-8
//! input is mapped to the fonts' extended codes by [`encoding`].
pub mod display;
pub mod encoding;
pub mod font;
pub mod js_api;
pub mod text;
mod utils;

use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

pub use display::{DisplaySurface, DmdFrame, GraphicsMode};
pub use encoding::{encode_legacy_str, encode_legacy_text, EncodedText};
pub use font::{CodePage, Font, FontHeader, GlyphLocation, ProgramMemory};
pub use text::{RegionText, TextRenderer, TextSource, ESCAPE_BYTE};

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logging();
}
