use num_traits::FromPrimitive;
use wasm_bindgen::{prelude::*, Clamped};
use web_sys::CanvasRenderingContext2d;

use crate::{
    display::{DisplaySurface, DmdFrame, GraphicsMode},
    encoding::encode_legacy_str,
    font::Font,
    text::TextRenderer,
};

const LIT_COLOR: (u8, u8, u8) = (0xFF, 0x8C, 0x00);
const UNLIT_COLOR: (u8, u8, u8) = (0x20, 0x10, 0x00);

/// Browser preview of a panel grid.
#[wasm_bindgen]
pub struct DmdDisplay {
    frame: DmdFrame,
    font_data: Option<Vec<u8>>,
}

#[wasm_bindgen]
impl DmdDisplay {
    #[wasm_bindgen(constructor)]
    pub fn new(panels_wide: u8, panels_high: u8) -> DmdDisplay {
        DmdDisplay {
            frame: DmdFrame::for_panels(panels_wide, panels_high),
            font_data: None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u16 {
        self.frame.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u16 {
        self.frame.height()
    }

    pub fn select_font(&mut self, data: Vec<u8>) -> Result<(), JsValue> {
        Font::from_bytes(&data).map_err(|err| JsValue::from_str(&err))?;
        self.font_data = Some(data);
        Ok(())
    }

    /// Translates `text` to display codes and draws it. Unknown modes draw
    /// as `On`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, mode: u8) {
        let mode = GraphicsMode::from_u8(mode).unwrap_or(GraphicsMode::On);
        let encoded = encode_legacy_str(text);
        let renderer = font_renderer(self.font_data.as_deref());
        renderer.draw_string(&mut self.frame, x, y, &encoded, mode, None);
    }

    pub fn text_width(&self, text: &str) -> u32 {
        let encoded = encode_legacy_str(text);
        font_renderer(self.font_data.as_deref()).string_width(&encoded, None)
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    pub fn rgba(&self) -> Vec<u8> {
        self.frame.to_rgba(LIT_COLOR, UNLIT_COLOR)
    }

    pub fn ascii(&self) -> String {
        self.frame.to_ascii()
    }

    /// Paint the frame at the top left of `ctx`, each LED `scale` pixels square.
    pub fn render(&self, ctx: &CanvasRenderingContext2d, scale: u32) -> Result<(), JsValue> {
        let scale = scale.max(1) as usize;
        let width = self.frame.width() as usize;
        let height = self.frame.height() as usize;
        let src = self.rgba();

        let mut data = Vec::with_capacity(src.len() * scale * scale);
        for row in src.chunks(width * 4) {
            let mut scaled_row = Vec::with_capacity(row.len() * scale);
            for px in row.chunks(4) {
                for _ in 0..scale {
                    scaled_row.extend_from_slice(px);
                }
            }
            for _ in 0..scale {
                data.extend_from_slice(&scaled_row);
            }
        }

        let image_data = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(data.as_slice()),
            (width * scale) as u32,
            (height * scale) as u32,
        )?;
        ctx.put_image_data(&image_data, 0.0, 0.0)
    }
}

impl DmdDisplay {
    pub fn frame(&self) -> &DmdFrame {
        &self.frame
    }
}

fn font_renderer(font_data: Option<&[u8]>) -> TextRenderer<'_> {
    match font_data.map(Font::from_bytes) {
        Some(Ok(font)) => TextRenderer::with_font(font),
        _ => TextRenderer::new(),
    }
}
