use super::{DisplaySurface, GraphicsMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Pixel(i32, i32, GraphicsMode),
    Line(i32, i32, i32, i32, GraphicsMode),
    FilledBox(i32, i32, i32, i32, GraphicsMode),
}

/// Surface that records primitive calls instead of drawing.
pub struct RecordingSurface {
    pub width: u16,
    pub height: u16,
    pub calls: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Primitive::Pixel(..)))
            .count()
    }

    pub fn lines(&self) -> Vec<Primitive> {
        self.calls
            .iter()
            .copied()
            .filter(|call| matches!(call, Primitive::Line(..)))
            .collect()
    }
}

impl DisplaySurface for RecordingSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode) {
        self.calls.push(Primitive::Pixel(x, y, mode));
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        self.calls.push(Primitive::Line(x0, y0, x1, y1, mode));
    }

    fn draw_filled_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        self.calls.push(Primitive::FilledBox(x0, y0, x1, y1, mode));
    }
}
