//! Pixel surface abstraction
//!
//! The text engine only ever talks to a `DisplaySurface`. `DmdFrame` is the
//! in-memory implementation used by the browser preview and by tests.

pub mod frame;

#[cfg(test)]
pub(crate) mod recorder;

use num_derive::FromPrimitive;

pub use frame::DmdFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum GraphicsMode {
    Off = 0,
    On = 1,
    Inverse = 2,
    Or = 3,
    Nor = 4,
    Xor = 5,
    Noxor = 6,
}

impl GraphicsMode {
    /// Mode used for backgrounds (space boxes, separators) behind text drawn
    /// in `self`. Inverse maps to itself.
    pub fn inverse(self) -> GraphicsMode {
        match self {
            GraphicsMode::On => GraphicsMode::Off,
            GraphicsMode::Off => GraphicsMode::On,
            GraphicsMode::Or => GraphicsMode::Nor,
            GraphicsMode::Nor => GraphicsMode::Or,
            GraphicsMode::Xor => GraphicsMode::Noxor,
            GraphicsMode::Noxor => GraphicsMode::Xor,
            GraphicsMode::Inverse => GraphicsMode::Inverse,
        }
    }

    /// New state of a pixel currently at `current` after a lit source pixel is
    /// applied with this mode.
    pub fn apply(self, current: bool) -> bool {
        match self {
            GraphicsMode::On | GraphicsMode::Or => true,
            GraphicsMode::Off | GraphicsMode::Nor => false,
            GraphicsMode::Inverse | GraphicsMode::Xor => !current,
            GraphicsMode::Noxor => current,
        }
    }
}

impl Default for GraphicsMode {
    fn default() -> Self {
        GraphicsMode::On
    }
}

/// Monochrome drawing target. Coordinates are signed and may fall outside
/// the surface; implementations ignore such pixels.
pub trait DisplaySurface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn set_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode);

    /// Bresenham's line algorithm, both end points included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        let mut x = x0;
        let mut y = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, mode);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill the box spanned by two corners, both included.
    fn draw_filled_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                self.set_pixel(x, y, mode);
            }
        }
    }
}

impl<D: DisplaySurface + ?Sized> DisplaySurface for &mut D {
    fn width(&self) -> u16 {
        (**self).width()
    }

    fn height(&self) -> u16 {
        (**self).height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode) {
        (**self).set_pixel(x, y, mode)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        (**self).draw_line(x0, y0, x1, y1, mode)
    }

    fn draw_filled_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: GraphicsMode) {
        (**self).draw_filled_box(x0, y0, x1, y1, mode)
    }
}
