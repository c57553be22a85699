use bitvec::prelude::*;
use itertools::Itertools;

use super::{DisplaySurface, GraphicsMode};

pub const PANEL_WIDTH: u16 = 32;
pub const PANEL_HEIGHT: u16 = 16;

/// Monochrome frame, one bit per LED, rows packed most significant bit first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DmdFrame {
    width: u16,
    height: u16,
    pixels: BitVec<u8, Msb0>,
}

impl DmdFrame {
    pub fn new(width: u16, height: u16) -> DmdFrame {
        DmdFrame {
            width,
            height,
            pixels: bitvec![u8, Msb0; 0; width as usize * height as usize],
        }
    }

    /// Frame covering a grid of chained 32x16 panels.
    pub fn for_panels(panels_wide: u8, panels_high: u8) -> DmdFrame {
        Self::new(
            PANEL_WIDTH * panels_wide as u16,
            PANEL_HEIGHT * panels_high as u16,
        )
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |idx| self.pixels[idx])
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    pub fn fill(&mut self, mode: GraphicsMode) {
        for idx in 0..self.pixels.len() {
            let current = self.pixels[idx];
            self.pixels.set(idx, mode.apply(current));
        }
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.count_ones()
    }

    /// Packed frame bytes, row by row.
    pub fn as_raw_slice(&self) -> &[u8] {
        self.pixels.as_raw_slice()
    }

    /// RGBA buffer suitable for an `ImageData`.
    pub fn to_rgba(&self, on: (u8, u8, u8), off: (u8, u8, u8)) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for lit in self.pixels.iter().by_vals() {
            let (r, g, b) = if lit { on } else { off };
            data.extend_from_slice(&[r, g, b, 0xFF]);
        }
        data
    }

    /// One line per row, `#` for lit pixels and `.` otherwise.
    pub fn to_ascii(&self) -> String {
        (0..self.height as i32)
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| if self.get_pixel(x, y) { '#' } else { '.' })
                    .collect::<String>()
            })
            .join("\n")
    }
}

impl DisplaySurface for DmdFrame {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode) {
        if let Some(idx) = self.index(x, y) {
            let current = self.pixels[idx];
            self.pixels.set(idx, mode.apply(current));
        }
    }
}
