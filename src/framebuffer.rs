use embedded_graphics::{prelude::*, Pixel};

use crate::{common::ColorIdx, font::PaletteIndex};

/// Indexed-color pixel buffer with a row-offset table computed once at creation.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<ColorIdx>,
    row_offsets: Vec<usize>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![0; width * height],
            row_offsets: (0..height).map(|y| y * width).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[ColorIdx] {
        &self.pixels
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn pixel(&self, x: usize, y: usize) -> ColorIdx {
        self.pixels[self.offset(x, y)]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, c: ColorIdx) {
        let i = self.offset(x, y);
        self.pixels[i] = c;
    }

    pub fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} framebuffer",
            x,
            y,
            self.width,
            self.height
        );
        self.row_offsets[y] + x
    }

    /// Copies `data` into row `y` starting at column `x`. The whole span must fit.
    pub fn write_span(&mut self, x: usize, y: usize, data: &[ColorIdx]) {
        assert!(
            x + data.len() <= self.width,
            "span of {} at x={} exceeds framebuffer width {}",
            data.len(),
            x,
            self.width
        );
        let start = self.offset(x, y);
        self.pixels[start..start + data.len()].copy_from_slice(data);
    }

    pub fn fill(&mut self, c: ColorIdx) {
        self.pixels.fill(c);
    }

    /// Replaces the whole buffer with an already decoded image of the same size.
    pub fn replace(&mut self, pixels: Vec<ColorIdx>) {
        assert_eq!(pixels.len(), self.pixels.len(), "image size mismatch");
        self.pixels = pixels;
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = PaletteIndex;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, PaletteIndex(c)) in pixels {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                continue;
            }
            let i = self.row_offsets[y as usize] + x as usize;
            self.pixels[i] = c;
        }
        Ok(())
    }
}
