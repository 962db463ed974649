// Glyph source for menu text. Glyph shapes come from embedded-graphics' mono fonts;
// this module only fixes the column pitch and maps text colors to palette indices.
use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoFont, MonoTextStyle},
    pixelcolor::PixelColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::common::ColorIdx;

/// A framebuffer color expressed as a palette index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaletteIndex(pub ColorIdx);

impl PixelColor for PaletteIndex {
    type Raw = ();
}

pub struct Font {
    face: &'static MonoFont<'static>,
    pitch: usize,
}

impl Default for Font {
    fn default() -> Self {
        Font {
            face: &FONT_5X8,
            pitch: 6,
        }
    }
}

impl Font {
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Draws `text` with its top-left corner at pixel (`x`, `y`), one glyph per
    /// `pitch` pixels.
    pub fn draw<D>(&self, target: &mut D, x: usize, y: usize, color: ColorIdx, text: &str)
    where
        D: DrawTarget<Color = PaletteIndex>,
    {
        let style = MonoTextStyle::new(self.face, PaletteIndex(color));
        let mut buf = [0u8; 4];
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let origin = Point::new((x + i * self.pitch) as i32, y as i32);
            let glyph: &str = ch.encode_utf8(&mut buf);
            // Text rendering clips at the target edge instead of failing.
            let _ = Text::with_baseline(glyph, origin, style, Baseline::Top).draw(target);
        }
    }
}
