// Draw operations over the menu framebuffer and the hand-off to the display.
use log::debug;

use crate::{
    common::{BlockCoord, ColorIdx, SpriteId, SPRITE_SIZE},
    cursor::{CursorBackend, CursorState},
    font::Font,
    framebuffer::Framebuffer,
    helpers::blocks_to_pixels,
    palette::{DisplayPalette, Palette},
    sprite::SpriteSet,
};

/// Receiver of finished frames.
pub trait DisplaySurface {
    fn present(&mut self, fb: &Framebuffer, palette: &DisplayPalette);
}

/// RGBA copy of the last presented frame.
#[derive(Clone, Debug, Default)]
pub struct RgbaSurface {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub frames: u64,
}

impl DisplaySurface for RgbaSurface {
    fn present(&mut self, fb: &Framebuffer, palette: &DisplayPalette) {
        self.width = fb.width();
        self.height = fb.height();
        self.rgba.clear();
        self.rgba.reserve_exact(fb.pixels().len() * 4);
        for &idx in fb.pixels() {
            self.rgba.extend(&palette.color(idx));
            self.rgba.push(255); // alpha channel
        }
        self.frames += 1;
    }
}

pub struct Compositor {
    fb: Framebuffer,
    sprites: SpriteSet,
    font: Font,
    cursor: CursorState,
    palette: DisplayPalette,
}

impl Compositor {
    pub fn new(width: usize, height: usize, font: Font, cursor_backend: CursorBackend) -> Self {
        Compositor {
            fb: Framebuffer::new(width, height),
            sprites: SpriteSet::default(),
            font,
            cursor: CursorState::new(cursor_backend, width / 2, height / 2),
            palette: DisplayPalette::default(),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    pub fn set_sprites(&mut self, sprites: SpriteSet) {
        self.sprites = sprites;
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette = palette.to_display();
    }

    pub fn display_palette(&self) -> &DisplayPalette {
        &self.palette
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn activate_cursor(&mut self) {
        self.cursor.activate(&mut self.fb);
    }

    pub fn move_cursor(&mut self, x: usize, y: usize) {
        self.cursor.move_to(&mut self.fb, x, y);
    }

    /// Runs `f` with the cursor taken off the buffer, then restores the
    /// cursor's prior visibility.
    fn with_cursor_hidden<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Framebuffer, &SpriteSet, &Font),
    {
        let was_visible = self.cursor.is_visible();
        if was_visible && self.cursor.is_active() {
            self.cursor.hide(&mut self.fb);
        }
        f(&mut self.fb, &self.sprites, &self.font);
        if was_visible {
            self.cursor.show(&mut self.fb);
        }
    }

    /// Copies sprite `id` so its 16×16 body starts at (`block_x` * 4, `row` + 1),
    /// the record's top margin occupying `row`. The background sentinel is
    /// replaced with `background`. A missing sprite draws nothing.
    pub fn blit_sprite(
        &mut self,
        id: SpriteId,
        block_x: BlockCoord,
        row: usize,
        background: ColorIdx,
    ) {
        let x = blocks_to_pixels(block_x);
        assert!(
            x + SPRITE_SIZE <= self.fb.width() && row + 1 + SPRITE_SIZE <= self.fb.height(),
            "sprite at block {} row {} is outside the framebuffer",
            block_x,
            row
        );
        debug!("blit sprite {} at ({}, {})", id, x, row + 1);
        self.with_cursor_hidden(|fb, sprites, _| {
            let Some(sprite) = sprites.get(id) else {
                return;
            };
            for i in 0..SPRITE_SIZE {
                fb.write_span(x, row + 1 + i, &sprite.remapped_row(i, background));
            }
        });
    }

    /// Draws `text` starting at block column `block_x`, pixel row `y`.
    pub fn blit_text(&mut self, block_x: BlockCoord, y: usize, color: ColorIdx, text: &str) {
        let x = blocks_to_pixels(block_x);
        assert!(
            x < self.fb.width() && y < self.fb.height(),
            "text origin ({}, {}) is outside the framebuffer",
            x,
            y
        );
        debug!("blit text {:?} at ({}, {}) color {}", text, x, y, color);
        self.with_cursor_hidden(|fb, _, font| font.draw(fb, x, y, color, text));
    }

    pub fn clear(&mut self, c: ColorIdx) {
        self.with_cursor_hidden(|fb, _, _| fb.fill(c));
    }

    /// Replaces the whole buffer with a decoded skin image.
    pub fn draw_skin(&mut self, pixels: Vec<ColorIdx>) {
        self.with_cursor_hidden(|fb, _, _| fb.replace(pixels));
    }

    pub fn present(&self, surface: &mut impl DisplaySurface) {
        surface.present(&self.fb, &self.palette);
    }
}
