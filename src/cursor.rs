//! Pointer cursor state.
//!
//! With the [`CursorBackend::Software`] backend the arrow is drawn directly into
//! the framebuffer and the pixels beneath it are saved; hiding the cursor puts
//! them back. Any other write to the buffer must therefore happen while the
//! cursor is hidden, or the saved pixels would later overwrite it.
//! With [`CursorBackend::Host`] the host draws the pointer and only the flags
//! are tracked.

use crate::{common::ColorIdx, framebuffer::Framebuffer};

const CURSOR_SIZE: usize = 8;
const CURSOR_OUTLINE: ColorIdx = 0;
const CURSOR_FILL: ColorIdx = 15;

/// 0 = transparent, 1 = outline, 2 = fill
#[rustfmt::skip]
const CURSOR_BITMAP: [[u8; CURSOR_SIZE]; CURSOR_SIZE] = [
    [1,0,0,0,0,0,0,0],
    [1,1,0,0,0,0,0,0],
    [1,2,1,0,0,0,0,0],
    [1,2,2,1,0,0,0,0],
    [1,2,2,2,1,0,0,0],
    [1,2,2,2,2,1,0,0],
    [1,2,1,1,1,1,1,0],
    [1,1,0,0,0,0,0,0],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CursorBackend {
    #[default]
    Host,
    Software,
}

#[derive(Debug)]
pub struct CursorState {
    backend: CursorBackend,
    x: usize,
    y: usize,
    visible: bool,
    active: bool,
    // Framebuffer offsets and the pixels found there before the arrow was drawn.
    saved: Vec<(usize, ColorIdx)>,
}

impl CursorState {
    pub fn new(backend: CursorBackend, x: usize, y: usize) -> Self {
        CursorState {
            backend,
            x,
            y,
            visible: false,
            active: false,
            saved: vec![],
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self, fb: &mut Framebuffer) {
        self.active = true;
        self.show(fb);
    }

    pub fn deactivate(&mut self, fb: &mut Framebuffer) {
        self.hide(fb);
        self.active = false;
    }

    pub fn show(&mut self, fb: &mut Framebuffer) {
        if self.visible || !self.active {
            return;
        }
        if self.backend == CursorBackend::Software {
            self.draw(fb);
        }
        self.visible = true;
    }

    pub fn hide(&mut self, fb: &mut Framebuffer) {
        if !self.visible {
            return;
        }
        if self.backend == CursorBackend::Software {
            self.erase(fb);
        }
        self.visible = false;
    }

    pub fn move_to(&mut self, fb: &mut Framebuffer, x: usize, y: usize) {
        let x = x.min(fb.width().saturating_sub(1));
        let y = y.min(fb.height().saturating_sub(1));
        if (x, y) == (self.x, self.y) {
            return;
        }
        let was_visible = self.visible;
        self.hide(fb);
        self.x = x;
        self.y = y;
        if was_visible {
            self.show(fb);
        }
    }

    fn draw(&mut self, fb: &mut Framebuffer) {
        self.saved.clear();
        for (dy, row) in CURSOR_BITMAP.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                let (px, py) = (self.x + dx, self.y + dy);
                if cell == 0 || px >= fb.width() || py >= fb.height() {
                    continue;
                }
                let offset = fb.offset(px, py);
                self.saved.push((offset, fb.pixels()[offset]));
                fb.set_pixel(
                    px,
                    py,
                    if cell == 1 { CURSOR_OUTLINE } else { CURSOR_FILL },
                );
            }
        }
    }

    fn erase(&mut self, fb: &mut Framebuffer) {
        let width = fb.width();
        for (offset, c) in self.saved.drain(..) {
            fb.set_pixel(offset % width, offset / width, c);
        }
    }
}
