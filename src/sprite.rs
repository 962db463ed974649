// 16x16 indexed tiles used for menu icons, and the sprite-set container.
use crate::common::{
    ColorIdx, SpriteId, BACKGROUND_SENTINEL, SPRITE_RECORD_SIDE, SPRITE_RECORD_SIZE, SPRITE_SIZE,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSprite {
    // Stored record including the leading margin row and column. Only the
    // body (rows and columns 1..=16) is ever exposed; the margin is kept so
    // that saving reproduces the loaded bytes.
    record: [[u8; SPRITE_RECORD_SIDE]; SPRITE_RECORD_SIDE],
}

impl Default for TileSprite {
    fn default() -> Self {
        TileSprite {
            record: [[0; SPRITE_RECORD_SIDE]; SPRITE_RECORD_SIDE],
        }
    }
}

impl TileSprite {
    pub fn from_pixels(pixels: [[ColorIdx; SPRITE_SIZE]; SPRITE_SIZE]) -> Self {
        let mut sprite = TileSprite::default();
        for (y, row) in pixels.iter().enumerate() {
            sprite.record[y + 1][1..].copy_from_slice(row);
        }
        sprite
    }

    fn from_record(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), SPRITE_RECORD_SIZE);
        let mut sprite = TileSprite::default();
        for (row, chunk) in sprite
            .record
            .iter_mut()
            .zip(bytes.chunks_exact(SPRITE_RECORD_SIDE))
        {
            row.copy_from_slice(chunk);
        }
        sprite
    }

    fn write_record(&self, out: &mut Vec<u8>) {
        for row in &self.record {
            out.extend_from_slice(row);
        }
    }

    /// Pixel at body coordinates (0-based, each in 0..16).
    pub fn pixel(&self, x: usize, y: usize) -> ColorIdx {
        assert!(x < SPRITE_SIZE && y < SPRITE_SIZE, "sprite pixel out of range");
        self.record[y + 1][x + 1]
    }

    pub fn row(&self, y: usize) -> &[ColorIdx] {
        &self.record[y + 1][1..]
    }

    /// Body row `y` with the background sentinel replaced by `background`.
    pub fn remapped_row(&self, y: usize, background: ColorIdx) -> [ColorIdx; SPRITE_SIZE] {
        let mut out = [0; SPRITE_SIZE];
        for (dst, &src) in out.iter_mut().zip(self.row(y)) {
            *dst = if src == BACKGROUND_SENTINEL {
                background
            } else {
                src
            };
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteSet {
    sprites: Vec<TileSprite>,
}

impl SpriteSet {
    pub fn new(sprites: Vec<TileSprite>) -> Self {
        SpriteSet { sprites }
    }

    /// Decodes up to `max_count` complete records. A trailing partial record
    /// is ignored.
    pub fn from_bytes(bytes: &[u8], max_count: usize) -> Self {
        let sprites = bytes
            .chunks_exact(SPRITE_RECORD_SIZE)
            .take(max_count)
            .map(TileSprite::from_record)
            .collect();
        SpriteSet { sprites }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.sprites.len() * SPRITE_RECORD_SIZE);
        for s in &self.sprites {
            s.write_record(&mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Looks up a sprite by its 1-based id.
    pub fn get(&self, id: SpriteId) -> Option<&TileSprite> {
        id.checked_sub(1).and_then(|i| self.sprites.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fill: u8) -> Vec<u8> {
        vec![fill; SPRITE_RECORD_SIZE]
    }

    #[test]
    fn body_excludes_margin() {
        let mut bytes = record(0);
        // Margin row and column hold 9, body holds 5.
        for y in 0..SPRITE_RECORD_SIDE {
            for x in 0..SPRITE_RECORD_SIDE {
                bytes[y * SPRITE_RECORD_SIDE + x] = if x == 0 || y == 0 { 9 } else { 5 };
            }
        }
        let set = SpriteSet::from_bytes(&bytes, 10);
        let sprite = set.get(1).unwrap();
        for y in 0..SPRITE_SIZE {
            assert!(sprite.row(y).iter().all(|&p| p == 5));
        }
    }

    #[test]
    fn complete_records_load_in_file_order() {
        let mut bytes = vec![];
        for i in 1..=3 {
            bytes.extend(record(i));
        }
        let set = SpriteSet::from_bytes(&bytes, 100);
        assert_eq!(set.len(), 3);
        for id in 1..=3 {
            assert_eq!(set.get(id).unwrap().pixel(0, 0), id as u8);
        }
        assert!(set.get(0).is_none());
        assert!(set.get(4).is_none());
    }

    #[test]
    fn trailing_partial_record_is_dropped() {
        let mut bytes = vec![];
        bytes.extend(record(1));
        bytes.extend(record(2));
        bytes.extend(&record(3)[..100]);
        let set = SpriteSet::from_bytes(&bytes, 100);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn max_count_caps_the_set() {
        let bytes: Vec<u8> = (0..5).flat_map(|i| record(i)).collect();
        assert_eq!(SpriteSet::from_bytes(&bytes, 3).len(), 3);
    }

    #[test]
    fn save_reproduces_loaded_bytes() {
        let bytes: Vec<u8> = (0..4 * SPRITE_RECORD_SIZE).map(|i| (i * 7 % 251) as u8).collect();
        let set = SpriteSet::from_bytes(&bytes, 100);
        assert_eq!(set.to_bytes(), bytes);
    }

    #[test]
    fn remapped_row_replaces_only_the_sentinel() {
        let mut pixels = [[3; SPRITE_SIZE]; SPRITE_SIZE];
        pixels[2][4] = BACKGROUND_SENTINEL;
        let sprite = TileSprite::from_pixels(pixels);
        let row = sprite.remapped_row(2, 17);
        assert_eq!(row[4], 17);
        assert_eq!(row[3], 3);
        assert_eq!(sprite.remapped_row(1, 17), [3; SPRITE_SIZE]);
    }
}
