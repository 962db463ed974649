pub type ColorValue = u8; // Stored color channel (0-63)
pub type ColorIdx = u8; // Index into the 256-color palette
pub type SpriteId = usize; // 1-based index into a sprite set
pub type BlockCoord = usize; // Horizontal placement unit of 4 pixels
pub type ColorRGB = [u8; 3]; // Display color (0-255 per channel)

pub const SCREEN_WIDTH: usize = 320;
pub const SCREEN_HEIGHT: usize = 200;
pub const BLOCK_WIDTH: usize = 4;

pub const SPRITE_SIZE: usize = 16;
// Stored sprites carry a one-row, one-column margin in front of the body.
pub const SPRITE_RECORD_SIDE: usize = SPRITE_SIZE + 1;
pub const SPRITE_RECORD_SIZE: usize = SPRITE_RECORD_SIDE * SPRITE_RECORD_SIDE;
pub const MAX_ICONS: usize = 100;

// Sprite pixel value meaning "use the current background".
pub const BACKGROUND_SENTINEL: ColorIdx = 222;

pub const ACK_VERSION: i32 = 20;
pub const NO_ADVENTURE: &str = "NONAME";

pub const SKIN_FILE: &str = "ACKDATA0.DAT";
pub const ICON_FILE: &str = "ACKDATA1.ICO";
pub const SYSTEM_PALETTE: &str = "PALETTE2";
pub const LEGACY_PALETTE: &str = "PALETTE";
