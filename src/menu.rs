//! The fixed twelve-option main menu: layout, captions and enablement rules.
//!
//! Everything here is a pure function of [`MenuContext`], so drawing code and
//! the input state machine agree on what is clickable without sharing flags.

use crate::common::{BlockCoord, ColorIdx, SpriteId};

pub type OptionId = u8;

pub const OPTION_COUNT: OptionId = 12;
pub const SELECT_OPTION: OptionId = 1;
pub const PLAY_OPTION: OptionId = 2;
pub const MACRO_OPTION: OptionId = 11;
pub const QUIT_OPTION: OptionId = 12;

pub const BASE_COLOR: ColorIdx = 0;
pub const HIGHLIGHT_DELTA: ColorIdx = 6;

const ROW_TOPS: [usize; 6] = [57, 81, 105, 129, 153, 177];
const ICON_BLOCKS: [BlockCoord; 2] = [3, 43];
const TEXT_BLOCKS: [BlockCoord; 2] = [8, 48];
const REGION_X: [(usize, usize); 2] = [(8, 159), (168, 311)];
pub const CAPTION_LINE_PITCH: usize = 8;
const REGISTERED_MACRO_ICON: SpriteId = 28;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Registration {
    Unregistered,
    #[default]
    Registered,
}

/// Everything enablement and captions depend on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuContext {
    pub registration: Registration,
    pub adventure: Option<String>,
    pub password_ok: bool,
}

impl Default for MenuContext {
    fn default() -> Self {
        MenuContext {
            registration: Registration::Registered,
            adventure: None,
            password_ok: true,
        }
    }
}

impl MenuContext {
    pub fn adventure_loaded(&self) -> bool {
        self.adventure.is_some()
    }
}

/// Inclusive pixel rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub id: OptionId,
    pub icon_block: BlockCoord,
    pub text_block: BlockCoord,
    pub top: usize,
    pub region: Rect,
}

pub fn option(id: OptionId) -> MenuOption {
    assert!((1..=OPTION_COUNT).contains(&id), "menu option {} does not exist", id);
    let column = ((id - 1) % 2) as usize;
    let top = ROW_TOPS[((id - 1) / 2) as usize];
    let (x1, x2) = REGION_X[column];
    MenuOption {
        id,
        icon_block: ICON_BLOCKS[column],
        text_block: TEXT_BLOCKS[column],
        top,
        region: Rect {
            x1,
            y1: top,
            x2,
            y2: top + 16,
        },
    }
}

pub fn options() -> impl Iterator<Item = MenuOption> {
    (1..=OPTION_COUNT).map(option)
}

/// The option whose pointer region contains (`x`, `y`), if any.
pub fn option_at(x: usize, y: usize) -> Option<OptionId> {
    options().find(|o| o.region.contains(x, y)).map(|o| o.id)
}

pub fn is_enabled(id: OptionId, ctx: &MenuContext) -> bool {
    match id {
        SELECT_OPTION | MACRO_OPTION | QUIT_OPTION => true,
        PLAY_OPTION => ctx.adventure_loaded(),
        _ => ctx.adventure_loaded() && ctx.password_ok,
    }
}

/// Text color for an option. Disabled options never take the highlight.
pub fn option_color(id: OptionId, highlighted: bool, ctx: &MenuContext) -> ColorIdx {
    if highlighted && is_enabled(id, ctx) {
        BASE_COLOR + HIGHLIGHT_DELTA
    } else {
        BASE_COLOR
    }
}

pub fn caption(id: OptionId, registration: Registration) -> &'static [&'static str] {
    match id {
        1 => &["SELECT/CREATE", " ADVENTURE"],
        2 => &["PLAY ADVENTURE"],
        3 => &["CONFIGURE", " ADVENTURE"],
        4 => &["IMPORT FILES,", "EXPORT REPORTS"],
        5 => &["EDIT FONT"],
        6 => &["EDIT GRAPHIC", " TILES"],
        7 => &["EDIT OBJECTS,", "ITEMS, TERRAIN"],
        8 => &["EDIT MESSAGES", "AND DIALOGUE"],
        9 => &["EDIT MAPS AND", "REGIONS"],
        10 => &["EDIT PEOPLE", "AND CREATURES"],
        11 => match registration {
            Registration::Unregistered => &["ORDERING", "INFORMATION"],
            Registration::Registered => &["EDIT MACROS", "(ADVANCED)"],
        },
        12 => &["QUIT", "EXIT TO DOS"],
        _ => &[],
    }
}

pub fn icon(id: OptionId, registration: Registration) -> SpriteId {
    if id == MACRO_OPTION && registration == Registration::Registered {
        REGISTERED_MACRO_ICON
    } else {
        id as SpriteId
    }
}
