//! Ties the loaders, the compositor and the menu state machine together.
//!
//! The engine owns every piece of mutable front-end state and is driven one
//! input event at a time. Each event is handled to completion, including any
//! mode handler it triggers, before the frame is presented.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    common::{
        ColorIdx, ACK_VERSION, BLOCK_WIDTH, ICON_FILE, MAX_ICONS, NO_ADVENTURE, SCREEN_HEIGHT,
        SCREEN_WIDTH, SKIN_FILE,
    },
    compositor::{Compositor, DisplaySurface},
    cursor::CursorBackend,
    font::Font,
    helpers::version_string,
    machine::{Action, Command, InputEvent, MenuMachine},
    menu::{self, MenuContext, OptionId, Registration, CAPTION_LINE_PITCH},
    resource::{
        config_record_path, load_config_record, load_palette_with_fallback, load_sprite_set,
        palette_candidates, ConfigRecord,
    },
    skin::load_skin,
};

const ICON_BACKGROUND: ColorIdx = 0;
const BANNER_COLOR: ColorIdx = 1;
const MASTER_SUFFIX: &str = "MASTER.DAT";

/// Destinations reached by confirming a menu option.
pub trait ModeHandlers {
    /// Picks the adventure to load next, or `None` to keep the current state.
    fn select_adventure(&mut self, ctx: &MenuContext, available: &[String]) -> Option<String>;
    fn play_adventure(&mut self, name: &str);
    fn open_editor(&mut self, option: OptionId, ctx: &MenuContext);
}

/// Cycles through the adventures found on disk; play and the editors are not
/// part of this front end and are only logged.
#[derive(Default)]
pub struct DefaultModes;

impl ModeHandlers for DefaultModes {
    fn select_adventure(&mut self, ctx: &MenuContext, available: &[String]) -> Option<String> {
        if available.is_empty() {
            warn!("No adventures found.");
            return None;
        }
        let next = match ctx
            .adventure
            .as_ref()
            .and_then(|cur| available.iter().position(|a| a == cur))
        {
            Some(i) => (i + 1) % available.len(),
            None => 0,
        };
        Some(available[next].clone())
    }

    fn play_adventure(&mut self, name: &str) {
        info!("Starting adventure {}", name);
    }

    fn open_editor(&mut self, option: OptionId, _ctx: &MenuContext) {
        warn!(
            "{} is not implemented.",
            menu::caption(option, Registration::Registered).join(" ")
        );
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub system_dir: PathBuf,
    pub cursor: CursorBackend,
    pub registration: Registration,
}

/// Adventure names with a configuration record in `dir`, sorted.
pub fn discover_adventures(dir: &Path) -> Vec<String> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.display().to_string()),
        MASTER_SUFFIX
    );
    let mut names: Vec<String> = match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| entry.ok())
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?.to_owned();
                let name = file_name.strip_suffix(MASTER_SUFFIX)?;
                (!name.is_empty()).then(|| name.to_owned())
            })
            .collect(),
        Err(e) => {
            warn!("Invalid adventure search pattern {}: {}", pattern, e);
            vec![]
        }
    };
    names.sort();
    names
}

pub struct Engine<H: ModeHandlers = DefaultModes> {
    config: EngineConfig,
    compositor: Compositor,
    machine: MenuMachine,
    ctx: MenuContext,
    record: Option<ConfigRecord>,
    handlers: H,
}

impl<H: ModeHandlers> Engine<H> {
    pub fn new(config: EngineConfig, handlers: H) -> Self {
        let compositor =
            Compositor::new(SCREEN_WIDTH, SCREEN_HEIGHT, Font::default(), config.cursor);
        let ctx = MenuContext {
            registration: config.registration,
            ..MenuContext::default()
        };
        Engine {
            config,
            compositor,
            machine: MenuMachine::default(),
            ctx,
            record: None,
            handlers,
        }
    }

    pub fn context(&self) -> &MenuContext {
        &self.ctx
    }

    pub fn machine(&self) -> &MenuMachine {
        &self.machine
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    pub fn record(&self) -> Option<&ConfigRecord> {
        self.record.as_ref()
    }

    /// Loads the system resources and the optional start-up adventure, draws
    /// the menu and presents the first frame.
    pub fn init(&mut self, adventure: Option<&str>, surface: &mut impl DisplaySurface) {
        info!("Initializing menu from {}", self.config.system_dir.display());
        self.compositor.clear(0);
        let loading = "Loading...";
        let x = (SCREEN_WIDTH - loading.len() * self.compositor.font().pitch()) / 2;
        self.compositor.blit_text(x / BLOCK_WIDTH, 60, 0, loading);
        self.compositor.present(surface);

        self.load_palette();
        self.load_icons();
        if let Some(name) = adventure.filter(|n| !n.is_empty() && *n != NO_ADVENTURE) {
            self.load_adventure(name);
        }
        self.redisplay();
        self.compositor.activate_cursor();
        let actions = self.machine.start();
        self.apply(actions);
        self.compositor.present(surface);
    }

    /// Loads an adventure's configuration record and palette. Any failure
    /// leaves the engine with no adventure loaded and the system palette.
    pub fn load_adventure(&mut self, name: &str) -> bool {
        info!("Loading adventure {}", name);
        let path = config_record_path(&self.config.system_dir, name);
        match load_config_record(&path) {
            Ok(record) => {
                self.record = Some(record);
                self.ctx.adventure = Some(name.to_owned());
                self.load_palette();
                true
            }
            Err(e) => {
                warn!("Adventure {} not loaded: {}", name, e);
                self.record = None;
                self.ctx.adventure = None;
                self.load_palette();
                false
            }
        }
    }

    fn load_palette(&mut self) {
        let version = self.record.as_ref().map_or(ACK_VERSION, |r| r.version);
        let candidates =
            palette_candidates(&self.config.system_dir, self.ctx.adventure.as_deref(), version);
        match load_palette_with_fallback(&candidates) {
            Ok(pal) => self.compositor.set_palette(&pal),
            Err(e) => warn!("Keeping previous palette: {}", e),
        }
    }

    fn load_icons(&mut self) {
        let path = self.config.system_dir.join(ICON_FILE);
        match load_sprite_set(&path, MAX_ICONS) {
            Ok(set) => self.compositor.set_sprites(set),
            Err(e) => warn!("Menu icons unavailable: {}", e),
        }
    }

    /// Redraws the whole menu with every option at base color.
    pub fn redisplay(&mut self) {
        self.compositor.clear(0);
        match load_skin(&self.config.system_dir.join(SKIN_FILE), SCREEN_WIDTH, SCREEN_HEIGHT) {
            Ok(pixels) => self.compositor.draw_skin(pixels),
            Err(e) => warn!("Menu skin not drawn: {}", e),
        }

        match &self.ctx.adventure {
            Some(name) => {
                let banner = format!("CURRENT ADVENTURE: {}", name);
                self.compositor.blit_text(11, 34, BANNER_COLOR, &banner);
                let version = self.record.as_ref().map_or(ACK_VERSION, |r| r.version);
                if version != ACK_VERSION {
                    let created = format!("(CREATED WITH ACK {})", version_string(version));
                    self.compositor.blit_text(15, 42, BANNER_COLOR, &created);
                }
            }
            None => {
                self.compositor
                    .blit_text(20, 40, BANNER_COLOR, "No Adventure loaded.");
            }
        }

        for opt in menu::options() {
            let sprite = menu::icon(opt.id, self.ctx.registration);
            self.compositor
                .blit_sprite(sprite, opt.icon_block, opt.top, ICON_BACKGROUND);
            self.draw_option(opt.id, false);
        }
    }

    fn draw_option(&mut self, id: OptionId, highlighted: bool) {
        let opt = menu::option(id);
        let color = menu::option_color(id, highlighted, &self.ctx);
        for (i, line) in menu::caption(id, self.ctx.registration).iter().enumerate() {
            self.compositor
                .blit_text(opt.text_block, opt.top + i * CAPTION_LINE_PITCH, color, line);
        }
    }

    /// Handles one input event and presents the result. Returns `false` once
    /// the menu has terminated.
    pub fn handle_event(&mut self, event: InputEvent, surface: &mut impl DisplaySurface) -> bool {
        if let InputEvent::PointerMoved { x, y } = event {
            self.compositor.move_cursor(x, y);
        }
        let actions = self.machine.handle(event, &self.ctx);
        self.apply(actions);
        self.compositor.present(surface);
        !self.machine.is_terminated()
    }

    /// Feeds a queue of events until it is exhausted or the menu terminates.
    pub fn run<I>(&mut self, events: I, surface: &mut impl DisplaySurface)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if !self.handle_event(event, surface) {
                break;
            }
        }
    }

    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::DrawOption { id, highlighted } => self.draw_option(id, highlighted),
                Action::Invoke(cmd) => {
                    self.dispatch(cmd);
                    let follow_up = self.machine.finish_dispatch();
                    self.apply(follow_up);
                }
                Action::Exit => info!("Leaving main menu"),
            }
        }
    }

    fn dispatch(&mut self, cmd: Command) {
        info!("Dispatching {:?}", cmd);
        match cmd {
            Command::SelectAdventure => {
                let available = discover_adventures(&self.config.system_dir);
                if let Some(name) = self.handlers.select_adventure(&self.ctx, &available) {
                    self.load_adventure(&name);
                    self.redisplay();
                }
            }
            Command::PlayAdventure => {
                if let Some(name) = self.ctx.adventure.clone() {
                    self.handlers.play_adventure(&name);
                }
            }
            Command::OpenEditor(id) => self.handlers.open_editor(id, &self.ctx),
            Command::Quit => {}
        }
    }
}
