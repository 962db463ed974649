use std::path::PathBuf;

use anyhow::{bail, Result};
use log::info;

use ack_frontend::{
    compositor::RgbaSurface,
    cursor::CursorBackend,
    engine::{DefaultModes, Engine, EngineConfig},
    menu::Registration,
    persist::{self, GlobalConfig},
};

use crate::Args;

pub struct FrontendState {
    pub global_config_path: PathBuf,
    pub global_config: GlobalConfig,
    pub engine: Engine<DefaultModes>,
    pub surface: RgbaSurface,
    pub scale: f32,
}

fn pick_system_dir() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select the ACK system folder ...")
        .pick_folder()
}

pub fn get_initial_state(args: &Args) -> Result<FrontendState> {
    let global_config_path = persist::get_global_config_path()?;
    let mut global_config = persist::load_global_config(&global_config_path)?;

    let system_dir = match args
        .system_dir
        .clone()
        .or_else(|| global_config.system_dir.clone())
        .or_else(pick_system_dir)
    {
        Some(dir) => dir,
        None => bail!("No system directory selected."),
    };
    if global_config.system_dir.as_ref() != Some(&system_dir) {
        global_config.system_dir = Some(system_dir.clone());
        global_config.modified = true;
    }

    let cursor = if args.software_cursor {
        CursorBackend::Software
    } else {
        CursorBackend::Host
    };
    let mut engine = Engine::new(
        EngineConfig {
            system_dir,
            cursor,
            // Every build is treated as registered.
            registration: Registration::Registered,
        },
        DefaultModes,
    );
    let adventure = args
        .adventure
        .clone()
        .or_else(|| global_config.last_adventure.clone());
    info!("Starting with adventure {:?}", adventure);

    let mut surface = RgbaSurface::default();
    engine.init(adventure.as_deref(), &mut surface);

    Ok(FrontendState {
        global_config_path,
        global_config,
        engine,
        surface,
        scale: args.scale as f32,
    })
}
