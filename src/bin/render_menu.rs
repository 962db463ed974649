use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ack_frontend::{
    compositor::RgbaSurface,
    cursor::CursorBackend,
    engine::{DefaultModes, Engine, EngineConfig},
    menu::Registration,
    persist::save_frame_png,
    resource::save_sprite_set,
};

/// Renders the main menu without a window and saves it as a PNG.
#[derive(Parser, Debug)]
struct Args {
    /// Folder holding the ACK system files
    #[arg(long)]
    system_dir: PathBuf,

    /// Adventure to show as loaded
    #[arg(long)]
    adventure: Option<String>,

    /// Output PNG path
    #[arg(long, default_value = "menu.png")]
    output: PathBuf,

    /// Also write the loaded menu icons to this sprite-set file
    #[arg(long)]
    export_icons: Option<PathBuf>,
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut engine = Engine::new(
        EngineConfig {
            system_dir: args.system_dir.clone(),
            cursor: CursorBackend::Host,
            registration: Registration::Registered,
        },
        DefaultModes,
    );
    let mut surface = RgbaSurface::default();
    engine.init(args.adventure.as_deref(), &mut surface);
    save_frame_png(&args.output, &surface)
        .with_context(|| format!("Unable to write {}", args.output.display()))?;

    if let Some(path) = &args.export_icons {
        save_sprite_set(path, engine.compositor().sprites())?;
    }
    info!("Done.");
    Ok(())
}
