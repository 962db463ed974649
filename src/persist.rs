use std::{
    fs,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use json_pretty_compact::PrettyCompactFormatter;
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Serializer;

use crate::compositor::RgbaSurface;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    #[serde(skip_serializing, skip_deserializing)]
    pub modified: bool,
    pub system_dir: Option<PathBuf>,
    pub last_adventure: Option<String>,
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    info!("Saving {}", path.display());
    let formatter = PrettyCompactFormatter::new();
    let mut data_bytes = vec![];
    let mut ser = Serializer::with_formatter(&mut data_bytes, formatter);
    data.serialize(&mut ser)?;
    fs::create_dir_all(path.parent().context("invalid parent directory")?)?;
    fs::write(path, &data_bytes)?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes = std::fs::read(path)?;
    let data: T = serde_json::from_slice(&data_bytes)?;
    Ok(data)
}

pub fn get_global_config_path() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("", "", "AckFrontend")
        .context("Unable to open global config directory.")?;
    let config_dir = project_dirs.config_dir();
    Ok(config_dir.join("config.json"))
}

/// Loads the global config, falling back to defaults when none was saved yet.
pub fn load_global_config(path: &Path) -> Result<GlobalConfig> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(GlobalConfig::default());
    }
    load_json(path).with_context(|| format!("Unable to read config {}", path.display()))
}

pub fn save_global_config(path: &Path, config: &mut GlobalConfig) -> Result<()> {
    if config.modified {
        save_json(path, config)?;
        config.modified = false;
    }
    Ok(())
}

/// Writes the last presented frame as an RGBA PNG.
pub fn save_frame_png(path: &Path, surface: &RgbaSurface) -> Result<()> {
    ensure!(surface.frames > 0, "no frame has been presented");
    info!("Saving {}", path.display());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        surface.width as u32,
        surface.height as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&surface.rgba)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_and_skips_modified_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        assert_eq!(load_global_config(&path).unwrap(), GlobalConfig::default());

        let mut config = GlobalConfig {
            modified: true,
            system_dir: Some(PathBuf::from("/games/ack")),
            last_adventure: Some("QUEST".to_string()),
        };
        save_global_config(&path, &mut config).unwrap();
        assert!(!config.modified);
        let loaded = load_global_config(&path).unwrap();
        assert_eq!(loaded.system_dir, config.system_dir);
        assert_eq!(loaded.last_adventure.as_deref(), Some("QUEST"));
    }

    #[test]
    fn unmodified_config_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        save_global_config(&path, &mut GlobalConfig::default()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn frame_png_has_surface_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.png");
        let surface = RgbaSurface {
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 255, 4, 5, 6, 255],
            frames: 1,
        };
        save_frame_png(&path, &surface).unwrap();
        let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 2);
        assert_eq!(reader.info().height, 1);
    }

    #[test]
    fn png_requires_a_presented_frame() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_frame_png(&dir.path().join("x.png"), &RgbaSurface::default()).is_err());
    }
}
