// Loading and saving of the fixed-layout binary resources.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use thiserror::Error;

use crate::{
    common::{ColorIdx, ACK_VERSION, LEGACY_PALETTE, SYSTEM_PALETTE},
    palette::{Palette, PALETTE_FILE_SIZE},
    sprite::SpriteSet,
};

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("resource not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("resource truncated: {} ({actual} of {expected} bytes)", .path.display())]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

pub fn read_resource(path: &Path) -> ResourceResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ResourceError::NotFound {
            path: path.to_owned(),
        },
        _ => ResourceError::Io {
            path: path.to_owned(),
            source: e,
        },
    })
}

fn ensure_len(path: &Path, bytes: &[u8], expected: usize) -> ResourceResult<()> {
    if bytes.len() < expected {
        return Err(ResourceError::Truncated {
            path: path.to_owned(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

pub fn load_palette(path: &Path) -> ResourceResult<Palette> {
    info!("Loading palette {}", path.display());
    let bytes = read_resource(path)?;
    ensure_len(path, &bytes, PALETTE_FILE_SIZE)?;
    Ok(Palette::from_bytes(&bytes).unwrap_or_default())
}

/// Palette files to try for an adventure, most specific first.
pub fn palette_candidates(
    system_dir: &Path,
    adventure: Option<&str>,
    version: i32,
) -> Vec<PathBuf> {
    let mut candidates = vec![];
    if let Some(name) = adventure {
        candidates.push(system_dir.join(format!("{}.PAL", name)));
    }
    if version >= ACK_VERSION {
        candidates.push(system_dir.join(format!("{}.PAL", SYSTEM_PALETTE)));
    }
    candidates.push(system_dir.join(format!("{}.PAL", LEGACY_PALETTE)));
    candidates
}

/// Loads the first readable palette among `candidates`. The error of the last
/// candidate is returned when none can be read.
pub fn load_palette_with_fallback(candidates: &[PathBuf]) -> ResourceResult<Palette> {
    let mut last_err = None;
    for path in candidates {
        match load_palette(path) {
            Ok(pal) => return Ok(pal),
            Err(e) => {
                warn!("{}", e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| ResourceError::NotFound {
        path: PathBuf::new(),
    }))
}

/// Loads up to `max_count` sprites. Truncated files yield the complete
/// records they contain; only a missing or unreadable file is an error.
pub fn load_sprite_set(path: &Path, max_count: usize) -> ResourceResult<SpriteSet> {
    info!("Loading sprites from {}", path.display());
    let bytes = read_resource(path)?;
    let set = SpriteSet::from_bytes(&bytes, max_count);
    info!("Loaded {} sprites", set.len());
    Ok(set)
}

pub fn save_sprite_set(path: &Path, set: &SpriteSet) -> ResourceResult<()> {
    info!("Saving {} sprites to {}", set.len(), path.display());
    fs::write(path, set.to_bytes()).map_err(|e| ResourceError::Io {
        path: path.to_owned(),
        source: e,
    })
}

pub const TEXT_COLOR_COUNT: usize = 10;
pub const PHASE_GROUPS: usize = 3;
pub const PHASE_STEPS: usize = 5;
pub const PHASE_COLORS: usize = 4;
// The version integer is 4-byte aligned, so two pad bytes follow the text colors.
const VERSION_OFFSET: usize = 12;
const PHASE_TABLE_OFFSET: usize = VERSION_OFFSET + 4;
pub const CONFIG_RECORD_SIZE: usize =
    PHASE_TABLE_OFFSET + PHASE_GROUPS * PHASE_STEPS * PHASE_COLORS;

/// Per-adventure configuration (the adventure's `MASTER.DAT`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigRecord {
    pub text_colors: [ColorIdx; TEXT_COLOR_COUNT],
    pub version: i32,
    pub phase_colors: [[[ColorIdx; PHASE_COLORS]; PHASE_STEPS]; PHASE_GROUPS],
}

impl Default for ConfigRecord {
    fn default() -> Self {
        ConfigRecord {
            text_colors: [0; TEXT_COLOR_COUNT],
            version: ACK_VERSION,
            phase_colors: [[[0; PHASE_COLORS]; PHASE_STEPS]; PHASE_GROUPS],
        }
    }
}

impl ConfigRecord {
    pub fn from_bytes(bytes: &[u8; CONFIG_RECORD_SIZE]) -> Self {
        let mut record = ConfigRecord::default();
        record
            .text_colors
            .copy_from_slice(&bytes[..TEXT_COLOR_COUNT]);
        let mut version = [0; 4];
        version.copy_from_slice(&bytes[VERSION_OFFSET..PHASE_TABLE_OFFSET]);
        record.version = i32::from_le_bytes(version);
        let mut table = bytes[PHASE_TABLE_OFFSET..].iter();
        for group in record.phase_colors.iter_mut() {
            for step in group.iter_mut() {
                for color in step.iter_mut() {
                    *color = *table.next().unwrap_or(&0);
                }
            }
        }
        record
    }

    pub fn to_bytes(&self) -> [u8; CONFIG_RECORD_SIZE] {
        let mut out = [0; CONFIG_RECORD_SIZE];
        out[..TEXT_COLOR_COUNT].copy_from_slice(&self.text_colors);
        out[VERSION_OFFSET..PHASE_TABLE_OFFSET].copy_from_slice(&self.version.to_le_bytes());
        let flat = self.phase_colors.iter().flatten().flatten();
        for (dst, &src) in out[PHASE_TABLE_OFFSET..].iter_mut().zip(flat) {
            *dst = src;
        }
        out
    }
}

pub fn config_record_path(system_dir: &Path, adventure: &str) -> PathBuf {
    system_dir.join(format!("{}MASTER.DAT", adventure))
}

pub fn load_config_record(path: &Path) -> ResourceResult<ConfigRecord> {
    info!("Loading configuration {}", path.display());
    let bytes = read_resource(path)?;
    ensure_len(path, &bytes, CONFIG_RECORD_SIZE)?;
    let mut fixed = [0; CONFIG_RECORD_SIZE];
    fixed.copy_from_slice(&bytes[..CONFIG_RECORD_SIZE]);
    Ok(ConfigRecord::from_bytes(&fixed))
}

pub fn save_config_record(path: &Path, record: &ConfigRecord) -> ResourceResult<()> {
    fs::write(path, record.to_bytes()).map_err(|e| ResourceError::Io {
        path: path.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SPRITE_RECORD_SIZE;

    #[test]
    fn missing_palette_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_palette(&dir.path().join("NOPE.PAL")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[test]
    fn short_palette_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SHORT.PAL");
        fs::write(&path, [0u8; 100]).unwrap();
        let err = load_palette(&path).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Truncated {
                expected: PALETTE_FILE_SIZE,
                actual: 100,
                ..
            }
        ));
    }

    #[test]
    fn adventure_palette_is_preferred_over_system_palette() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("QUEST.PAL"), [1u8; PALETTE_FILE_SIZE]).unwrap();
        fs::write(dir.path().join("PALETTE.PAL"), [2u8; PALETTE_FILE_SIZE]).unwrap();
        let candidates = palette_candidates(dir.path(), Some("QUEST"), ACK_VERSION);
        let pal = load_palette_with_fallback(&candidates).unwrap();
        assert_eq!(pal.entries[0].red, 1);
    }

    #[test]
    fn falls_back_to_shared_palette() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PALETTE.PAL"), [2u8; PALETTE_FILE_SIZE]).unwrap();
        let candidates = palette_candidates(dir.path(), Some("QUEST"), ACK_VERSION);
        assert_eq!(candidates.len(), 3);
        let pal = load_palette_with_fallback(&candidates).unwrap();
        assert_eq!(pal.entries[0].red, 2);
    }

    #[test]
    fn legacy_version_skips_current_system_palette() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = palette_candidates(dir.path(), None, 15);
        assert_eq!(candidates, vec![dir.path().join("PALETTE.PAL")]);
    }

    #[test]
    fn no_palette_anywhere_surfaces_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = palette_candidates(dir.path(), Some("QUEST"), ACK_VERSION);
        let err = load_palette_with_fallback(&candidates).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[test]
    fn sprite_set_tolerates_truncation_and_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ICONS.ICO");
        let mut bytes = vec![7u8; SPRITE_RECORD_SIZE * 2];
        bytes.extend([1u8; 10]);
        fs::write(&path, &bytes).unwrap();
        assert_eq!(load_sprite_set(&path, 100).unwrap().len(), 2);
        assert!(matches!(
            load_sprite_set(&dir.path().join("MISSING.ICO"), 100),
            Err(ResourceError::NotFound { .. })
        ));
    }

    #[test]
    fn saved_sprite_file_matches_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("A.ICO");
        let dst = dir.path().join("B.ICO");
        let bytes: Vec<u8> = (0..3 * SPRITE_RECORD_SIZE).map(|i| (i % 256) as u8).collect();
        fs::write(&src, &bytes).unwrap();
        let set = load_sprite_set(&src, 100).unwrap();
        save_sprite_set(&dst, &set).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), bytes);
    }

    fn legacy_record_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 76];
        bytes[0] = 4;
        bytes[9] = 13;
        bytes[12..16].copy_from_slice(&15i32.to_le_bytes());
        bytes[16] = 21;
        bytes[75] = 99;
        bytes
    }

    #[test]
    fn config_record_layout() {
        assert_eq!(CONFIG_RECORD_SIZE, 76);
        let mut bytes = [0u8; CONFIG_RECORD_SIZE];
        bytes.copy_from_slice(&legacy_record_bytes());
        let record = ConfigRecord::from_bytes(&bytes);
        assert_eq!(record.text_colors[0], 4);
        assert_eq!(record.text_colors[9], 13);
        assert_eq!(record.version, 15);
        assert_eq!(record.phase_colors[0][0][0], 21);
        assert_eq!(record.phase_colors[2][4][3], 99);
        assert_eq!(record.to_bytes(), bytes);
    }

    #[test]
    fn record_written_by_ack_reads_its_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_record_path(dir.path(), "QUEST");
        fs::write(&path, legacy_record_bytes()).unwrap();
        let record = load_config_record(&path).unwrap();
        assert_eq!(record.version, 15);
        assert_eq!(record.phase_colors[0][0][0], 21);

        save_config_record(&path, &record).unwrap();
        assert_eq!(fs::read(&path).unwrap(), legacy_record_bytes());
    }

    #[test]
    fn config_record_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_record_path(dir.path(), "QUEST");
        assert!(matches!(
            load_config_record(&path),
            Err(ResourceError::NotFound { .. })
        ));
        fs::write(&path, [0u8; 20]).unwrap();
        assert!(matches!(
            load_config_record(&path),
            Err(ResourceError::Truncated { .. })
        ));
        save_config_record(&path, &ConfigRecord::default()).unwrap();
        assert_eq!(load_config_record(&path).unwrap(), ConfigRecord::default());
    }
}
