// Decoder for the menu skin: a bottom-up, 8-bit-per-pixel bitmap container.
use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use log::info;

use crate::resource::{ResourceError, ResourceResult};

pub const SKIN_HEADER_SIZE: usize = 54;
// Header byte holding the palette-table entry count (0 means 256).
pub const SKIN_PALETTE_COUNT_OFFSET: usize = 50;
pub const SKIN_PALETTE_ENTRY_SIZE: usize = 4;

/// Byte offset of the first scanline for a given header.
pub fn pixel_data_offset(header: &[u8; SKIN_HEADER_SIZE]) -> u64 {
    let count = match header[SKIN_PALETTE_COUNT_OFFSET] {
        0 => 256,
        n => n as u64,
    };
    SKIN_HEADER_SIZE as u64 + count * SKIN_PALETTE_ENTRY_SIZE as u64
}

/// Decodes `height` scanlines of `width` bytes into a top-down buffer.
/// Nothing is returned unless every scanline was read in full.
pub fn decode_skin<R: Read + Seek>(
    reader: &mut R,
    width: usize,
    height: usize,
) -> io::Result<Vec<u8>> {
    let mut header = [0; SKIN_HEADER_SIZE];
    reader.read_exact(&mut header)?;
    reader.seek(SeekFrom::Start(pixel_data_offset(&header)))?;

    let mut pixels = vec![0; width * height];
    for i in 0..height {
        let row = height - 1 - i;
        reader.read_exact(&mut pixels[row * width..(row + 1) * width])?;
    }
    Ok(pixels)
}

/// Total file size needed for a `width` × `height` skin with this header.
pub fn skin_file_size(header: &[u8; SKIN_HEADER_SIZE], width: usize, height: usize) -> usize {
    pixel_data_offset(header) as usize + width * height
}

pub fn load_skin(path: &Path, width: usize, height: usize) -> ResourceResult<Vec<u8>> {
    info!("Loading skin {}", path.display());
    let io_error = |e: io::Error| match e.kind() {
        io::ErrorKind::NotFound => ResourceError::NotFound {
            path: path.to_owned(),
        },
        _ => ResourceError::Io {
            path: path.to_owned(),
            source: e,
        },
    };
    let file = File::open(path).map_err(io_error)?;
    let actual = file.metadata().map_err(io_error)?.len() as usize;
    let mut reader = BufReader::new(file);

    let mut header = [0; SKIN_HEADER_SIZE];
    let expected = match reader.read_exact(&mut header) {
        Ok(()) => skin_file_size(&header, width, height),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => SKIN_HEADER_SIZE,
        Err(e) => return Err(io_error(e)),
    };
    if actual < expected {
        return Err(ResourceError::Truncated {
            path: path.to_owned(),
            expected,
            actual,
        });
    }
    reader.rewind().map_err(io_error)?;
    decode_skin(&mut reader, width, height).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // Builds a skin whose scanline i (in file order) is filled with value i.
    fn skin_bytes(palette_count: u8, width: usize, height: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; SKIN_HEADER_SIZE];
        bytes[SKIN_PALETTE_COUNT_OFFSET] = palette_count;
        let entries = if palette_count == 0 {
            256
        } else {
            palette_count as usize
        };
        // Fill the palette table with a marker that must never reach the output.
        bytes.extend(vec![0xEE; entries * SKIN_PALETTE_ENTRY_SIZE]);
        for i in 0..height {
            bytes.extend(vec![i as u8; width]);
        }
        bytes
    }

    #[test]
    fn zero_count_skips_full_palette_table() {
        let mut header = [0; SKIN_HEADER_SIZE];
        assert_eq!(pixel_data_offset(&header), 54 + 256 * 4);
        header[SKIN_PALETTE_COUNT_OFFSET] = 16;
        assert_eq!(pixel_data_offset(&header), 54 + 16 * 4);
    }

    #[test]
    fn scanlines_are_flipped_vertically() {
        let (w, h) = (8, 5);
        let bytes = skin_bytes(0, w, h);
        let pixels = decode_skin(&mut Cursor::new(bytes), w, h).unwrap();
        for row in 0..h {
            let expected = (h - 1 - row) as u8;
            assert!(pixels[row * w..(row + 1) * w].iter().all(|&p| p == expected));
        }
        assert!(!pixels.contains(&0xEE));
    }

    #[test]
    fn small_palette_table_is_honored() {
        let (w, h) = (4, 3);
        let bytes = skin_bytes(2, w, h);
        let pixels = decode_skin(&mut Cursor::new(bytes), w, h).unwrap();
        assert_eq!(&pixels[..w], &[2, 2, 2, 2]);
        assert_eq!(&pixels[2 * w..], &[0, 0, 0, 0]);
    }

    #[test]
    fn short_scanline_data_fails() {
        let (w, h) = (8, 5);
        let mut bytes = skin_bytes(0, w, h);
        bytes.truncate(bytes.len() - 3);
        let err = decode_skin(&mut Cursor::new(bytes), w, h).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn file_errors_map_to_resource_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKIN.DAT");
        assert!(matches!(
            load_skin(&path, 8, 5),
            Err(ResourceError::NotFound { .. })
        ));
        let mut bytes = skin_bytes(0, 8, 5);
        bytes.truncate(bytes.len() - 1);
        std::fs::write(&path, &bytes).unwrap();
        assert!(matches!(
            load_skin(&path, 8, 5),
            Err(ResourceError::Truncated {
                expected: 1118,
                actual: 1117,
                ..
            })
        ));
    }

    #[test]
    fn truncated_header_reports_header_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKIN.DAT");
        std::fs::write(&path, [0u8; 20]).unwrap();
        assert!(matches!(
            load_skin(&path, 8, 5),
            Err(ResourceError::Truncated {
                expected: SKIN_HEADER_SIZE,
                actual: 20,
                ..
            })
        ));
    }

    #[test]
    fn complete_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKIN.DAT");
        std::fs::write(&path, skin_bytes(3, 8, 5)).unwrap();
        let pixels = load_skin(&path, 8, 5).unwrap();
        assert_eq!(pixels.len(), 40);
        assert_eq!(&pixels[..8], &[4; 8]);
    }
}
