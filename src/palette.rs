// Stored (6-bit) palette and its display (8-bit) conversion.
use itertools::Itertools;

use crate::{
    common::{ColorIdx, ColorRGB, ColorValue},
    helpers::scale_rgb,
};

pub const PALETTE_SIZE: usize = 256;
pub const PALETTE_FILE_SIZE: usize = PALETTE_SIZE * 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub red: ColorValue,
    pub green: ColorValue,
    pub blue: ColorValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub entries: [PaletteEntry; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            entries: [PaletteEntry::default(); PALETTE_SIZE],
        }
    }
}

impl Palette {
    /// Builds a palette from the first 768 bytes of `bytes` (R, G, B triples).
    /// Returns `None` when fewer bytes are available.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < PALETTE_FILE_SIZE {
            return None;
        }
        let mut pal = Palette::default();
        for (entry, (&red, &green, &blue)) in pal
            .entries
            .iter_mut()
            .zip(bytes[..PALETTE_FILE_SIZE].iter().tuples())
        {
            *entry = PaletteEntry { red, green, blue };
        }
        Some(pal)
    }

    pub fn to_display(&self) -> DisplayPalette {
        let mut colors = [[0; 3]; PALETTE_SIZE];
        for (out, e) in colors.iter_mut().zip(self.entries.iter()) {
            *out = scale_rgb([e.red, e.green, e.blue]);
        }
        DisplayPalette { colors }
    }
}

/// Palette in display form, ready to resolve framebuffer indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayPalette {
    pub colors: [ColorRGB; PALETTE_SIZE],
}

impl Default for DisplayPalette {
    fn default() -> Self {
        Palette::default().to_display()
    }
}

impl DisplayPalette {
    pub fn color(&self, idx: ColorIdx) -> ColorRGB {
        self.colors[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_bytes() -> Vec<u8> {
        (0..PALETTE_FILE_SIZE).map(|i| (i % 64) as u8).collect()
    }

    #[test]
    fn parses_exactly_256_entries_in_order() {
        let pal = Palette::from_bytes(&ramp_bytes()).unwrap();
        assert_eq!(pal.entries.len(), 256);
        assert_eq!(
            pal.entries[1],
            PaletteEntry {
                red: 3,
                green: 4,
                blue: 5
            }
        );
        assert_eq!(pal.entries[255].blue, (767 % 64) as u8);
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(Palette::from_bytes(&[0; PALETTE_FILE_SIZE - 1]).is_none());
    }

    #[test]
    fn display_conversion_multiplies_every_channel_by_four() {
        let pal = Palette::from_bytes(&ramp_bytes()).unwrap();
        let display = pal.to_display();
        for (e, c) in pal.entries.iter().zip(display.colors.iter()) {
            assert_eq!(*c, [e.red * 4, e.green * 4, e.blue * 4]);
        }
    }

    #[test]
    fn index_zero_is_not_special_cased() {
        let mut bytes = vec![0; PALETTE_FILE_SIZE];
        bytes[0..3].copy_from_slice(&[63, 10, 1]);
        let display = Palette::from_bytes(&bytes).unwrap().to_display();
        assert_eq!(display.color(0), [252, 40, 4]);
    }
}
