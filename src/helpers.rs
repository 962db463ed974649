use crate::common::{ColorRGB, ColorValue};

/// Stored channels are 6-bit; display channels are 8-bit.
pub fn scale_color(c: ColorValue) -> u8 {
    c.wrapping_mul(4)
}

pub fn scale_rgb(c: [ColorValue; 3]) -> ColorRGB {
    [scale_color(c[0]), scale_color(c[1]), scale_color(c[2])]
}

/// Formats a tool version number the way the banner shows it, e.g. 15 -> "V1.5".
pub fn version_string(v: i32) -> String {
    format!("V{}.{}", v / 10, v % 10)
}

pub fn blocks_to_pixels(b: usize) -> usize {
    b * crate::common::BLOCK_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_color_is_exact_multiple_of_four() {
        for v in 0..=63u8 {
            assert_eq!(scale_color(v) as u16, v as u16 * 4);
        }
        assert_eq!(scale_color(63), 252);
    }

    #[test]
    fn scale_color_is_strictly_monotonic() {
        let scaled: Vec<u8> = (0..=63u8).map(scale_color).collect();
        assert!(scaled.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn version_string_splits_digits() {
        assert_eq!(version_string(20), "V2.0");
        assert_eq!(version_string(15), "V1.5");
        assert_eq!(version_string(3), "V0.3");
    }
}
