//! # Raster Encoder
//!
//! Converts continuous-tone RGBA bitmaps into the monochrome, bit-packed,
//! row-major byte streams label printers consume.
//!
//! ## Bit Packing
//!
//! One bit per dot, 8 dots per byte, MSB first:
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! Rows are packed independently, each padded to a whole byte:
//! `bytes_per_row = ceil(width / 8)`. Padding columns are background.
//!
//! ## Ink Classification
//!
//! A pixel is ink when its alpha exceeds 0x32 and its color is not bright
//! (any of R, G, B at or below 0x96). Transparent and near-white pixels
//! are background.
//!
//! ## Polarity
//!
//! With `invert = false`, ink = 1 (ZPL `^GF` convention). With
//! `invert = true`, every byte is flipped so ink = 0 (EPL `GW` prints
//! where bits are clear).

use image::{Rgba, RgbaImage, imageops};

use crate::transform::RotationSector;

/// Alpha above this is opaque enough to print.
const ALPHA_THRESHOLD: u8 = 0x32;

/// R, G and B all above this count as bright (background).
const BRIGHTNESS_THRESHOLD: u8 = 0x96;

/// Packed monochrome bitmap, row-major, MSB-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monochrome {
    pub data: Vec<u8>,
    pub bytes_per_row: usize,
    pub width: u32,
    pub height: u32,
}

/// Classify one pixel as ink or background.
#[inline]
pub fn is_ink(pixel: Rgba<u8>) -> bool {
    let Rgba([r, g, b, a]) = pixel;
    let bright = r > BRIGHTNESS_THRESHOLD && g > BRIGHTNESS_THRESHOLD && b > BRIGHTNESS_THRESHOLD;
    a > ALPHA_THRESHOLD && !bright
}

/// Encode a bitmap into a packed monochrome byte stream.
///
/// Pure: identical pixels always produce identical bytes.
pub fn encode(image: &RgbaImage, invert: bool) -> Monochrome {
    let width = image.width();
    let height = image.height();
    let bytes_per_row = (width as usize).div_ceil(8);

    let mut data = Vec::with_capacity(bytes_per_row * height as usize);
    for y in 0..height {
        for octet in 0..bytes_per_row {
            let mut value = 0u8;
            for bit in 0..8 {
                let x = (octet * 8 + bit) as u32;
                if x < width && is_ink(*image.get_pixel(x, y)) {
                    value |= 1 << (7 - bit);
                }
            }
            data.push(if invert { !value } else { value });
        }
    }

    Monochrome {
        data,
        bytes_per_row,
        width,
        height,
    }
}

/// Extend the canvas rightward so the width is a multiple of 8 columns.
///
/// The added columns are transparent (background). No scaling happens;
/// stored-graphic container formats require octet-aligned source widths.
pub fn pad_width_to_octet(image: &RgbaImage) -> RgbaImage {
    let remainder = image.width() % 8;
    if remainder == 0 {
        return image.clone();
    }

    let padded_width = image.width() + 8 - remainder;
    let mut padded = RgbaImage::new(padded_width, image.height());
    imageops::overlay(&mut padded, image, 0, 0);
    padded
}

/// Resize to the device-aligned dimensions, then rotate by the sector.
///
/// Mirrors the translation order of the drawing commands: the placement
/// coordinates come from the matrix, the pixels themselves are rotated
/// here before encoding.
pub fn align(image: &RgbaImage, width: u32, height: u32, sector: RotationSector) -> RgbaImage {
    let resized = imageops::resize(image, width, height, imageops::FilterType::Triangle);
    match sector {
        RotationSector::R0 => resized,
        RotationSector::R90 => imageops::rotate90(&resized),
        RotationSector::R180 => imageops::rotate180(&resized),
        RotationSector::R270 => imageops::rotate270(&resized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, CLEAR)
    }

    #[test]
    fn test_ink_classification() {
        assert!(is_ink(Rgba([0, 0, 0, 255])));
        assert!(is_ink(Rgba([200, 0, 0, 255]))); // dark enough on one channel
        assert!(!is_ink(Rgba([0, 0, 0, 0x32]))); // transparent
        assert!(!is_ink(Rgba([255, 255, 255, 255]))); // bright
        assert!(!is_ink(Rgba([0x97, 0x97, 0x97, 255]))); // just past brightness
        assert!(is_ink(Rgba([0x96, 0x96, 0x96, 255]))); // at threshold: not bright
    }

    #[test]
    fn test_bytes_per_row() {
        for (width, expected) in [(1, 1), (8, 1), (9, 2), (16, 2), (17, 3)] {
            let mono = encode(&blank(width, 1), false);
            assert_eq!(mono.bytes_per_row, expected, "width {width}");
        }
    }

    #[test]
    fn test_msb_first_packing() {
        let mut image = blank(8, 1);
        image.put_pixel(0, 0, INK);
        image.put_pixel(2, 0, INK);
        let mono = encode(&image, false);
        assert_eq!(mono.data, vec![0b1010_0000]);
    }

    #[test]
    fn test_row_padding_is_background() {
        let mut image = blank(10, 2);
        image.put_pixel(9, 1, INK);
        let mono = encode(&image, false);
        // row 0 empty, row 1 has bit for column 9 (second byte, bit 6)
        assert_eq!(mono.data, vec![0x00, 0x00, 0x00, 0b0100_0000]);
    }

    #[test]
    fn test_single_pixel_flips_single_bit() {
        let base = encode(&blank(21, 3), false);
        for y in 0..3 {
            for x in 0..21 {
                let mut image = blank(21, 3);
                image.put_pixel(x, y, INK);
                let mono = encode(&image, false);
                let differing: u32 = base
                    .data
                    .iter()
                    .zip(&mono.data)
                    .map(|(a, b)| (a ^ b).count_ones())
                    .sum();
                assert_eq!(differing, 1, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_invert_flips_every_byte() {
        let mut image = blank(8, 1);
        image.put_pixel(0, 0, INK);
        let normal = encode(&image, false);
        let inverted = encode(&image, true);
        assert_eq!(normal.data[0], !inverted.data[0]);
    }

    #[test]
    fn test_pad_width_to_octet() {
        let image = RgbaImage::from_pixel(10, 4, INK);
        let padded = pad_width_to_octet(&image);
        assert_eq!(padded.width(), 16);
        assert_eq!(padded.height(), 4);
        assert!(is_ink(*padded.get_pixel(9, 0)));
        assert!(!is_ink(*padded.get_pixel(10, 0))); // padding is background
    }

    #[test]
    fn test_pad_width_aligned_is_unchanged() {
        let image = RgbaImage::from_pixel(16, 2, INK);
        let padded = pad_width_to_octet(&image);
        assert_eq!(padded, image);
    }

    #[test]
    fn test_align_rotates_dimensions() {
        let image = blank(4, 2);
        let rotated = align(&image, 4, 2, RotationSector::R90);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
        let upright = align(&image, 4, 2, RotationSector::R180);
        assert_eq!((upright.width(), upright.height()), (4, 2));
    }
}
