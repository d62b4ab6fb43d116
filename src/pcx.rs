//! # 1-bpp PCX Writer
//!
//! Minimal ZSoft PCX container for stored label graphics. EPL2 `GM` and
//! Fingerprint `IMAGE LOAD` uploads carry 1-bit PCX payloads rather than
//! bare raster bytes.
//!
//! ## File Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Manufacturer (0x0A) |
//! | 1 | 1 | Version (5) |
//! | 2 | 1 | Encoding (1 = RLE) |
//! | 3 | 1 | Bits per pixel per plane (1) |
//! | 4 | 8 | Window: xmin, ymin, xmax, ymax (u16 LE) |
//! | 12 | 4 | Horizontal/vertical DPI (u16 LE) |
//! | 16 | 48 | EGA palette (entry 0 black, entry 1 white) |
//! | 65 | 1 | Number of planes (1) |
//! | 66 | 2 | Bytes per scanline (u16 LE, even) |
//! | 68 | 2 | Palette info (1 = color/mono) |
//! | 70 | 58 | Filler |
//!
//! ## RLE
//!
//! Runs of up to 63 identical bytes become `0xC0 | count` followed by the
//! value. A single byte ≥ 0xC0 must also be run-encoded (count 1) so it
//! is not mistaken for a run marker. Rows are encoded independently.
//!
//! ## Polarity
//!
//! PCX bit 1 is palette entry 1 (white). Encode with ink = 0, the inverse
//! of the inline raster convention — pass the already-inverted monochrome
//! data in.

use crate::error::EtiquetaError;
use crate::raster::Monochrome;

const HEADER_LEN: usize = 128;
const MAX_RUN: usize = 63;

/// Resolution stamped into the header. Informational only; label firmware
/// ignores it.
const HEADER_DPI: u16 = 203;

/// Wrap packed 1-bpp rows in a PCX container.
///
/// The source width must be octet-aligned (see
/// [`crate::raster::pad_width_to_octet`]): PCX scanlines have no partial
/// bytes and an even bytes-per-line, so unpadded widths would shift rows.
pub fn encode_1bpp(mono: &Monochrome) -> Result<Vec<u8>, EtiquetaError> {
    if mono.width % 8 != 0 {
        return Err(EtiquetaError::Image(format!(
            "PCX source width {} is not a multiple of 8",
            mono.width
        )));
    }
    if mono.width == 0 || mono.height == 0 {
        return Err(EtiquetaError::Image("PCX source is empty".to_string()));
    }

    // scanlines are padded to an even byte count
    let bytes_per_line = mono.bytes_per_row + mono.bytes_per_row % 2;

    let mut output = Vec::with_capacity(HEADER_LEN + mono.data.len());
    write_header(&mut output, mono.width, mono.height, bytes_per_line);

    let mut row = vec![0u8; bytes_per_line];
    for chunk in mono.data.chunks_exact(mono.bytes_per_row) {
        row[..mono.bytes_per_row].copy_from_slice(chunk);
        for padding in &mut row[mono.bytes_per_row..] {
            *padding = 0;
        }
        encode_row(&mut output, &row);
    }

    Ok(output)
}

fn write_header(output: &mut Vec<u8>, width: u32, height: u32, bytes_per_line: usize) {
    let mut header = [0u8; HEADER_LEN];
    header[0] = 0x0A; // manufacturer
    header[1] = 5; // version
    header[2] = 1; // RLE
    header[3] = 1; // bits per pixel
    header[4..6].copy_from_slice(&0u16.to_le_bytes()); // xmin
    header[6..8].copy_from_slice(&0u16.to_le_bytes()); // ymin
    header[8..10].copy_from_slice(&((width - 1) as u16).to_le_bytes()); // xmax
    header[10..12].copy_from_slice(&((height - 1) as u16).to_le_bytes()); // ymax
    header[12..14].copy_from_slice(&HEADER_DPI.to_le_bytes());
    header[14..16].copy_from_slice(&HEADER_DPI.to_le_bytes());
    // palette entry 0 = black (already zero), entry 1 = white
    header[19] = 0xFF;
    header[20] = 0xFF;
    header[21] = 0xFF;
    header[65] = 1; // planes
    header[66..68].copy_from_slice(&(bytes_per_line as u16).to_le_bytes());
    header[68..70].copy_from_slice(&1u16.to_le_bytes()); // palette info
    output.extend_from_slice(&header);
}

/// RLE-encode one padded scanline.
fn encode_row(output: &mut Vec<u8>, row: &[u8]) {
    let mut index = 0;
    while index < row.len() {
        let value = row[index];
        let mut run = 1;
        while run < MAX_RUN && index + run < row.len() && row[index + run] == value {
            run += 1;
        }

        if run > 1 || value >= 0xC0 {
            output.push(0xC0 | run as u8);
        }
        output.push(value);
        index += run;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mono(width: u32, height: u32, data: Vec<u8>) -> Monochrome {
        Monochrome {
            bytes_per_row: (width as usize).div_ceil(8),
            data,
            width,
            height,
        }
    }

    #[test]
    fn test_header_fields() {
        let pcx = encode_1bpp(&mono(16, 2, vec![0u8; 4])).unwrap();
        assert_eq!(pcx[0], 0x0A);
        assert_eq!(pcx[1], 5);
        assert_eq!(pcx[2], 1);
        assert_eq!(pcx[3], 1);
        assert_eq!(&pcx[8..10], &15u16.to_le_bytes()); // xmax = width - 1
        assert_eq!(&pcx[10..12], &1u16.to_le_bytes()); // ymax = height - 1
        assert_eq!(pcx[65], 1);
        assert_eq!(&pcx[66..68], &2u16.to_le_bytes()); // bytes per line
    }

    #[test]
    fn test_rle_run() {
        // one 16-wide row of 0xFF 0xFF packs to a run of 2
        let pcx = encode_1bpp(&mono(16, 1, vec![0xFF, 0xFF])).unwrap();
        assert_eq!(&pcx[HEADER_LEN..], &[0xC0 | 2, 0xFF]);
    }

    #[test]
    fn test_rle_literal_below_run_marker() {
        let pcx = encode_1bpp(&mono(16, 1, vec![0x0F, 0x70])).unwrap();
        assert_eq!(&pcx[HEADER_LEN..], &[0x0F, 0x70]);
    }

    #[test]
    fn test_rle_escapes_high_bytes() {
        // 0xC5 alone must still be run-encoded
        let pcx = encode_1bpp(&mono(16, 1, vec![0xC5, 0x00])).unwrap();
        assert_eq!(&pcx[HEADER_LEN..], &[0xC0 | 1, 0xC5, 0x00]);
    }

    #[test]
    fn test_odd_bytes_per_row_padded_even() {
        // 24 dots = 3 bytes per row, scanline padded to 4
        let pcx = encode_1bpp(&mono(24, 1, vec![0xAA, 0xAA, 0xAA])).unwrap();
        assert_eq!(&pcx[66..68], &4u16.to_le_bytes());
        assert_eq!(&pcx[HEADER_LEN..], &[0xC0 | 3, 0xAA, 0x00]);
    }

    #[test]
    fn test_rows_encoded_independently() {
        // equal bytes across a row boundary must not merge into one run
        let pcx = encode_1bpp(&mono(16, 2, vec![0xFF, 0xFF, 0xFF, 0xFF])).unwrap();
        assert_eq!(&pcx[HEADER_LEN..], &[0xC0 | 2, 0xFF, 0xC0 | 2, 0xFF]);
    }

    #[test]
    fn test_unaligned_width_rejected() {
        let result = encode_1bpp(&mono(10, 1, vec![0x00, 0x00]));
        assert!(matches!(result, Err(EtiquetaError::Image(_))));
    }
}
