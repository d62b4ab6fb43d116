//! # ZPL II Command Builders
//!
//! Pure functions mapping typed arguments onto ZPL II command strings.
//! No I/O, no state: every builder returns the exact token stream and is
//! unit-tested against byte-for-byte expectations.

use crate::raster::Monochrome;

// ============================================================================
// FIELD POSITIONING
// ============================================================================

/// # Field Origin (^FO)
///
/// Positions the next field by its top-left corner.
pub fn field_origin(horizontal_start: i32, vertical_start: i32) -> String {
    format!("^FO{horizontal_start},{vertical_start}")
}

/// # Field Typeset (^FT)
///
/// Positions the next field by its baseline, the natural anchor for text.
pub fn field_typeset(horizontal_start: i32, vertical_start: i32) -> String {
    format!("^FT{horizontal_start},{vertical_start}")
}

/// # Field Reverse Print (^FR)
///
/// The next field prints white-on-black instead of black-on-white.
pub fn field_reverse() -> String {
    "^FR".to_string()
}

// ============================================================================
// DRAWING COMMANDS
// ============================================================================

/// Line/border paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Black,
    White,
}

impl LineColor {
    fn code(self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }
}

/// # Graphic Box (^GB)
///
/// Draws a box outline of the given border thickness. A thickness at
/// least half the smaller dimension fills the box solid.
///
/// ```
/// use etiqueta::zpl::commands::{self, LineColor};
///
/// assert_eq!(commands::graphic_box(100, 50, 3, LineColor::Black), "^GB100,50,3,B^FS");
/// ```
pub fn graphic_box(width: i32, height: i32, border_thickness: i32, color: LineColor) -> String {
    format!("^GB{width},{height},{border_thickness},{}^FS", color.code())
}

// ============================================================================
// TEXT COMMANDS
// ============================================================================

/// Field rotation, clockwise from the normal reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrientation {
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
}

impl FieldOrientation {
    /// `^A` orientation field.
    pub fn code(self) -> char {
        match self {
            Self::Normal => 'N',
            Self::Rotated90 => 'R',
            Self::Rotated180 => 'I',
            Self::Rotated270 => 'B',
        }
    }

    /// Orientation for a quarter-turn sector index 0-3.
    pub fn from_sector_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::Normal,
            1 => Self::Rotated90,
            2 => Self::Rotated180,
            _ => Self::Rotated270,
        }
    }
}

/// # Scalable Font Field (^A0 + ^FD)
///
/// Renders `text` in the built-in scalable font at the given character
/// height. Width 0 lets the firmware derive it from the height.
///
/// ```
/// use etiqueta::zpl::commands::{self, FieldOrientation};
///
/// let cmd = commands::font_field(FieldOrientation::Normal, 34, "8.25");
/// assert_eq!(cmd, "^A0N,34,0^FD8.25^FS");
/// ```
pub fn font_field(orientation: FieldOrientation, character_height: i32, text: &str) -> String {
    format!(
        "^A0{},{character_height},0^FD{text}^FS",
        orientation.code()
    )
}

// ============================================================================
// GRAPHIC COMMANDS
// ============================================================================

/// # Graphic Field (^GF)
///
/// Inline raster data in ASCII hex form. Total and per-row byte counts
/// come straight from the packed bitmap.
pub fn graphic_field(mono: &Monochrome) -> String {
    let total = mono.data.len();
    format!(
        "^GFA,{total},{total},{},{}^FS",
        mono.bytes_per_row,
        hex(&mono.data)
    )
}

/// # Download Graphics (~DG)
///
/// Stores a raster under `R:<name>.GRF` in printer memory. Issued outside
/// the `^XA`..`^XZ` format block; a later download under the same name
/// overwrites the stored image.
pub fn download_graphics(name: &str, mono: &Monochrome) -> String {
    format!(
        "~DGR:{name}.GRF,{},{},{}",
        mono.data.len(),
        mono.bytes_per_row,
        hex(&mono.data)
    )
}

/// # Recall Graphic (^XG)
///
/// Draws a previously downloaded graphic at the current field position,
/// unmagnified.
pub fn recall_graphic(name: &str) -> String {
    format!("^XGR:{name}.GRF,1,1^FS")
}

fn hex(data: &[u8]) -> String {
    use std::fmt::Write;

    let mut encoded = String::with_capacity(data.len() * 2);
    for byte in data {
        // infallible for String
        let _ = write!(encoded, "{byte:02X}");
    }
    encoded
}

// ============================================================================
// JOB CONTROL COMMANDS
// ============================================================================

/// # Start Format (^XA)
pub fn start_format() -> String {
    "^XA".to_string()
}

/// # End Format (^XZ)
pub fn end_format() -> String {
    "^XZ".to_string()
}

/// # Label Home (^LH)
pub fn label_home(horizontal_start: i32, vertical_start: i32) -> String {
    format!("^LH{horizontal_start},{vertical_start}")
}

/// # Print Quantity (^PQ)
pub fn print_quantity(copies: u16) -> String {
    format!("^PQ{copies}")
}

/// Label orientation relative to the feed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOrientation {
    Normal,
    Inverted,
}

/// # Print Orientation (^PO)
pub fn print_orientation(orientation: PrintOrientation) -> String {
    let code = match orientation {
        PrintOrientation::Normal => 'N',
        PrintOrientation::Inverted => 'I',
    };
    format!("^PO{code}")
}

/// Encodings selectable with `^CI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    Usa1,
    Windows1252,
    Utf8,
    Utf16BigEndian,
    Utf16LittleEndian,
}

impl CharacterSet {
    /// `^CI` identifier.
    pub fn code(self) -> u8 {
        match self {
            Self::Usa1 => 0,
            Self::Windows1252 => 27,
            Self::Utf8 => 28,
            Self::Utf16BigEndian => 29,
            Self::Utf16LittleEndian => 30,
        }
    }
}

/// # Change International Font (^CI)
pub fn change_international_font(character_set: CharacterSet) -> String {
    format!("^CI{}", character_set.code())
}

// ============================================================================
// TESTS
// ============================================================================

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
    fn test_field_origin() {
        assert_eq!(field_origin(10, 20), "^FO10,20");
    }

    #[test]
    fn test_field_typeset() {
        assert_eq!(field_typeset(100, 200), "^FT100,200");
    }

    #[test]
    fn test_graphic_box() {
        assert_eq!(graphic_box(100, 50, 3, LineColor::Black), "^GB100,50,3,B^FS");
        assert_eq!(graphic_box(80, 80, 80, LineColor::White), "^GB80,80,80,W^FS");
    }

    #[test]
    fn test_font_field_orientations() {
        assert_eq!(
            font_field(FieldOrientation::Normal, 34, "hello"),
            "^A0N,34,0^FDhello^FS"
        );
        assert_eq!(
            font_field(FieldOrientation::Rotated90, 34, "hello"),
            "^A0R,34,0^FDhello^FS"
        );
        assert_eq!(
            font_field(FieldOrientation::Rotated180, 34, "hello"),
            "^A0I,34,0^FDhello^FS"
        );
        assert_eq!(
            font_field(FieldOrientation::Rotated270, 34, "hello"),
            "^A0B,34,0^FDhello^FS"
        );
    }

    #[test]
    fn test_orientation_from_sector() {
        assert_eq!(
            FieldOrientation::from_sector_index(0),
            FieldOrientation::Normal
        );
        assert_eq!(
            FieldOrientation::from_sector_index(3),
            FieldOrientation::Rotated270
        );
    }

    #[test]
    fn test_graphic_field_is_hex() {
        let cmd = graphic_field(&mono(16, 2, vec![0xFF, 0x00, 0xAB, 0xCD]));
        assert_eq!(cmd, "^GFA,4,4,2,FF00ABCD^FS");
    }

    #[test]
    fn test_download_graphics() {
        let cmd = download_graphics("12345678", &mono(8, 2, vec![0x0F, 0xF0]));
        assert_eq!(cmd, "~DGR:12345678.GRF,2,1,0FF0");
    }

    #[test]
    fn test_recall_graphic() {
        assert_eq!(recall_graphic("12345678"), "^XGR:12345678.GRF,1,1^FS");
    }

    #[test]
    fn test_job_control() {
        assert_eq!(start_format(), "^XA");
        assert_eq!(end_format(), "^XZ");
        assert_eq!(label_home(0, 0), "^LH0,0");
        assert_eq!(print_quantity(3), "^PQ3");
        assert_eq!(print_orientation(PrintOrientation::Normal), "^PON");
        assert_eq!(print_orientation(PrintOrientation::Inverted), "^POI");
        assert_eq!(
            change_international_font(CharacterSet::Utf8),
            "^CI28"
        );
    }
}
