//! # Fingerprint Statement Builders
//!
//! Pure functions mapping typed arguments onto Fingerprint / Direct
//! Protocol statements. No I/O, no state: every builder returns the exact
//! statement text and is unit-tested against byte-for-byte expectations.

use crate::container::{Entry, NEWLINE};

/// `IMAGE LOAD` skip parameter: bytes of the line terminator the firmware
/// must discard beyond the payload. The container joins entries with a
/// single newline, so nothing extra precedes the payload.
const PAYLOAD_SKIP: usize = NEWLINE.len() - 1;

// ============================================================================
// POSITIONING STATEMENTS
// ============================================================================

/// # Print Position (PP)
///
/// Sets the insertion point for the next printable statement. Coordinates
/// are in dots from the bottom-left label corner.
pub fn position(horizontal_start: i32, vertical_start: i32) -> String {
    format!("PP {horizontal_start},{vertical_start}")
}

/// Print direction for subsequent statements, quarter turns
/// counted from left-to-right reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    TopToBottom,
    RightToLeft,
    BottomToTop,
}

impl Direction {
    /// `DIR` parameter.
    pub fn code(self) -> u8 {
        match self {
            Self::LeftToRight => 1,
            Self::TopToBottom => 2,
            Self::RightToLeft => 3,
            Self::BottomToTop => 4,
        }
    }

    /// Direction for a quarter-turn sector index 0-3.
    pub fn from_sector_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::LeftToRight,
            1 => Self::TopToBottom,
            2 => Self::RightToLeft,
            _ => Self::BottomToTop,
        }
    }
}

/// # Print Direction (DIR)
pub fn direction(direction: Direction) -> String {
    format!("DIR {}", direction.code())
}

/// Anchor point of a printable object relative to its insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    BaseLineLeft,
    BaseLineCentre,
    BaseLineRight,
    CentreLeft,
    Centre,
    CentreRight,
    TopLeft,
    TopCentre,
    TopRight,
}

impl Alignment {
    /// `AN` parameter.
    pub fn code(self) -> u8 {
        match self {
            Self::BaseLineLeft => 1,
            Self::BaseLineCentre => 2,
            Self::BaseLineRight => 3,
            Self::CentreLeft => 4,
            Self::Centre => 5,
            Self::CentreRight => 6,
            Self::TopLeft => 7,
            Self::TopCentre => 8,
            Self::TopRight => 9,
        }
    }
}

/// # Alignment (AN)
pub fn align(alignment: Alignment) -> String {
    format!("AN {}", alignment.code())
}

// ============================================================================
// DRAWING STATEMENTS
// ============================================================================

/// # Print Line (PL)
///
/// Fills `length × line_weight` dots from the insertion point along the
/// current direction. Doubles as the filled-box primitive.
pub fn line(length: i32, line_weight: i32) -> String {
    format!("PL {length},{line_weight}")
}

/// # Print Box (PX)
///
/// Draws a box outline. Height precedes width in the statement.
pub fn box_outline(width: i32, height: i32, line_weight: i32) -> String {
    format!("PX {height},{width},{line_weight}")
}

// ============================================================================
// TEXT STATEMENTS
// ============================================================================

/// # Font Selection (FT)
///
/// Selects a scalable font by name, size in dots, and slant in degrees.
pub fn font(name: &str, size: i32, slant: i32) -> String {
    format!("FT \"{name}\",{size},{slant}")
}

/// # Print Text (PT)
pub fn print_text(text: &str) -> String {
    format!("PT \"{text}\"")
}

/// # Invert Image Mode (INVIMAGE)
///
/// Subsequent printables render inverted, until [`normal_image`].
pub fn invert_image() -> String {
    "INVIMAGE".to_string()
}

/// # Normal Image Mode (NI)
pub fn normal_image() -> String {
    "NI".to_string()
}

// ============================================================================
// BARCODE STATEMENTS
// ============================================================================

/// Barcode symbologies with their Fingerprint type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarType {
    Code39,
    Code128,
    Ean13,
    Interleaved2Of5,
}

impl BarType {
    /// `BT` parameter.
    pub fn name(self) -> &'static str {
        match self {
            Self::Code39 => "CODE39",
            Self::Code128 => "CODE128",
            Self::Ean13 => "EAN13",
            Self::Interleaved2Of5 => "INT2OF5",
        }
    }
}

/// # Barcode Type (BT)
pub fn bar_type(bar_type: BarType) -> String {
    format!("BT \"{}\"", bar_type.name())
}

/// # Barcode Height (BH)
pub fn bar_height(height: i32) -> String {
    format!("BH {height}")
}

/// # Barcode Magnification (BM)
pub fn bar_magnification(magnification: i32) -> String {
    format!("BM {magnification}")
}

/// # Barcode Ratio (BR)
///
/// Wide-to-narrow element ratio for two-width symbologies.
pub fn bar_ratio(wide: i32, narrow: i32) -> String {
    format!("BR {wide},{narrow}")
}

/// # Print Barcode (PB)
///
/// Prints `data` in the currently selected symbology at the insertion
/// point.
pub fn print_barcode(data: &str) -> String {
    format!("PB \"{data}\"")
}

// ============================================================================
// IMAGE STATEMENTS
// ============================================================================

/// # Image Load (IMAGE LOAD)
///
/// Stores an image in printer memory. The payload (a 1-bpp PCX file)
/// follows the statement as raw bytes; the byte count in the statement is
/// exactly the payload size.
pub fn image_load(name: &str, data: Vec<u8>) -> Vec<Entry> {
    vec![
        Entry::Text(format!(
            "IMAGE LOAD {PAYLOAD_SKIP},\"{name}\",{},\"\"",
            data.len()
        )),
        Entry::Binary(data),
    ]
}

/// # Remove Image (REMOVE IMAGE)
pub fn remove_image(name: &str) -> String {
    format!("REMOVE IMAGE \"{name}\"")
}

/// # Print Image (PM)
///
/// Draws a previously loaded image at the insertion point.
pub fn print_image(name: &str) -> String {
    format!("PM \"{name}\"")
}

/// # Print Buffer (PRBUF)
///
/// Draws raw raster data at the insertion point without storing it. The
/// packed rows follow as `byte_count` raw bytes.
pub fn print_buffer(byte_count: usize) -> String {
    format!("PRBUF {byte_count}")
}

// ============================================================================
// JOB CONTROL STATEMENTS
// ============================================================================

/// Character sets selectable with `NASC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    Swedish,
    Latin1,
    Utf8,
}

impl CharacterSet {
    /// `NASC` parameter.
    pub fn code(self) -> u8 {
        match self {
            Self::Swedish => 1,
            Self::Latin1 => 7,
            Self::Utf8 => 8,
        }
    }
}

/// # Select Character Set (NASC)
pub fn select_character_set(character_set: CharacterSet) -> String {
    format!("NASC {}", character_set.code())
}

/// # Verbosity Off (VERBOFF)
///
/// Silences the firmware's "Ok" echoes so the reply channel stays clean.
pub fn verb_off() -> String {
    "VERBOFF".to_string()
}

/// # Input Off (INPUT OFF)
pub fn input_off() -> String {
    "INPUT OFF".to_string()
}

/// # Immediate Mode On (IMMEDIATE ON)
///
/// Statements execute as they arrive instead of being stored as a program.
pub fn immediate_on() -> String {
    "IMMEDIATE ON".to_string()
}

/// # Print Feed (PF)
///
/// Prints the accumulated label and feeds `copies` labels.
pub fn print_feed(copies: u16) -> String {
    format!("PF {copies}")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position() {
        assert_eq!(position(100, 250), "PP 100,250");
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(direction(Direction::LeftToRight), "DIR 1");
        assert_eq!(direction(Direction::BottomToTop), "DIR 4");
        assert_eq!(
            Direction::from_sector_index(2),
            Direction::RightToLeft
        );
    }

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::BaseLineLeft), "AN 1");
        assert_eq!(align(Alignment::TopRight), "AN 9");
    }

    #[test]
    fn test_line_and_box() {
        assert_eq!(line(100, 3), "PL 100,3");
        // height precedes width
        assert_eq!(box_outline(40, 60, 2), "PX 60,40,2");
    }

    #[test]
    fn test_font_and_text() {
        assert_eq!(font("Univers", 24, 0), "FT \"Univers\",24,0");
        assert_eq!(print_text("8.25"), "PT \"8.25\"");
    }

    #[test]
    fn test_barcode_statements() {
        assert_eq!(bar_type(BarType::Code128), "BT \"CODE128\"");
        assert_eq!(bar_height(80), "BH 80");
        assert_eq!(bar_magnification(2), "BM 2");
        assert_eq!(bar_ratio(3, 1), "BR 3,1");
        assert_eq!(print_barcode("4711"), "PB \"4711\"");
    }

    #[test]
    fn test_image_statements() {
        assert_eq!(
            image_load("12345678", vec![0x0A, 0x05]),
            vec![
                Entry::from("IMAGE LOAD 0,\"12345678\",2,\"\""),
                Entry::from(vec![0x0A, 0x05]),
            ]
        );
        assert_eq!(remove_image("12345678"), "REMOVE IMAGE \"12345678\"");
        assert_eq!(print_image("12345678"), "PM \"12345678\"");
        assert_eq!(print_buffer(64), "PRBUF 64");
    }

    #[test]
    fn test_job_control() {
        assert_eq!(select_character_set(CharacterSet::Utf8), "NASC 8");
        assert_eq!(print_feed(1), "PF 1");
        assert_eq!(verb_off(), "VERBOFF");
        assert_eq!(input_off(), "INPUT OFF");
        assert_eq!(immediate_on(), "IMMEDIATE ON");
    }
}
