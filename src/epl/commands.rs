//! # EPL2 Command Builders
//!
//! Pure functions from already-transformed integer device coordinates to
//! EPL2 command tokens. No geometry or font logic lives here — that is
//! strictly upstream in the transform engine and font matcher.
//!
//! ## Token Format
//!
//! EPL2 commands are single ASCII lines. Commands carrying raw data
//! (`GW`, `GM`) return the token plus a [`Entry::Binary`] payload entry.
//!
//! ## Reference
//!
//! "EPL2 Programming Manual" (Zebra Technologies, 14245L-002).

use crate::container::Entry;

// ============================================================================
// GRAPHICS COMMANDS
// ============================================================================

/// # Direct Graphic Write (GW)
///
/// Writes packed raster rows straight into the image buffer.
///
/// ## Format
///
/// ```text
/// GW<h>,<v>,<bytesPerRow>,<rows>
/// <raw packed data>
/// ```
///
/// Bit polarity is inverted relative to most protocols: a **clear** bit
/// (0) prints black, a set bit leaves the dot blank. Encode with
/// `raster::encode(image, true)`.
pub fn graphic_direct_write(
    horizontal_start: i32,
    vertical_start: i32,
    bytes_per_row: usize,
    rows: u32,
    data: Vec<u8>,
) -> Vec<Entry> {
    vec![
        Entry::Text(format!(
            "GW{horizontal_start},{vertical_start},{bytes_per_row},{rows}"
        )),
        Entry::Binary(data),
    ]
}

/// # Delete Stored Graphic (GK)
///
/// Removes a named graphic from printer memory. Deleting a name that does
/// not exist is harmless, so this always precedes a store.
///
/// ```
/// use etiqueta::epl::commands;
///
/// assert_eq!(commands::delete_graphics("LOGO"), "GK\"LOGO\"");
/// ```
pub fn delete_graphics(name: &str) -> String {
    format!("GK\"{name}\"")
}

/// # Store Graphic (GM)
///
/// Uploads a named graphic into printer memory. The payload is a 1-bpp
/// PCX file; `byte_length` is its exact size.
///
/// ## Format
///
/// ```text
/// GM"<name>"<byteLength>
/// <PCX payload>
/// ```
pub fn store_graphics(name: &str, data: Vec<u8>) -> Vec<Entry> {
    vec![
        Entry::Text(format!("GM\"{name}\"{}", data.len())),
        Entry::Binary(data),
    ]
}

/// # Print Stored Graphic (GG)
///
/// Draws a previously stored graphic at the given position.
///
/// ```
/// use etiqueta::epl::commands;
///
/// assert_eq!(commands::print_graphics(10, 20, "LOGO"), "GG10,20,\"LOGO\"");
/// ```
pub fn print_graphics(horizontal_start: i32, vertical_start: i32, name: &str) -> String {
    format!("GG{horizontal_start},{vertical_start},\"{name}\"")
}

// ============================================================================
// LINE AND BOX COMMANDS
// ============================================================================

/// # Draw Black Line / Filled Box (LO)
///
/// Fills the given extent with black. Lengths, not end coordinates.
pub fn line_draw_black(
    horizontal_start: i32,
    vertical_start: i32,
    horizontal_length: i32,
    vertical_length: i32,
) -> String {
    format!("LO{horizontal_start},{vertical_start},{horizontal_length},{vertical_length}")
}

/// # Draw White Line / Erase Box (LW)
///
/// Same extent semantics as [`line_draw_black`], printing white — used to
/// knock content out of an already-black area.
pub fn line_draw_white(
    horizontal_start: i32,
    vertical_start: i32,
    horizontal_length: i32,
    vertical_length: i32,
) -> String {
    format!("LW{horizontal_start},{vertical_start},{horizontal_length},{vertical_length}")
}

/// # Draw Diagonal Line (LS)
///
/// Draws from `(h_start, v_start)` to `(h_end, v_end)` with the given
/// thickness.
pub fn line_draw_diagonal(
    horizontal_start: i32,
    vertical_start: i32,
    line_thickness: i32,
    horizontal_end: i32,
    vertical_end: i32,
) -> String {
    format!(
        "LS{horizontal_start},{vertical_start},{line_thickness},{horizontal_end},{vertical_end}"
    )
}

/// # Draw Box Outline (X)
///
/// Outline with the given edge thickness, corner to corner.
///
/// ```
/// use etiqueta::epl::commands;
///
/// assert_eq!(commands::draw_box(0, 0, 2, 100, 50), "X0,0,2,100,50");
/// ```
pub fn draw_box(
    horizontal_start: i32,
    vertical_start: i32,
    line_thickness: i32,
    horizontal_end: i32,
    vertical_end: i32,
) -> String {
    format!(
        "X{horizontal_start},{vertical_start},{line_thickness},{horizontal_end},{vertical_end}"
    )
}

// ============================================================================
// TEXT COMMAND
// ============================================================================

/// # ASCII Text (A)
///
/// ## Format
///
/// ```text
/// A<h>,<v>,<rotation 0-3>,<fontId>,<hMult>,<vMult>,<N|R>,"<text>"
/// ```
///
/// `rotation` is the quarter-turn sector index. `R` prints reverse video
/// (white on black); `N` is normal. The caller must already have stripped
/// characters illegal inside the quoting syntax.
#[allow(clippy::too_many_arguments)]
pub fn ascii_text(
    horizontal_start: i32,
    vertical_start: i32,
    rotation: u8,
    font_selection: &str,
    horizontal_multiplier: i32,
    vertical_multiplier: i32,
    reverse: bool,
    text: &str,
) -> String {
    let reverse_image = if reverse { "R" } else { "N" };
    format!(
        "A{horizontal_start},{vertical_start},{rotation},{font_selection},\
         {horizontal_multiplier},{vertical_multiplier},{reverse_image},\"{text}\""
    )
}

// ============================================================================
// BARCODE COMMAND
// ============================================================================

/// Barcode symbologies with their EPL2 selection codes.
///
/// Closed set: every variant has a wire mapping, so an "unmapped
/// symbology" state cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeSelection {
    Code39,
    Code93,
    Code128Auto,
    Code128A,
    Code128B,
    Code128C,
    Interleaved2Of5,
    UccEan128,
}

impl BarcodeSelection {
    /// EPL2 `B` command selection field.
    pub fn code(self) -> &'static str {
        match self {
            Self::Code39 => "3",
            Self::Code93 => "9",
            Self::Code128Auto => "1",
            Self::Code128A => "1A",
            Self::Code128B => "1B",
            Self::Code128C => "1C",
            Self::Interleaved2Of5 => "2",
            Self::UccEan128 => "1E",
        }
    }
}

/// # Barcode (B)
///
/// ## Format
///
/// ```text
/// B<h>,<v>,<rotation>,<selection>,<narrow>,<wide>,<height>,<B|N>,"<content>"
/// ```
///
/// `B` prints the human-readable line under the bars, `N` suppresses it.
#[allow(clippy::too_many_arguments)]
pub fn barcode(
    horizontal_start: i32,
    vertical_start: i32,
    rotation: u8,
    selection: BarcodeSelection,
    narrow_bar_width: i32,
    wide_bar_width: i32,
    height: i32,
    human_readable: bool,
    content: &str,
) -> String {
    let readable = if human_readable { "B" } else { "N" };
    format!(
        "B{horizontal_start},{vertical_start},{rotation},{},{narrow_bar_width},\
         {wide_bar_width},{height},{readable},\"{content}\"",
        selection.code()
    )
}

// ============================================================================
// JOB CONTROL COMMANDS
// ============================================================================

/// Media loading orientation for the `Z` print-direction command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOrientation {
    /// Print from the top of the image buffer.
    Top,
    /// Print from the bottom of the image buffer.
    Bottom,
}

/// # Reference Point (R)
///
/// Moves the label origin; subsequent coordinates are relative to it.
pub fn set_reference_point(horizontal_start: i32, vertical_start: i32) -> String {
    format!("R{horizontal_start},{vertical_start}")
}

/// # Print Direction (Z)
pub fn print_direction(orientation: PrintOrientation) -> String {
    let code = match orientation {
        PrintOrientation::Top => "T",
        PrintOrientation::Bottom => "B",
    };
    format!("Z{code}")
}

/// # Print (P)
///
/// Prints the accumulated label. Emits a trailing blank entry because the
/// firmware wants a bare newline after `P` to commit the job.
pub fn print(copies: u16) -> Vec<Entry> {
    vec![Entry::Text(format!("P{copies}")), Entry::Text(String::new())]
}

// ============================================================================
// CHARACTER SET COMMAND
// ============================================================================

/// Printer codepages with their EPL2 `I` command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterCodepage {
    Dos347,
    Dos850,
    Dos852,
    Dos860,
    Dos863,
    Dos865,
    Dos857,
    Dos861,
    Dos862,
    Dos855,
    Dos866,
    Dos737,
    Dos851,
    Dos869,
    Windows1252,
    Windows1250,
    Windows1251,
    Windows1253,
    Windows1254,
    Windows1255,
}

impl PrinterCodepage {
    /// EPL2 `I` command codepage field.
    pub fn code(self) -> &'static str {
        match self {
            Self::Dos347 => "0",
            Self::Dos850 => "1",
            Self::Dos852 => "2",
            Self::Dos860 => "3",
            Self::Dos863 => "4",
            Self::Dos865 => "5",
            Self::Dos857 => "6",
            Self::Dos861 => "7",
            Self::Dos862 => "8",
            Self::Dos855 => "9",
            Self::Dos866 => "10",
            Self::Dos737 => "11",
            Self::Dos851 => "12",
            Self::Dos869 => "13",
            Self::Windows1252 => "A",
            Self::Windows1250 => "B",
            Self::Windows1251 => "C",
            Self::Windows1253 => "D",
            Self::Windows1254 => "E",
            Self::Windows1255 => "F",
        }
    }
}

/// # Character Set Selection (I)
///
/// ```
/// use etiqueta::epl::commands::{self, PrinterCodepage};
///
/// let cmd = commands::character_set_selection(8, PrinterCodepage::Windows1252, 1);
/// assert_eq!(cmd, "I8,A,1");
/// ```
pub fn character_set_selection(
    bytes: u8,
    printer_codepage: PrinterCodepage,
    country_code: u16,
) -> String {
    format!("I{bytes},{},{country_code}", printer_codepage.code())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_graphic_direct_write() {
        let entries = graphic_direct_write(4, 8, 2, 3, vec![0xFF; 6]);
        assert_eq!(entries[0], Entry::Text("GW4,8,2,3".to_string()));
        assert_eq!(entries[1], Entry::Binary(vec![0xFF; 6]));
    }

    #[test]
    fn test_delete_graphics() {
        assert_eq!(delete_graphics("12345678"), "GK\"12345678\"");
    }

    #[test]
    fn test_store_graphics() {
        let entries = store_graphics("LOGO", vec![1, 2, 3]);
        assert_eq!(entries[0], Entry::Text("GM\"LOGO\"3".to_string()));
        assert_eq!(entries[1], Entry::Binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_print_graphics() {
        assert_eq!(print_graphics(0, 0, "LOGO"), "GG0,0,\"LOGO\"");
    }

    #[test]
    fn test_line_draws() {
        assert_eq!(line_draw_black(0, 0, 10, 20), "LO0,0,10,20");
        assert_eq!(line_draw_white(5, 6, 7, 8), "LW5,6,7,8");
        assert_eq!(line_draw_diagonal(1, 2, 3, 4, 5), "LS1,2,3,4,5");
    }

    #[test]
    fn test_draw_box() {
        assert_eq!(draw_box(10, 20, 3, 110, 220), "X10,20,3,110,220");
    }

    #[test]
    fn test_ascii_text_normal() {
        let cmd = ascii_text(10, 20, 0, "2", 1, 1, false, "HELLO");
        assert_eq!(cmd, "A10,20,0,2,1,1,N,\"HELLO\"");
    }

    #[test]
    fn test_ascii_text_reverse() {
        let cmd = ascii_text(0, 0, 3, "4", 2, 2, true, "HI");
        assert_eq!(cmd, "A0,0,3,4,2,2,R,\"HI\"");
    }

    #[test]
    fn test_barcode() {
        let cmd = barcode(
            10,
            20,
            0,
            BarcodeSelection::Code128Auto,
            2,
            4,
            80,
            true,
            "4711",
        );
        assert_eq!(cmd, "B10,20,0,1,2,4,80,B,\"4711\"");
    }

    #[test]
    fn test_job_control() {
        assert_eq!(set_reference_point(0, 0), "R0,0");
        assert_eq!(print_direction(PrintOrientation::Top), "ZT");
        assert_eq!(print_direction(PrintOrientation::Bottom), "ZB");
        assert_eq!(
            print(2),
            vec![Entry::Text("P2".to_string()), Entry::Text(String::new())]
        );
    }

    #[test]
    fn test_codepage_codes() {
        assert_eq!(PrinterCodepage::Dos347.code(), "0");
        assert_eq!(PrinterCodepage::Dos869.code(), "13");
        assert_eq!(PrinterCodepage::Windows1255.code(), "F");
    }
}
