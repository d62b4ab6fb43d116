//! # ZPL II Protocol
//!
//! Command builders and shape translators for the Zebra Programming
//! Language (ZPL II) spoken by Zebra industrial and desktop printers
//! (ZT230, GK420z, ZD420 and friends).
//!
//! ## Module Structure
//!
//! - [`commands`]: Pure ZPL II token builders (`^GB`, `^A`, `~DG`, ...)
//! - [`translate`]: Shape translators and the document job driver
//!
//! ## Command Stream Shape
//!
//! ZPL II is entirely textual: a document is one `^XA`..`^XZ` format
//! block, and graphic data travels as ASCII hex rather than raw bytes.
//! Stored graphics are downloaded with `~DG` outside the format block and
//! recalled by name with `^XG`.
//!
//! ## Reference
//!
//! "ZPL II Programming Guide" (Zebra Technologies, P1012728-008).

pub mod commands;
pub mod translate;

pub use translate::ZplTranslator;

/// Default printable height in device units (203 dpi, 6" label).
pub const DEFAULT_LABEL_HEIGHT: f32 = 1218.0;

/// Default printable width in device units (203 dpi, 4" label).
pub const DEFAULT_LABEL_WIDTH: f32 = 812.0;
