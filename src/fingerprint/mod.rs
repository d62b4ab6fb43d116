//! # Fingerprint / Direct Protocol
//!
//! Command builders and shape translators for Intermec Fingerprint as
//! driven over Direct Protocol (PC43d, PM43 and friends).
//!
//! ## Module Structure
//!
//! - [`commands`]: Pure Fingerprint statement builders (`PP`, `PT`, ...)
//! - [`translate`]: Shape translators and the document job driver
//!
//! ## Coordinate System
//!
//! Unlike EPL2 and ZPL II, Fingerprint's origin sits at the bottom-left
//! of the label with y growing upward. The transform policy handles this
//! with a vertical flip; nothing in this module compensates coordinates.
//!
//! ## Reference
//!
//! "Intermec Fingerprint Command Reference Manual" (935-077-004).

pub mod commands;
pub mod translate;

pub use translate::FingerprintTranslator;

/// Default printable height in device units (203 dpi, 6" label).
pub const DEFAULT_LABEL_HEIGHT: f32 = 1216.0;

/// Default printable width in device units (203 dpi, 4" label).
pub const DEFAULT_LABEL_WIDTH: f32 = 812.0;
