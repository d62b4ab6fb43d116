//! # EPL2 Protocol
//!
//! Command builders and shape translators for the Eltron Programming
//! Language (EPL2) as spoken by Zebra/Eltron desktop label printers
//! (LP2844, TLP2844, GK420 and friends).
//!
//! ## Module Structure
//!
//! - [`commands`]: Pure EPL2 token builders (`GW`, `LO`, `A`, ...)
//! - [`translate`]: Shape translators and the document job driver
//!
//! ## Command Stream Shape
//!
//! EPL2 is line-oriented ASCII with raw binary riding directly behind
//! graphics commands. Stored graphics (`GM`) carry a 1-bpp PCX payload;
//! inline graphics (`GW`) carry bare packed rows where a **clear** bit
//! prints black.
//!
//! ## Reference
//!
//! "EPL2 Programming Manual" (Zebra Technologies, 14245L-002).

pub mod commands;
pub mod translate;

pub use translate::{EplTranslator, ImageMode};

/// Default printable height in device units (203 dpi, 6" label).
pub const DEFAULT_LABEL_HEIGHT: f32 = 1296.0;

/// Default printable width in device units (203 dpi, 4" label).
pub const DEFAULT_LABEL_WIDTH: f32 = 816.0;
