//! # Etiqueta - Label Printer Translation Library
//!
//! Etiqueta turns device-independent vector shapes into the native command
//! streams of label printers. It provides:
//!
//! - **Protocol implementations**: EPL2, ZPL II and Intermec Fingerprint
//!   command builders
//! - **Geometry**: affine view matrices, rotation-sector extraction and
//!   stroke-aware device-space mapping
//! - **Rasterization**: monochrome bit packing and 1-bpp PCX containers
//!   for stored graphics
//! - **Asset caching**: one upload per distinct image across a document
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::epl::EplTranslator;
//! use etiqueta::shape::{Color, Shape, Text};
//! use etiqueta::transform::ViewRotation;
//!
//! let mut translator = EplTranslator::new();
//!
//! // Map a 90 dpi document onto a 203 dpi label
//! let matrix = translator
//!     .transformer()
//!     .view_matrix(90.0, 203.0, ViewRotation::Normal);
//!
//! let shapes = vec![Shape::Text(Text {
//!     x: 10.0,
//!     y: 40.0,
//!     font_height: 12.0,
//!     content: "8.25".to_string(),
//!     fill: Some(Color::BLACK),
//! })];
//!
//! let container = translator.translate_document(&shapes, &matrix, 1)?;
//! let stream = container.finish();
//! assert!(stream.starts_with(b"I8,A,1\n"));
//!
//! # Ok::<(), etiqueta::error::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`shape`] | Device-independent shape model |
//! | [`transform`] | View matrices and device-space geometry |
//! | [`container`] | Two-segment command stream buffer |
//! | [`font`] | Discrete font-grid matching |
//! | [`raster`] | Monochrome bit packing |
//! | [`pcx`] | 1-bpp PCX writer for stored graphics |
//! | [`assets`] | Device-side asset naming and caching |
//! | [`epl`] | EPL2 protocol (Eltron/Zebra desktop printers) |
//! | [`zpl`] | ZPL II protocol (Zebra industrial printers) |
//! | [`fingerprint`] | Fingerprint / Direct Protocol (Intermec printers) |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Currently tested against the command references for:
//! - Zebra/Eltron LP2844 and GK420 (EPL2)
//! - Zebra ZT230 and GK420z (ZPL II)
//! - Intermec PC43d and PM43 (Fingerprint / Direct Protocol)
//!
//! Other printers speaking these protocols should work with appropriate
//! label dimensions in the transform policy.

pub mod assets;
pub mod container;
pub mod epl;
pub mod error;
pub mod fingerprint;
pub mod font;
pub mod pcx;
pub mod raster;
pub mod shape;
pub mod transform;
pub mod zpl;

// Re-exports for convenience
pub use container::Container;
pub use error::EtiquetaError;
pub use shape::Shape;
