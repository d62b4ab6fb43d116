//! # Shape Model
//!
//! Device-independent vector shapes as they arrive from an upstream document
//! parser. Length attributes are already resolved to numeric document units;
//! this crate only transforms, rasterizes and serializes them.
//!
//! ## Colors
//!
//! Fills and strokes are `Option<Color>`: `None` means the attribute is
//! explicitly "none" and is distinct from any concrete color. A white fill
//! on text selects reverse-video rendering rather than no rendering.

use image::RgbaImage;

/// Solid RGB paint. Alpha handling happens at the raster stage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Whether this color matches the label background (white media).
    #[inline]
    pub fn is_background(&self) -> bool {
        *self == Self::WHITE
    }
}

/// Axis-aligned rectangle in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub stroke_width: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

/// Straight line segment in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub stroke_width: f32,
    pub stroke: Option<Color>,
}

/// Positioned text run. `font_height` is the resolved document-unit height.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f32,
    pub y: f32,
    pub font_height: f32,
    pub content: String,
    pub fill: Option<Color>,
}

/// Embedded raster image.
///
/// `pixels` is `None` when the upstream document references an asset that
/// could not be materialized; translators skip such shapes silently.
#[derive(Debug, Clone)]
pub struct Image {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Identity of the owning document, stable for one translation session.
    pub document_id: String,
    /// Element identity within the document.
    pub element_id: String,
    pub pixels: Option<RgbaImage>,
}

impl Image {
    /// Stable identity key used for device-side asset caching.
    ///
    /// Two shapes with the same key are guaranteed to reference the same
    /// pixel data and may share one uploaded graphic.
    pub fn identity(&self) -> String {
        format!("{}::{}", self.document_id, self.element_id)
    }
}

/// Closed set of translatable shapes.
///
/// Every protocol translator matches exhaustively on this enum, so adding
/// a shape kind is a compile-guided change across all three protocols.
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    Image(Image),
}
