//! # Transform Engine
//!
//! Affine coordinate handling for the translation pipeline:
//!
//! - composing the view matrix that reconciles document space (top-left
//!   origin, y-down) with a target device's DPI and print rotation
//! - extracting the effective rotation sector and uniform scale factor
//!   from an arbitrary matrix
//! - applying a matrix to shape geometry, producing normalized device-space
//!   coordinates with stroke-width compensation
//!
//! ## Coordinate conventions
//!
//! Matrices use the row-vector convention: `p' = p * M`, so in a chain
//! `A.then(B)` the transform `A` is applied first. Document space is
//! y-down; a device whose y-axis points up (Fingerprint media) is handled
//! by the [`TransformPolicy::flip_vertical`] flag, not by special-cased
//! geometry code.

use crate::error::EtiquetaError;
use crate::shape::{Image, Line, Rectangle, Text};

/// 2×3 affine transform `(a, b, c, d, e, f)`.
///
/// ```text
/// x' = x*a + y*c + e
/// y' = x*b + y*d + f
/// ```
///
/// Immutable value: composition derives new matrices, existing ones are
/// never mutated across translator boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Uniform or non-uniform scale.
    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`, positive toward +y (clockwise in y-down space).
    #[inline]
    pub fn rotation(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// Compose: apply `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
            self.e * other.a + self.f * other.c + other.e,
            self.e * other.b + self.f * other.d + other.f,
        )
    }

    /// Transform a point (linear part + translation).
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Transform a direction vector (linear part only).
    #[inline]
    pub fn apply_vector(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.a + y * self.c, x * self.b + y * self.d)
    }
}

/// Requested print rotation, restricted to the four sectors devices support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRotation {
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl ViewRotation {
    /// Parse a rotation given in degrees.
    ///
    /// Anything outside {0, 90, 180, 270} is a precondition violation.
    pub fn from_degrees(degrees: u16) -> Result<Self, EtiquetaError> {
        match degrees {
            0 => Ok(Self::Normal),
            90 => Ok(Self::Rotate90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Rotate270),
            other => Err(EtiquetaError::UnsupportedRotation(other)),
        }
    }

    #[inline]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Normal => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }
}

/// One of the four 90°-aligned rotation classes a matrix quantizes to.
///
/// Always derived from a matrix via [`rotation_sector`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSector {
    R0,
    R90,
    R180,
    R270,
}

impl RotationSector {
    /// Sector index 0-3 as protocols encode it (e.g. EPL `A` rotation field).
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }
}

/// Quantize a matrix to its rotation sector and extract its uniform scale.
///
/// Transforms the reference vector `(10, 0)` by the linear part, takes the
/// `atan2` angle of the result, normalizes into [0°, 360°) and rounds to
/// the nearest quarter turn. The scale is the length ratio of the
/// transformed vector — the factor by which font heights and stroke
/// widths must grow to stay consistent with geometric scaling.
///
/// Correct for matrices combining scale, rotation and reflection in any
/// order.
pub fn rotation_sector(matrix: &Matrix) -> (RotationSector, f32) {
    let (vx, vy) = matrix.apply_vector(10.0, 0.0);

    let mut degrees = vy.atan2(vx).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    let sector = (degrees / 90.0).round() as u8 % 4;

    let scale = (vx * vx + vy * vy).sqrt() / 10.0;

    (RotationSector::from_index(sector), scale)
}

/// Protocol-specific transform parameters.
///
/// Replaces per-protocol transformer subclassing: the pipeline below is
/// the only transform code path, and protocols differ solely in these
/// values.
#[derive(Debug, Clone, Copy)]
pub struct TransformPolicy {
    /// Printable width in device units.
    pub label_width: f32,
    /// Printable height in device units.
    pub label_height: f32,
    /// Mirror the horizontal axis (`x → label_width − x`). Used by EPL
    /// when media is loaded top/bottom-first.
    pub mirror_horizontal: bool,
    /// Device y-axis points up (Fingerprint media origin is bottom-left).
    pub flip_vertical: bool,
}

/// Text placement in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometry {
    pub x: f32,
    pub y: f32,
    /// Font height rescaled by the matrix's uniform scale factor.
    pub font_height: f32,
}

/// Normalized box/line extent in device space (`start ≤ end` per axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    /// Stroke width rescaled by the matrix's uniform scale factor.
    pub stroke_width: f32,
}

impl BoxGeometry {
    #[inline]
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.end_y - self.start_y
    }
}

/// Endpoint pair in device space, order preserved.
///
/// Directional drawing commands (diagonal lines) need the endpoints as
/// given; the normalized [`BoxGeometry`] would mirror falling and rising
/// diagonals onto each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    /// Stroke width rescaled by the matrix's uniform scale factor.
    pub stroke_width: f32,
}

/// Image placement in device space.
///
/// `align_width`/`align_height` are the pre-rotation resize targets for the
/// source bitmap; sector rotation happens on the resized pixels, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    pub x: f32,
    pub y: f32,
    pub align_width: f32,
    pub align_height: f32,
}

/// The single, non-polymorphic transform pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    policy: TransformPolicy,
}

impl Transformer {
    pub const fn new(policy: TransformPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TransformPolicy {
        &self.policy
    }

    /// Build the document-to-device view matrix.
    ///
    /// Applies, in order: the requested quarter-turn rotation, the DPI
    /// magnification `destination_dpi / source_dpi`, the policy's vertical
    /// flip, and a translation that keeps the rotated content inside the
    /// printable area.
    pub fn view_matrix(
        &self,
        source_dpi: f32,
        destination_dpi: f32,
        rotation: ViewRotation,
    ) -> Matrix {
        let magnification = destination_dpi / source_dpi;
        let width = self.policy.label_width;
        let height = self.policy.label_height;

        // A vertical flip reverses handedness, so the quarter turn has to
        // be taken in the opposite direction to still land in the
        // requested sector.
        let degrees = if self.policy.flip_vertical {
            (360 - rotation.degrees()) % 360
        } else {
            rotation.degrees()
        };

        let mut matrix = Matrix::rotation(f32::from(degrees))
            .then(&Matrix::scale(magnification, magnification));

        if self.policy.flip_vertical {
            matrix = matrix.then(&Matrix::scale(1.0, -1.0));
            let translation = match rotation {
                ViewRotation::Normal => Matrix::translation(0.0, height),
                ViewRotation::Rotate90 => Matrix::IDENTITY,
                ViewRotation::Rotate180 => Matrix::translation(width, 0.0),
                ViewRotation::Rotate270 => Matrix::translation(width, height),
            };
            matrix = matrix.then(&translation);
        } else {
            let translation = match rotation {
                ViewRotation::Normal => Matrix::IDENTITY,
                ViewRotation::Rotate90 => Matrix::translation(width, 0.0),
                ViewRotation::Rotate180 => Matrix::translation(width, height),
                ViewRotation::Rotate270 => Matrix::translation(0.0, height),
            };
            matrix = matrix.then(&translation);
        }

        matrix
    }

    #[inline]
    fn adapt_horizontal(&self, x: f32) -> f32 {
        if self.policy.mirror_horizontal {
            self.policy.label_width - x
        } else {
            x
        }
    }

    /// Transform a text anchor point.
    pub fn text(&self, text: &Text, matrix: &Matrix) -> TextGeometry {
        let (x, y) = matrix.apply(text.x, text.y);
        let (_, scale) = rotation_sector(matrix);

        TextGeometry {
            x: self.adapt_horizontal(x),
            y,
            font_height: text.font_height * scale,
        }
    }

    /// Transform a line segment into a normalized extent.
    pub fn line(&self, line: &Line, matrix: &Matrix) -> BoxGeometry {
        let (sx, sy) = matrix.apply(line.start_x, line.start_y);
        let (ex, ey) = matrix.apply(line.end_x, line.end_y);
        let (_, scale) = rotation_sector(matrix);

        self.normalized(sx, sy, ex, ey, line.stroke_width * scale)
    }

    /// Transform a line segment keeping the endpoint order.
    pub fn segment(&self, line: &Line, matrix: &Matrix) -> SegmentGeometry {
        let (sx, sy) = matrix.apply(line.start_x, line.start_y);
        let (ex, ey) = matrix.apply(line.end_x, line.end_y);
        let (_, scale) = rotation_sector(matrix);

        SegmentGeometry {
            start_x: self.adapt_horizontal(sx),
            start_y: sy,
            end_x: self.adapt_horizontal(ex),
            end_y: ey,
            stroke_width: line.stroke_width * scale,
        }
    }

    /// Transform a rectangle into a normalized extent, expanded by half the
    /// stroke width on each axis (stroke is centered on the path).
    pub fn rectangle(&self, rect: &Rectangle, matrix: &Matrix) -> BoxGeometry {
        let (sx, sy) = matrix.apply(rect.x, rect.y);
        let (ex, ey) = matrix.apply(rect.x + rect.width, rect.y + rect.height);
        let (_, scale) = rotation_sector(matrix);

        let mut geometry = self.normalized(sx, sy, ex, ey, rect.stroke_width * scale);
        let half_stroke = geometry.stroke_width / 2.0;
        geometry.start_x -= half_stroke;
        geometry.start_y -= half_stroke;
        geometry.end_x += half_stroke;
        geometry.end_y += half_stroke;
        geometry
    }

    /// Transform an image placement.
    pub fn image(&self, image: &Image, matrix: &Matrix) -> ImageGeometry {
        let (sx, sy) = matrix.apply(image.x, image.y);
        let (ex, ey) = matrix.apply(image.x + image.width, image.y + image.height);
        let (_, scale) = rotation_sector(matrix);

        let extent = self.normalized(sx, sy, ex, ey, 0.0);

        ImageGeometry {
            x: extent.start_x,
            y: extent.start_y,
            align_width: image.width * scale,
            align_height: image.height * scale,
        }
    }

    /// Mirror, then order so start ≤ end on both axes. Protocols only
    /// accept non-negative extents.
    fn normalized(&self, sx: f32, sy: f32, ex: f32, ey: f32, stroke_width: f32) -> BoxGeometry {
        let sx = self.adapt_horizontal(sx);
        let ex = self.adapt_horizontal(ex);

        BoxGeometry {
            start_x: sx.min(ex),
            start_y: sy.min(ey),
            end_x: sx.max(ex),
            end_y: sy.max(ey),
            stroke_width,
        }
    }
}
