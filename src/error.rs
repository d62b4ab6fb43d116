//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// View rotation outside the four 90°-aligned sectors
    #[error("Unsupported view rotation: {0} degrees")]
    UnsupportedRotation(u16),

    /// No point on the protocol's discrete font grid fits the target height
    #[error("No font candidate for target height {0}")]
    NoFontCandidate(f32),

    /// Image payload error (dimension mismatch, oversized payload)
    #[error("Image error: {0}")]
    Image(String),
}
