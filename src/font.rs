//! # Font Grid Matcher
//!
//! Label printers offer a sparse grid of achievable text heights: a handful
//! of base fonts, each stretchable by a handful of integer multipliers.
//! This module maps a continuous target height (document font size, already
//! rescaled to device units) onto the nearest achievable `(font, multiplier)`
//! pair.
//!
//! ## EPL2 font grid (203 dpi)
//!
//! | Font | Dot height | cpi |
//! |------|-----------|------|
//! | 1 | 12 | 20.3 |
//! | 2 | 16 | 16.9 |
//! | 3 | 20 | 14.5 |
//! | 4 | 24 | 12.7 |
//!
//! Horizontal/vertical multipliers accept 1-6 and 8.
//!
//! ## Matching rule
//!
//! Enumerate every `base × multiplier` height in ascending multiplier,
//! ascending base order. An exact hit (within 0.5 device units) returns
//! immediately. Otherwise the best candidate strictly below the target
//! competes against the best candidate at or above it (the latter only
//! within `upper_overlap` units of overshoot); the smaller absolute
//! distance wins, ties favor the candidate below. A target below the whole
//! grid is an error — silently clamping would print oversized text.

use crate::error::EtiquetaError;

/// Tolerance for treating an achievable height as an exact match.
const EXACT_TOLERANCE: f32 = 0.5;

/// One point on a protocol's discrete font grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontCandidate {
    /// Protocol font selector (EPL `A` command font field).
    pub selector: &'static str,
    /// Achievable height, `base × multiplier`, in device units.
    pub height: i32,
    /// Stretch multiplier applied to the base font.
    pub multiplier: i32,
}

/// A protocol's achievable font heights.
#[derive(Debug, Clone, Copy)]
pub struct FontGrid {
    /// Base dot heights with their protocol selectors, ascending.
    pub bases: &'static [(i32, &'static str)],
    /// Accepted stretch multipliers, ascending.
    pub multipliers: &'static [i32],
    /// How far above the target an upper candidate may overshoot.
    pub upper_overlap: f32,
}

/// The EPL2 internal font grid.
pub const EPL_GRID: FontGrid = FontGrid {
    bases: &[(12, "1"), (16, "2"), (20, "3"), (24, "4")],
    multipliers: &[1, 2, 3, 4, 5, 6, 8],
    upper_overlap: 2.0,
};

impl FontGrid {
    /// Select the achievable `(font, multiplier)` pair nearest to
    /// `height_target`.
    ///
    /// Deterministic: the same target always yields the same candidate.
    pub fn select(&self, height_target: f32) -> Result<FontCandidate, EtiquetaError> {
        let mut lower: Option<FontCandidate> = None;
        let mut upper: Option<FontCandidate> = None;

        for &multiplier in self.multipliers {
            for &(base, selector) in self.bases {
                let height = base * multiplier;
                let candidate = FontCandidate {
                    selector,
                    height,
                    multiplier,
                };
                let achievable = height as f32;

                if (achievable - height_target).abs() < EXACT_TOLERANCE {
                    return Ok(candidate);
                }

                if achievable < height_target {
                    if lower.is_none_or(|best| height > best.height) {
                        lower = Some(candidate);
                    }
                } else if achievable <= height_target + self.upper_overlap {
                    if upper.is_none_or(|best| height < best.height) {
                        upper = Some(candidate);
                    }
                    // larger bases only overshoot further at this multiplier
                    break;
                }
            }
        }

        match (lower, upper) {
            (None, None) => Err(EtiquetaError::NoFontCandidate(height_target)),
            (Some(candidate), None) | (None, Some(candidate)) => Ok(candidate),
            (Some(lower), Some(upper)) => {
                let below = height_target - lower.height as f32;
                let above = upper.height as f32 - height_target;
                if below <= above { Ok(lower) } else { Ok(upper) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let candidate = EPL_GRID.select(24.0).unwrap();
        assert_eq!(candidate.height, 24);
        // multiplier 1 is enumerated first, so 24x1 wins over 12x2
        assert_eq!(candidate.selector, "4");
        assert_eq!(candidate.multiplier, 1);
    }

    #[test]
    fn test_exact_match_within_tolerance() {
        let candidate = EPL_GRID.select(16.4).unwrap();
        assert_eq!(candidate.height, 16);
        assert_eq!(candidate.selector, "2");
        assert_eq!(candidate.multiplier, 1);
    }

    #[test]
    fn test_deterministic() {
        let first = EPL_GRID.select(37.0).unwrap();
        let second = EPL_GRID.select(37.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefers_smaller_distance() {
        // 37 sits between 36 (12x3) and 38 — no 38 on the grid; nearest
        // below is 36, nearest within-overlap above does not exist
        let candidate = EPL_GRID.select(37.0).unwrap();
        assert_eq!(candidate.height, 36);
    }

    #[test]
    fn test_upper_candidate_within_overlap() {
        // 23 is 1 below 24 (within overlap 2) and 3 above 20
        let candidate = EPL_GRID.select(23.0).unwrap();
        assert_eq!(candidate.height, 24);
    }

    #[test]
    fn test_tie_favors_lower() {
        // 22 is 2 above 20 and 2 below 24
        let candidate = EPL_GRID.select(22.0).unwrap();
        assert_eq!(candidate.height, 20);
    }

    #[test]
    fn test_too_small_fails() {
        let error = EPL_GRID.select(4.0).unwrap_err();
        assert!(matches!(
            error,
            EtiquetaError::NoFontCandidate(height) if height == 4.0
        ));
    }

    #[test]
    fn test_huge_target_returns_largest() {
        let candidate = EPL_GRID.select(10_000.0).unwrap();
        assert_eq!(candidate.height, 24 * 8);
        assert_eq!(candidate.selector, "4");
        assert_eq!(candidate.multiplier, 8);
    }
}
