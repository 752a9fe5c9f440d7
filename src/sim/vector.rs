//! 2D vector helpers on top of `glam::Vec2`
//!
//! `glam` already provides the value type and its arithmetic. What it doesn't
//! provide is a normalization that refuses zero-length input instead of
//! producing NaNs, which the collision code relies on.

use glam::Vec2;
use thiserror::Error;

/// Vector math failures
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VectorError {
    /// Attempted to normalize a vector with zero (or non-finite) length
    #[error("cannot normalize degenerate vector ({x}, {y})")]
    Degenerate { x: f32, y: f32 },
}

/// Unit vector in the direction of `v`
///
/// Fails with [`VectorError::Degenerate`] when `v` has no direction.
#[inline]
pub fn normalized(v: Vec2) -> Result<Vec2, VectorError> {
    v.try_normalize()
        .ok_or(VectorError::Degenerate { x: v.x, y: v.y })
}

/// Perpendicular of a direction, rotated so it points "up" (negative y)
///
/// Screen coordinates grow downward, so up is -y.
#[inline]
pub fn upward_perp(dir: Vec2) -> Vec2 {
    let perp = dir.perp();
    if perp.y > 0.0 { -perp } else { perp }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_unit_length() {
        let n = normalized(Vec2::new(3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_fails() {
        let err = normalized(Vec2::ZERO).unwrap_err();
        assert_eq!(err, VectorError::Degenerate { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_normalized_nan_fails() {
        assert!(normalized(Vec2::new(f32::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_upward_perp() {
        // Flat segment to the right: up is -y
        assert_eq!(upward_perp(Vec2::X), Vec2::new(0.0, -1.0));
        // Flat segment to the left gives the same answer
        assert_eq!(upward_perp(-Vec2::X), Vec2::new(0.0, -1.0));
    }
}
