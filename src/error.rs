//! Engine error types.
//!
//! Construction is the only fallible operation in the public API: everything
//! past a successfully built [`crate::Engine`] either succeeds or is
//! defensively clamped. Caller contract breaches (ticking a destroyed
//! engine) are debug assertions, not runtime errors.

use std::fmt;

/// Top-level error enum for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The drawing surface cannot host a playfield: dimensions must be
    /// finite and strictly positive.
    InvalidSurface {
        /// Surface width as supplied by the host.
        width: f32,
        /// Surface height as supplied by the host.
        height: f32,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSurface { width, height } => write!(
                f,
                "surface {}x{} cannot provide a drawable playfield (need finite, positive dimensions)",
                width, height
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Convenience alias: a `Result` using `EngineError` as the error type.
pub type EngineResult<T> = Result<T, EngineError>;

/// Returns an error if the surface dimensions cannot host a playfield.
pub fn validate_surface(width: f32, height: f32) -> EngineResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidSurface { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_surface_accepts_positive() {
        assert!(validate_surface(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_validate_surface_rejects_degenerate() {
        assert!(validate_surface(0.0, 600.0).is_err());
        assert!(validate_surface(800.0, -1.0).is_err());
        assert!(validate_surface(f32::NAN, 600.0).is_err());
        assert!(validate_surface(f32::INFINITY, 600.0).is_err());
    }
}
