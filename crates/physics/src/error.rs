//! Error types for geometry construction and configuration validation.
//!
//! The per-step resolver math never fails; these only come out of the
//! setup paths (building a world, validating tuning data).

use thiserror::Error;

/// Rejected geometry passed to a [`CollisionWorld`](crate::CollisionWorld) builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("geometry contains a non-finite coordinate")]
    NonFinite,

    #[error("box half-extents must be positive, got ({x}, {y})")]
    NonPositiveExtents { x: f32, y: f32 },

    #[error("convex hull needs at least 3 non-collinear points, got {0}")]
    DegenerateHull(usize),
}

/// Invalid field in [`MoveSpec`](crate::MoveSpec) or [`ResolverConfig`](crate::ResolverConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("max_slope_angle must be within [0, 90] degrees, got {0}")]
    SlopeAngleOutOfRange(f32),
}
