//! Artwork types derived from block hashes.

use serde::{Deserialize, Serialize};

/// Generative artwork attached to a block.
///
/// Derivation is deterministic: the same block hash and transactions always
/// yield the same pattern. See `artchain-art` for the derivation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtPattern {
    /// Background color, `#` followed by the first six hash characters.
    pub background: String,
    /// Shapes in derivation order, three per transaction.
    pub shapes: Vec<Shape>,
}

/// A single shape in an [`ArtPattern`].
///
/// Rotation only exists where it changes the rendering. A circle is
/// rotation-invariant, so the `Circle` variant carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Filled circle of diameter `size` centered at `(x, y)`.
    Circle { x: f64, y: f64, size: f64, color: String },
    /// Square of side `size` at `(x, y)`, rotated by `rotation` degrees.
    Rectangle { x: f64, y: f64, size: f64, color: String, rotation: f64 },
    /// Stroke of length `size` from `(x, y)`, rotated by `rotation` degrees.
    Line { x: f64, y: f64, size: f64, color: String, rotation: f64 },
}

impl Shape {
    /// The shape's color.
    pub fn color(&self) -> &str {
        match self {
            Self::Circle { color, .. }
            | Self::Rectangle { color, .. }
            | Self::Line { color, .. } => color,
        }
    }

    /// Rotation in degrees, for the variants that have one.
    pub fn rotation(&self) -> Option<f64> {
        match self {
            Self::Circle { .. } => None,
            Self::Rectangle { rotation, .. } | Self::Line { rotation, .. } => Some(*rotation),
        }
    }
}
