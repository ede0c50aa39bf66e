//! Declarative geometry authored on nodes.

use glam::Vec2;

use crate::types::ReferenceMode;

/// Unresolved position and size of a node.
///
/// Once resolved against a reference position `P` and reference size `S`:
///
/// ```text
/// extent = size + scale * S
/// center = position + P + anchor * S + floating * extent
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dimension {
    /// Offset from the reference position, in units
    pub position: Vec2,
    /// Offset as a fraction of the reference size
    pub anchor: Vec2,
    /// Offset as a fraction of the node's own resolved size
    pub floating: Vec2,
    /// Fixed size, in units
    pub size: Vec2,
    /// Size as a fraction of the reference size
    pub scale: Vec2,
    /// Reference used for `position` and `anchor`
    pub positioning: ReferenceMode,
    /// Reference whose size scales `scale` and `anchor`
    pub sizing: ReferenceMode,
}

impl Dimension {
    /// A fixed-size dimension centered on the parent.
    pub fn fixed(size: Vec2) -> Self {
        Self { size, ..Default::default() }
    }

    /// A dimension sized as a fraction of the parent.
    pub fn scaled(scale: Vec2) -> Self {
        Self { scale, ..Default::default() }
    }

    /// A dimension covering its whole reference.
    pub fn fill() -> Self {
        Self::scaled(Vec2::ONE)
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_floating(mut self, floating: Vec2) -> Self {
        self.floating = floating;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Set both reference modes at once.
    pub fn with_mode(mut self, mode: ReferenceMode) -> Self {
        self.positioning = mode;
        self.sizing = mode;
        self
    }

    pub fn with_positioning(mut self, mode: ReferenceMode) -> Self {
        self.positioning = mode;
        self
    }

    pub fn with_sizing(mut self, mode: ReferenceMode) -> Self {
        self.sizing = mode;
        self
    }
}

/// A dimension with optional min and max clamp bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoxModel {
    pub dimension: Dimension,
    pub min: Dimension,
    pub max: Dimension,
    pub use_min: bool,
    pub use_max: bool,
}

impl BoxModel {
    /// A box model with no clamping.
    pub fn new(dimension: Dimension) -> Self {
        Self { dimension, ..Default::default() }
    }

    /// Clamp against `min` during resolution.
    pub fn with_min(mut self, min: Dimension) -> Self {
        self.min = min;
        self.use_min = true;
        self
    }

    /// Clamp against `max` during resolution.
    pub fn with_max(mut self, max: Dimension) -> Self {
        self.max = max;
        self.use_max = true;
        self
    }
}

impl From<Dimension> for BoxModel {
    fn from(dimension: Dimension) -> Self {
        Self::new(dimension)
    }
}

/// One origin-relative affine step of a transform stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Transformation {
    /// Reference for the origin's position and size
    pub origin_mode: ReferenceMode,
    pub origin_position: Vec2,
    /// Origin offset as a fraction of the reference size
    pub origin_anchor: Vec2,
    /// Origin offset as a fraction of the transformed metric's size
    pub origin_floating: Vec2,
    /// Translation applied after scale and rotation
    pub offset: Vec2,
    /// Rotation delta in radians, counter-clockwise
    pub rotate: f32,
    pub scale: Vec2,
}

impl Default for Transformation {
    fn default() -> Self {
        Self {
            origin_mode: ReferenceMode::Relative,
            origin_position: Vec2::ZERO,
            origin_anchor: Vec2::ZERO,
            origin_floating: Vec2::ZERO,
            offset: Vec2::ZERO,
            rotate: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transformation {
    /// A pure translation.
    pub fn translate(offset: Vec2) -> Self {
        Self { offset, ..Default::default() }
    }

    /// A rotation about the origin.
    pub fn rotate(angle: f32) -> Self {
        Self { rotate: angle, ..Default::default() }
    }

    /// A scale about the origin.
    pub fn scale(scale: Vec2) -> Self {
        Self { scale, ..Default::default() }
    }

    pub fn with_origin_mode(mut self, mode: ReferenceMode) -> Self {
        self.origin_mode = mode;
        self
    }

    pub fn with_origin_position(mut self, position: Vec2) -> Self {
        self.origin_position = position;
        self
    }

    pub fn with_origin_anchor(mut self, anchor: Vec2) -> Self {
        self.origin_anchor = anchor;
        self
    }

    pub fn with_origin_floating(mut self, floating: Vec2) -> Self {
        self.origin_floating = floating;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, angle: f32) -> Self {
        self.rotate = angle;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }
}
