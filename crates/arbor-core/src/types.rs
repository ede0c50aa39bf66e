//! Resolved geometry types.
//!
//! Coordinates use +y up: a rectangle's top edge has the larger y value.

use glam::Vec2;

/// What a declarative quantity is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceMode {
    /// Measured against the parent's resolved metric
    #[default]
    Relative,
    /// Measured against the viewport, centered on the viewport midpoint
    Absolute,
}

/// Rectangle stored as center and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub center: Vec2,
    /// Full width and height
    pub extent: Vec2,
}

impl Rect {
    /// Create a rect from its center and extent.
    pub const fn new(center: Vec2, extent: Vec2) -> Self {
        Self { center, extent }
    }

    /// Rebuild a rect from its top-left and bottom-right corners.
    ///
    /// Inverted corners are kept as is and yield a negative extent.
    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            center: (top_left + bottom_right) * 0.5,
            extent: Vec2::new(bottom_right.x - top_left.x, top_left.y - bottom_right.y),
        }
    }

    /// Top-left corner: `center - extent * (0.5, -0.5)`.
    pub fn top_left(&self) -> Vec2 {
        self.center - self.extent * Vec2::new(0.5, -0.5)
    }

    /// Bottom-right corner: `center + extent * (0.5, -0.5)`.
    pub fn bottom_right(&self) -> Vec2 {
        self.center + self.extent * Vec2::new(0.5, -0.5)
    }

    pub fn left(&self) -> f32 {
        self.top_left().x
    }

    pub fn right(&self) -> f32 {
        self.bottom_right().x
    }

    pub fn top(&self) -> f32 {
        self.top_left().y
    }

    pub fn bottom(&self) -> f32 {
        self.bottom_right().y
    }

    /// Check if a point is inside the rect (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Compute intersection with another rect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().min(other.top());
        let bottom = self.bottom().max(other.bottom());

        if left < right && bottom < top {
            Some(Rect::from_corners(Vec2::new(left, top), Vec2::new(right, bottom)))
        } else {
            None
        }
    }

    /// Compute the bounding rect of both rects.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        Rect::from_corners(Vec2::new(left, top), Vec2::new(right, bottom))
    }

    /// True when an extent component is negative or either vector is not finite.
    pub fn is_degenerate(&self) -> bool {
        !self.center.is_finite() || !self.extent.is_finite() || self.extent.min_element() < 0.0
    }
}

/// Resolved geometry of a node: rectangle plus accumulated rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub rect: Rect,
    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
}

impl Metric {
    pub const fn new(rect: Rect, rotation: f32) -> Self {
        Self { rect, rotation }
    }

    /// Unrotated metric for a rect.
    pub const fn from_rect(rect: Rect) -> Self {
        Self { rect, rotation: 0.0 }
    }

    /// The metric covering a whole viewport of the given size.
    pub fn viewport(size: Vec2) -> Self {
        Self::from_rect(Rect::new(size * 0.5, size))
    }

    /// Corners rotated about the center, in order top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let half = self.rect.extent * 0.5;
        let rotation = Vec2::from_angle(self.rotation);
        [
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-half.x, -half.y),
        ]
        .map(|corner| self.rect.center + rotation.rotate(corner))
    }

    /// Check if a point lies inside the rotated rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        let local = Vec2::from_angle(-self.rotation).rotate(point - self.rect.center);
        Rect::new(Vec2::ZERO, self.rect.extent).contains(local)
    }

    /// Axis-aligned bounds of the rotated rectangle.
    pub fn bounding_rect(&self) -> Rect {
        let corners = self.corners();
        let min = corners.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = corners.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        Rect::from_corners(Vec2::new(min.x, max.y), Vec2::new(max.x, min.y))
    }
}
