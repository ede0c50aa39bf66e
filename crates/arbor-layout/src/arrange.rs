//! Arrangement hooks that redistribute children before they resolve.
//!
//! An arrangement only rewrites declarative box models; the children are
//! still resolved by the regular box model pass afterwards.

use arbor_core::{BoxModel, ReferenceMode};

/// Main axis of a stack arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// Equal shares of the parent along one axis, separated by a fixed gap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackArrangement {
    pub direction: Direction,
    /// Gap between neighbouring children, in units
    pub gap: f32,
}

impl StackArrangement {
    /// Create a horizontal stack.
    pub fn horizontal() -> Self {
        Self { direction: Direction::Horizontal, gap: 0.0 }
    }

    /// Create a vertical stack.
    pub fn vertical() -> Self {
        Self { direction: Direction::Vertical, gap: 0.0 }
    }

    /// Set the gap between items.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    fn arrange(&self, children: &mut [BoxModel]) {
        let n = children.len();
        if n == 0 {
            return;
        }
        let count = n as f32;
        let share = 1.0 / count;
        let size = -self.gap * (count - 1.0) / count;

        for (i, child) in children.iter_mut().enumerate() {
            let index = i as f32;
            let anchor = (index + 0.5) / count - 0.5;
            let position = self.gap * (2.0 * index + 1.0 - count) / (2.0 * count);

            let dim = &mut child.dimension;
            dim.positioning = ReferenceMode::Relative;
            dim.sizing = ReferenceMode::Relative;

            // +y is up, so a vertical stack runs from the top edge downwards.
            match self.direction {
                Direction::Horizontal => {
                    dim.scale.x = share;
                    dim.size.x = size;
                    dim.floating.x = 0.0;
                    dim.anchor.x = anchor;
                    dim.position.x = position;
                }
                Direction::Vertical => {
                    dim.scale.y = share;
                    dim.size.y = size;
                    dim.floating.y = 0.0;
                    dim.anchor.y = -anchor;
                    dim.position.y = -position;
                }
            }
        }
    }
}

/// How a node redistributes its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arrangement {
    /// Children keep their own box models
    #[default]
    Free,
    /// Children split the node along one axis
    Stack(StackArrangement),
}

impl Arrangement {
    /// Rewrite children's box models in place, in child order.
    pub fn arrange(&self, children: &mut [BoxModel]) {
        match self {
            Arrangement::Free => {}
            Arrangement::Stack(stack) => stack.arrange(children),
        }
    }

    /// True if this arrangement never touches children.
    pub fn is_free(&self) -> bool {
        matches!(self, Arrangement::Free)
    }
}

impl From<StackArrangement> for Arrangement {
    fn from(stack: StackArrangement) -> Self {
        Arrangement::Stack(stack)
    }
}
