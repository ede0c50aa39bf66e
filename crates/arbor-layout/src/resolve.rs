//! Box model resolution.

use arbor_core::{BoxModel, Dimension, Metric, Rect, ReferenceMode};
use glam::Vec2;

/// Reference position and size for the given modes.
///
/// `Absolute` measures against the viewport centered on its midpoint,
/// `Relative` against the parent's resolved rectangle.
pub fn reference_frame(
    positioning: ReferenceMode,
    sizing: ReferenceMode,
    parent: &Metric,
    viewport: Vec2,
) -> (Vec2, Vec2) {
    let position = match positioning {
        ReferenceMode::Absolute => viewport * 0.5,
        ReferenceMode::Relative => parent.rect.center,
    };
    let size = match sizing {
        ReferenceMode::Absolute => viewport,
        ReferenceMode::Relative => parent.rect.extent,
    };
    (position, size)
}

/// Resolve a single dimension into an unrotated metric.
pub fn resolve_dimension(dim: &Dimension, parent: &Metric, viewport: Vec2) -> Metric {
    let (ref_position, ref_size) = reference_frame(dim.positioning, dim.sizing, parent, viewport);

    let extent = dim.size + dim.scale * ref_size;
    // Anchor follows the reference size, floating follows our own extent.
    let center = dim.position + ref_position + dim.anchor * ref_size + dim.floating * extent;

    Metric::from_rect(Rect::new(center, extent))
}

/// Resolve a box model, clamping against its min then max bounds.
///
/// The two clamps are independent; a max bound inside the min bound can
/// leave the result inverted.
pub fn resolve_box_model(model: &BoxModel, parent: &Metric, viewport: Vec2) -> Metric {
    let mut metric = resolve_dimension(&model.dimension, parent, viewport);

    if model.use_min {
        let bound = resolve_dimension(&model.min, parent, viewport).rect;
        let top_left = metric.rect.top_left().max(bound.top_left());
        let bottom_right = metric.rect.bottom_right().min(bound.bottom_right());
        metric.rect = Rect::from_corners(top_left, bottom_right);
    }

    if model.use_max {
        let bound = resolve_dimension(&model.max, parent, viewport).rect;
        let top_left = metric.rect.top_left().min(bound.top_left());
        let bottom_right = metric.rect.bottom_right().max(bound.bottom_right());
        metric.rect = Rect::from_corners(top_left, bottom_right);
    }

    metric
}
