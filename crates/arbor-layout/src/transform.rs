//! Transform stack application.

use arbor_core::{Metric, Rect, Transformation};
use glam::Vec2;

use crate::resolve::reference_frame;

/// Apply one transformation to a metric.
///
/// Scale and rotation act on the vector from the transformation's origin to
/// the metric's center; a negative scale mirrors the position but never the
/// extent.
pub fn apply_transform(metric: &Metric, t: &Transformation, parent: &Metric, viewport: Vec2) -> Metric {
    let (ref_position, ref_size) = reference_frame(t.origin_mode, t.origin_mode, parent, viewport);
    let origin = ref_position
        + t.origin_position
        + t.origin_anchor * ref_size
        + t.origin_floating * metric.rect.extent;

    let v = (metric.rect.center - origin) * t.scale;
    let extent = (metric.rect.extent * t.scale).abs();
    let v = Vec2::from_angle(t.rotate).rotate(v);

    Metric {
        rect: Rect::new(origin + v + t.offset, extent),
        rotation: metric.rotation + t.rotate,
    }
}

/// Fold a transform stack over a metric, left to right.
///
/// `parent` and `viewport` stay fixed for every step. An empty stack returns
/// the metric unchanged.
pub fn apply_transform_stack(
    metric: &Metric,
    stack: &[Transformation],
    parent: &Metric,
    viewport: Vec2,
) -> Metric {
    stack
        .iter()
        .fold(*metric, |acc, t| apply_transform(&acc, t, parent, viewport))
}
