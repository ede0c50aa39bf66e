//! Layout resolution for Arbor scene graphs.
//!
//! This crate turns declarative node geometry into resolved metrics.
//!
//! # Architecture
//!
//! 1. **Box model resolution**: a `BoxModel` is resolved against the parent's
//!    metric (or the viewport) and clamped to its min/max bounds
//! 2. **Transform stacks**: the resolved metric is folded through the node's
//!    ordered `Transformation`s
//! 3. **Arrangement**: an optional per-node hook rewrites children's box
//!    models before they resolve
//!
//! # Example
//!
//! ```
//! use arbor_core::{BoxModel, Dimension, Metric, Transformation, Vec2};
//! use arbor_layout::{apply_transform_stack, resolve_box_model};
//!
//! let viewport = Vec2::new(1024.0, 768.0);
//! let parent = Metric::viewport(viewport);
//! let model = BoxModel::new(Dimension::fixed(Vec2::new(200.0, 100.0)));
//!
//! let modeled = resolve_box_model(&model, &parent, viewport);
//! let metric = apply_transform_stack(
//!     &modeled,
//!     &[Transformation::translate(Vec2::new(10.0, 0.0))],
//!     &parent,
//!     viewport,
//! );
//! assert_eq!(metric.rect.center, Vec2::new(522.0, 384.0));
//! ```

mod arrange;
mod resolve;
mod transform;

pub use arrange::{Arrangement, Direction, StackArrangement};
pub use resolve::{reference_frame, resolve_box_model, resolve_dimension};
pub use transform::{apply_transform, apply_transform_stack};
