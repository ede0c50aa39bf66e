//! Retained-mode scene tree for Arbor.
//!
//! A [`Scene`] owns a tree of nodes. Each node carries a declarative box
//! model and transform stack; [`Scene::update`] resolves them top-down into
//! cached metrics, and [`Scene::draw`] walks the visible nodes in paint order.
//!
//! # Example
//!
//! ```
//! use arbor_scene::{Dimension, NodeBuilder, Scene, Vec2};
//!
//! let mut scene: Scene = Scene::with_viewport(Vec2::new(1024.0, 768.0))?;
//! let panel = scene.add_root(NodeBuilder::new(Dimension::scaled(Vec2::splat(0.5))));
//! let badge = scene.add_child(panel, NodeBuilder::new(Dimension::fixed(Vec2::splat(16.0))))?;
//! scene.update();
//!
//! assert_eq!(scene.get(panel).unwrap().metric().rect.extent, Vec2::new(512.0, 384.0));
//! assert_eq!(scene.get(badge).unwrap().metric().rect.center, Vec2::new(512.0, 384.0));
//! # Ok::<(), arbor_scene::SceneError>(())
//! ```

mod context;
mod options;
mod traverse;
mod tree;

pub use context::ContextKind;
pub use options::SceneOptions;
pub use traverse::Painter;
pub use tree::{Node, NodeBuilder, NodeId, Scene};

pub use arbor_core::{
    BoxModel, ConfigError, Dimension, Metric, Rect, ReferenceMode, SceneError, Transformation, Vec2,
};
pub use arbor_layout::{Arrangement, Direction, StackArrangement};
