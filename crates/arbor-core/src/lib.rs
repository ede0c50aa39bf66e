//! Core types and errors for the Arbor scene-graph layout engine.
//!
//! This crate provides the foundational types used across all other arbor crates:
//! - Resolved geometry (`Rect`, `Metric`)
//! - Declarative geometry (`Dimension`, `BoxModel`, `Transformation`)
//! - Error types

pub mod errors;
pub mod model;
pub mod types;

pub use errors::*;
pub use model::*;
pub use types::*;

/// 2D vector type used for every position, extent, and offset.
pub use glam::Vec2;
