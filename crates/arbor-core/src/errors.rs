//! Error types for the Arbor engine.
//!
//! Resolution itself is total; errors only come from tree bookkeeping and
//! configuration.

use thiserror::Error;

/// Errors raised by scene-tree operations.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Node {id} does not exist in the scene")]
    NodeNotFound { id: u64 },

    #[error("Cannot attach node {node} under {parent}: it would become its own ancestor")]
    Cycle { node: u64, parent: u64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors in scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid viewport size {width}x{height}: components must be finite and non-negative")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Failed to parse scene options: {0}")]
    Parse(String),
}
