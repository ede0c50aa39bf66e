//! Scene configuration.

use arbor_core::ConfigError;
use glam::Vec2;

/// Options for a scene.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneOptions {
    /// Size of the window or surface the scene is laid out in
    pub viewport: Vec2,
    /// Log a warning whenever a node resolves to an inverted or non-finite rect
    pub warn_on_degenerate: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(800.0, 600.0),
            warn_on_degenerate: true,
        }
    }
}

impl SceneOptions {
    /// Set the viewport size.
    pub fn with_viewport(mut self, viewport: Vec2) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_warn_on_degenerate(mut self, warn: bool) -> Self {
        self.warn_on_degenerate = warn;
        self
    }

    /// Check that the options describe a usable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_viewport(self.viewport)
    }

    /// Load options from JSON, filling missing fields with defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let options: SceneOptions =
            serde_json::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

pub(crate) fn validate_viewport(viewport: Vec2) -> Result<(), ConfigError> {
    if !viewport.is_finite() || viewport.min_element() < 0.0 {
        return Err(ConfigError::InvalidViewport {
            width: viewport.x,
            height: viewport.y,
        });
    }
    Ok(())
}
