//! Displayer trait

use anyhow::Result;
use serde_json::Value;

use crate::widget::BarView;

/// Trait for all displayers
///
/// Displayers own all visual concerns. They receive the widget's [`BarView`]
/// after every frame and render it into a text surface.
pub trait Displayer: Send {
    /// Unique identifier for this displayer type
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Update the displayer with the latest view
    fn update_view(&mut self, view: &BarView);

    /// Render into a `width` x `height` character cell area
    fn draw(&self, width: usize, height: usize) -> Result<String>;

    /// Apply displayer-specific configuration
    fn apply_config(&mut self, _config: &Value) -> Result<()> {
        Ok(())
    }

    /// Check if the displayer needs to be redrawn
    fn needs_redraw(&self) -> bool {
        true
    }
}

/// Type-erased displayer for dynamic dispatch
pub type BoxedDisplayer = Box<dyn Displayer>;
