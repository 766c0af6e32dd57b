//! Built-in displayers
//!
//! Displayers turn the widget's view (percentage, scalar, color, orientation)
//! into something a user can look at.

mod bar;

use anyhow::Result;
use topic_bar_core::{global_registry, register_displayer, BoxedDisplayer};

pub use bar::{render_bar, BarDisplayer};

/// Register all built-in displayers with the global registry
pub fn register_all() {
    register_displayer!("text_bar", BarDisplayer);
}

/// Create a displayer by registered ID
pub fn create_displayer(id: &str) -> Result<BoxedDisplayer> {
    let displayer = global_registry()
        .read()
        .map_err(|_| anyhow::anyhow!("Registry lock poisoned"))?
        .create_displayer(id)?;
    Ok(displayer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_registered_displayer() {
        register_all();

        let displayer = create_displayer("text_bar").unwrap();
        assert_eq!(displayer.id(), "text_bar");
        assert!(create_displayer("lcars").is_err());
    }
}
