//! Registry for message sources and displayers

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::data_source::BoxedMessageSource;
use crate::displayer::BoxedDisplayer;
use crate::error::{BarError, BarResult};

/// Function that creates a message source
pub type SourceFactory = fn() -> BoxedMessageSource;

/// Function that creates a displayer
pub type DisplayerFactory = fn() -> BoxedDisplayer;

/// Registry for message sources and displayers
///
/// Built-ins are registered at startup; lookups are by string id so the
/// choice can live in a config file.
pub struct Registry {
    sources: HashMap<String, SourceFactory>,
    displayers: HashMap<String, DisplayerFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            displayers: HashMap::new(),
        }
    }

    /// Register a message source
    pub fn register_source(&mut self, id: &str, factory: SourceFactory) {
        self.sources.insert(id.to_string(), factory);
    }

    /// Register a displayer
    pub fn register_displayer(&mut self, id: &str, factory: DisplayerFactory) {
        self.displayers.insert(id.to_string(), factory);
    }

    /// Create a message source by ID
    pub fn create_source(&self, id: &str) -> BarResult<BoxedMessageSource> {
        let factory = self
            .sources
            .get(id)
            .ok_or_else(|| BarError::UnknownSource(id.to_string()))?;
        Ok(factory())
    }

    /// Create a displayer by ID
    pub fn create_displayer(&self, id: &str) -> BarResult<BoxedDisplayer> {
        let factory = self
            .displayers
            .get(id)
            .ok_or_else(|| BarError::UnknownDisplayer(id.to_string()))?;
        Ok(factory())
    }

    /// List all registered source IDs, sorted
    pub fn list_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// List all registered displayer IDs, sorted
    pub fn list_displayers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.displayers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Get the global registry
pub fn global_registry() -> &'static RwLock<Registry> {
    &GLOBAL_REGISTRY
}

/// Macro to register a message source
#[macro_export]
macro_rules! register_source {
    ($id:expr, $type:ty) => {
        $crate::global_registry()
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .register_source($id, || Box::new(<$type>::default()));
    };
}

/// Macro to register a displayer
#[macro_export]
macro_rules! register_displayer {
    ($id:expr, $type:ty) => {
        $crate::global_registry()
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .register_displayer($id, || Box::new(<$type>::default()));
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::{MessageSource, SourceMetadata, SubscriptionHost};
    use anyhow::Result;
    use std::time::Duration;
    use topic_bar_types::{RenderState, Subscription, Topic};

    struct EmptySource {
        metadata: SourceMetadata,
    }

    impl Default for EmptySource {
        fn default() -> Self {
            Self {
                metadata: SourceMetadata {
                    id: "empty".to_string(),
                    name: "Empty".to_string(),
                    description: String::new(),
                    default_interval: Duration::from_millis(10),
                },
            }
        }
    }

    impl SubscriptionHost for EmptySource {
        fn subscribe(&mut self, _subscriptions: &[Subscription]) {}
    }

    impl MessageSource for EmptySource {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn topics(&self) -> Vec<Topic> {
            Vec::new()
        }

        fn next_frame(&mut self) -> Result<Option<RenderState>> {
            Ok(None)
        }
    }

    #[test]
    fn test_create_registered_source() {
        let mut registry = Registry::new();
        registry.register_source("empty", || Box::new(EmptySource::default()));
        registry.register_source("another", || Box::new(EmptySource::default()));

        let mut source = registry.create_source("empty").unwrap();
        assert_eq!(source.metadata().id, "empty");
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(registry.list_sources(), vec!["another", "empty"]);
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let registry = Registry::default();

        assert!(matches!(
            registry.create_source("mqtt"),
            Err(BarError::UnknownSource(id)) if id == "mqtt"
        ));
        assert!(matches!(
            registry.create_displayer("gauge"),
            Err(BarError::UnknownDisplayer(_))
        ));
        assert!(registry.list_displayers().is_empty());
    }
}
