//! Name → constructor table used to instantiate components generically.

use super::options::OptionsError;
use super::Component;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Builds a boxed component from caller-supplied options
pub type Constructor = fn(Value) -> Result<Box<dyn Component>, OptionsError>;

/// Components that can be built from JSON options
pub trait FromOptions: Component + Sized + 'static {
    fn from_options(options: Value) -> Result<Self, OptionsError>;
}

/// Generic constructor for any [`FromOptions`] component
pub fn construct<C: FromOptions>(options: Value) -> Result<Box<dyn Component>, OptionsError> {
    Ok(Box::new(C::from_options(options)?))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component '{0}' is already registered")]
    Duplicate(String),
}

#[derive(Default)]
pub struct Registry {
    entries: IndexMap<String, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in widget
    pub fn with_builtins() -> Self {
        use super::*;

        let mut registry = Self::new();
        let builtins: [(&str, Constructor); 23] = [
            ("button", construct::<Button>),
            ("card", construct::<Card>),
            ("breadcrumbs", construct::<Breadcrumbs>),
            ("progress", construct::<ProgressBar>),
            ("alert", construct::<Alert>),
            ("toast", construct::<Toast>),
            ("input", construct::<Input>),
            ("select", construct::<Select>),
            ("checkbox", construct::<Checkbox>),
            ("checkbox-group", construct::<CheckboxGroup>),
            ("radio", construct::<Radio>),
            ("radio-group", construct::<RadioGroup>),
            ("slider", construct::<Slider>),
            ("range-slider", construct::<RangeSlider>),
            ("tabs", construct::<Tabs>),
            ("accordion", construct::<Accordion>),
            ("pagination", construct::<Pagination>),
            ("modal", construct::<Modal>),
            ("dropdown", construct::<Dropdown>),
            ("tooltip", construct::<Tooltip>),
            ("table", construct::<Table>),
            ("carousel", construct::<Carousel>),
            ("copy-button", construct::<CopyButton>),
        ];
        for (name, ctor) in builtins {
            // names above are unique
            let _ = registry.register(name, ctor);
        }
        registry
    }

    /// Register a constructor. An existing registration is kept and the
    /// call fails.
    pub fn register(&mut self, name: &str, ctor: Constructor) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            warn!("Component '{}' is already registered, keeping the original", name);
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.entries.insert(name.to_string(), ctor);
        debug!("Registered component '{}'", name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.entries.get(name).copied()
    }

    /// Instantiate a component by name; `None` when the name is unknown or
    /// the options do not fit the component
    pub fn create(&self, name: &str, options: Value) -> Option<Box<dyn Component>> {
        let Some(ctor) = self.get(name) else {
            error!("Component '{}' not found", name);
            return None;
        };
        match ctor(options) {
            Ok(component) => Some(component),
            Err(e) => {
                error!("Failed to create component '{}': {}", name, e);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Button, Card};
    use serde_json::json;

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let mut registry = Registry::new();
        registry.register("widget", construct::<Button>).unwrap();
        let err = registry.register("widget", construct::<Card>).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("widget".to_string()));

        let widget = registry.create("widget", Value::Null).unwrap();
        assert_eq!(widget.name(), "button");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::with_builtins();
        assert!(registry.get("spinner").is_none());
        assert!(registry.create("spinner", json!({})).is_none());
    }

    #[test]
    fn test_bad_options_do_not_construct() {
        let registry = Registry::with_builtins();
        assert!(registry.create("button", json!("not an object")).is_none());
        assert!(registry.create("button", json!({ "disabled": "yes" })).is_none());
    }

    #[test]
    fn test_builtins_in_order() {
        let registry = Registry::with_builtins();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names.first(), Some(&"button"));
        assert_eq!(names.last(), Some(&"copy-button"));
        for name in names {
            let component = registry.create(name, Value::Null).unwrap();
            assert_eq!(component.name(), name);
        }
    }
}
