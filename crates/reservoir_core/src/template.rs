//! # Templates
//!
//! Blueprints that pools instantiate new entities from, and sources that
//! enumerate named blueprints for keyed pools.

use std::sync::Arc;

/// Factory capability: builds one fresh physical instance.
pub trait Template<T>: Send + Sync {
    /// Creates a new instance. `init_once` is called by the pool afterwards.
    fn instantiate(&self) -> T;
}

impl<T, F> Template<T> for F
where
    F: Fn() -> T + Send + Sync,
{
    #[inline]
    fn instantiate(&self) -> T {
        self()
    }
}

/// Shared, type-erased template.
pub type SharedTemplate<T> = Arc<dyn Template<T>>;

/// Enumeration capability used by [`MultiPoolManager`](crate::MultiPoolManager).
pub trait TemplateSource<T> {
    /// Lists every `(key, template)` pair, in a stable order.
    fn list_templates(&self) -> Vec<(String, SharedTemplate<T>)>;
}

/// In-process registry of named templates.
///
/// Keys keep their registration order.
pub struct TemplateLibrary<T> {
    entries: Vec<(String, SharedTemplate<T>)>,
}

impl<T> TemplateLibrary<T> {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a template under `key`.
    ///
    /// Duplicate keys are kept; the multi-pool manager rejects them at
    /// initialization.
    pub fn register(&mut self, key: impl Into<String>, template: impl Template<T> + 'static) {
        self.entries.push((key.into(), Arc::new(template)));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, template: impl Template<T> + 'static) -> Self {
        self.register(key, template);
        self
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TemplateLibrary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TemplateSource<T> for TemplateLibrary<T> {
    fn list_templates(&self) -> Vec<(String, SharedTemplate<T>)> {
        self.entries
            .iter()
            .map(|(key, template)| (key.clone(), Arc::clone(template)))
            .collect()
    }
}
