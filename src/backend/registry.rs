//! Provider registry.
//!
//! Maps backend identifier strings to constructor functions. The host
//! application registers its providers once; the gate resolves the
//! configured identifier a single time at initialization and holds the
//! result purely as the [`StorageBackend`] capability, independent of
//! how it was built.

use crate::backend::{ArcBackend, StorageBackend};
use crate::core::GateError;

use std::collections::HashMap;
use std::sync::Arc;

/// A constructor for a storage backend.
///
/// Receives the provider's own configuration: the host's options object
/// with the gate's reserved keys already stripped.
pub type BackendFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<ArcBackend, GateError> + Send + Sync>;

/// A registry of storage provider factories.
///
/// # Examples
///
/// ```rust
/// use uploadgate::backend::{BackendRegistry, MemoryBackend};
/// use std::sync::Arc;
///
/// let registry = BackendRegistry::new().with_provider("memory", |_options| {
///     Ok(Arc::new(MemoryBackend::new()) as _)
/// });
///
/// assert!(registry.contains("memory"));
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    factories: HashMap<String, BackendFactory>,
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl BackendRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider factory under the given identifier,
    /// replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<ArcBackend, GateError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_provider<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<ArcBackend, GateError> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Returns `true` if a provider is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Constructs the provider registered under `name` with the given
    /// options.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] for an unknown identifier,
    /// or whatever the factory itself fails with.
    pub fn resolve(
        &self,
        name: &str,
        options: &serde_json::Value,
    ) -> Result<ArcBackend, GateError> {
        let factory = self.factories.get(name).ok_or_else(|| {
            GateError::configuration(format!("unknown upload provider '{name}'"))
        })?;
        factory(options)
    }
}

/// Convenience for registering a zero-configuration backend.
impl BackendRegistry {
    /// Registers a provider that ignores its options and clones a
    /// pre-built backend instance.
    pub fn with_instance<B: StorageBackend + 'static>(self, name: impl Into<String>, backend: Arc<B>) -> Self {
        self.with_provider(name, move |_options| Ok(Arc::clone(&backend) as ArcBackend))
    }
}
