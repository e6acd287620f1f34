//! # Multi Pool Manager
//!
//! One manager, one independently sized pool per template key. Loading many
//! effect kinds does not need one manager declaration per kind.

use std::collections::BTreeMap;

use crate::bootstrap::PoolService;
use crate::config::MultiPoolConfig;
use crate::entity::PooledEntity;
use crate::error::{PoolError, PoolResult};
use crate::pool::{HandleExistingChildren, Pool, PoolHandle};
use crate::template::TemplateSource;

/// Registry of pools keyed by template identity.
///
/// Keys iterate in sorted order.
pub struct MultiPoolManager<T> {
    name: String,
    config: MultiPoolConfig,
    pools: BTreeMap<String, Pool<T>>,
    /// `None` once initialized.
    source: Option<Box<dyn TemplateSource<T>>>,
}

impl<T: PooledEntity + 'static> MultiPoolManager<T> {
    /// Constructs the manager around the source it will enumerate at
    /// initialization.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: MultiPoolConfig,
        source: impl TemplateSource<T> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            pools: BTreeMap::new(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds one pool per `(key, template)` listed by the source, each sized
    /// to `pool_size_per_key`.
    ///
    /// # Errors
    ///
    /// [`PoolError::AlreadyInitialized`] on a second call,
    /// [`PoolError::InvalidConfig`] if `pool_size_per_key` is 0,
    /// [`PoolError::DuplicateKey`] if the source lists a key twice. No pool is
    /// registered when an error is returned.
    pub fn initialize(&mut self) -> PoolResult<()> {
        let source = self
            .source
            .take()
            .ok_or_else(|| PoolError::AlreadyInitialized(self.name.clone()))?;
        self.config.validate()?;

        let mut pools = BTreeMap::new();
        for (key, template) in source.list_templates() {
            if pools.contains_key(&key) {
                tracing::error!("Multi pool '{}': duplicate template key '{}'", self.name, key);
                return Err(PoolError::DuplicateKey(key));
            }
            let mut pool = Pool::with_shared_template(key.clone(), template);
            pool.init_checking_existing_children(
                self.config.pool_size_per_key,
                Vec::new(),
                HandleExistingChildren::DiscardAll,
                |_| true,
            )?;
            pools.insert(key, pool);
        }

        tracing::debug!("Multi pool '{}' initialized {} keys", self.name, pools.len());
        self.pools = pools;
        Ok(())
    }

    /// Returns true once [`initialize`](Self::initialize) has run, even if it failed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.source.is_none()
    }

    /// Acquires a free entity from the pool registered under `key`.
    ///
    /// An unknown key is logged as an error and yields `None`, like starvation.
    pub fn acquire_free_object(&mut self, key: &str) -> Option<PoolHandle> {
        match self.try_acquire_free_object(key) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!("Multi pool '{}': {}", self.name, err);
                None
            }
        }
    }

    /// Like [`acquire_free_object`](Self::acquire_free_object), but reports an
    /// unknown key to the caller instead of logging it.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownKey`] if no pool is registered under `key`.
    pub fn try_acquire_free_object(&mut self, key: &str) -> PoolResult<Option<PoolHandle>> {
        let grow = self.config.grow_on_starvation;
        let pool = self
            .pools
            .get_mut(key)
            .ok_or_else(|| PoolError::UnknownKey(key.to_owned()))?;
        Ok(pool.acquire_free_entity(grow))
    }

    /// Releases one entity of the `key` pool. Returns whether it was in use.
    pub fn release(&mut self, key: &str, handle: PoolHandle) -> bool {
        self.pools
            .get_mut(key)
            .is_some_and(|pool| pool.release(handle))
    }

    /// Entity behind a handle of the `key` pool.
    #[must_use]
    pub fn get(&self, key: &str, handle: PoolHandle) -> Option<&T> {
        self.pools.get(key)?.get(handle)
    }

    /// Mutable entity behind a handle of the `key` pool.
    pub fn get_mut(&mut self, key: &str, handle: PoolHandle) -> Option<&mut T> {
        self.pools.get_mut(key)?.get_mut(handle)
    }

    /// Returns true if any pool has any entity in use.
    #[must_use]
    pub fn any_in_use(&self) -> bool {
        self.pools.values().any(|pool| pool.any_in_use())
    }

    /// Lazily yields `(key, entity)` for every entity in use, key by key.
    pub fn objects_in_use(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.pools
            .iter()
            .flat_map(|(key, pool)| pool.objects_in_use().map(move |entity| (key.as_str(), entity)))
    }

    /// Lazily yields `(key, entity)` for every entity in use, mutably.
    pub fn objects_in_use_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> + '_ {
        self.pools.iter_mut().flat_map(|(key, pool)| {
            pool.objects_in_use_mut()
                .map(move |entity| (key.as_str(), entity))
        })
    }

    /// Releases every entity of every pool.
    pub fn release_all_objects(&mut self) {
        for pool in self.pools.values_mut() {
            pool.release_all_objects();
        }
    }

    /// The pool registered under `key`.
    #[must_use]
    pub fn pool(&self, key: &str) -> Option<&Pool<T>> {
        self.pools.get(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.pools.keys().map(String::as_str)
    }
}

impl<T: PooledEntity + 'static> PoolService for MultiPoolManager<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> PoolResult<()> {
        MultiPoolManager::initialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateLibrary;
    use crate::testing::{probe_template, Probe};

    fn effects(grow_on_starvation: bool) -> MultiPoolManager<Probe> {
        let library = TemplateLibrary::<Probe>::new()
            .with("spark", probe_template())
            .with("smoke", probe_template());
        let config = MultiPoolConfig {
            pool_size_per_key: 2,
            grow_on_starvation,
        };
        let mut manager = MultiPoolManager::new("effects", config, library);
        manager.initialize().unwrap();
        manager
    }

    #[test]
    fn test_one_pool_per_key() {
        let manager = effects(false);
        let keys: Vec<&str> = manager.keys().collect();
        assert_eq!(keys, ["smoke", "spark"]);
        assert_eq!(manager.pool("spark").unwrap().len(), 2);
        assert_eq!(manager.pool("smoke").unwrap().len(), 2);
    }

    #[test]
    fn test_pools_are_independent() {
        let mut manager = effects(false);
        assert!(manager.acquire_free_object("spark").is_some());
        assert!(manager.acquire_free_object("spark").is_some());
        assert!(manager.acquire_free_object("spark").is_none());
        assert!(manager.acquire_free_object("smoke").is_some());
        assert_eq!(manager.objects_in_use().filter(|(key, _)| *key == "spark").count(), 2);
    }

    #[test]
    fn test_unknown_key() {
        let mut manager = effects(false);
        assert!(manager.acquire_free_object("confetti").is_none());
        assert_eq!(
            manager.try_acquire_free_object("confetti"),
            Err(PoolError::UnknownKey("confetti".into()))
        );
        assert!(!manager.any_in_use());
    }

    #[test]
    fn test_growth_opt_in() {
        let mut manager = effects(true);
        for _ in 0..3 {
            assert!(manager.acquire_free_object("smoke").is_some());
        }
        assert_eq!(manager.pool("smoke").unwrap().len(), 3);
        assert_eq!(manager.pool("spark").unwrap().len(), 2);
    }

    #[test]
    fn test_release_and_any_in_use() {
        let mut manager = effects(false);
        let handle = manager.acquire_free_object("smoke").unwrap();
        assert!(manager.any_in_use());
        assert!(manager.get("smoke", handle).unwrap().is_in_use());

        assert!(manager.release("smoke", handle));
        assert!(!manager.release("spark", handle));
        assert!(!manager.any_in_use());

        manager.acquire_free_object("spark");
        manager.release_all_objects();
        assert!(!manager.any_in_use());
    }

    #[test]
    fn test_zero_per_key_rejected() {
        let library = TemplateLibrary::<Probe>::new().with("spark", probe_template());
        let config = MultiPoolConfig {
            pool_size_per_key: 0,
            grow_on_starvation: true,
        };
        let mut manager = MultiPoolManager::new("effects", config, library);

        assert!(!manager.is_initialized());
        assert!(matches!(manager.initialize(), Err(PoolError::InvalidConfig(_))));
        assert!(manager.is_initialized());
        assert_eq!(manager.keys().count(), 0);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let library = TemplateLibrary::<Probe>::new()
            .with("spark", probe_template())
            .with("spark", probe_template());
        let mut manager = MultiPoolManager::new("effects", MultiPoolConfig::default(), library);

        assert_eq!(manager.initialize(), Err(PoolError::DuplicateKey("spark".into())));
        assert_eq!(manager.keys().count(), 0);
        assert!(matches!(manager.initialize(), Err(PoolError::AlreadyInitialized(_))));
    }
}
