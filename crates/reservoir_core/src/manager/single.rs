//! # Single Pool Manager
//!
//! Owns exactly one pool of one entity type.

use std::any::{type_name, Any};

use crate::bootstrap::PoolService;
use crate::config::PoolConfig;
use crate::entity::PooledEntity;
use crate::error::{PoolError, PoolResult};
use crate::manager::PendingChildren;
use crate::pool::{Pool, PoolHandle, PoolStats};
use crate::template::Template;

/// Scope-wide access point to the pool of one entity type.
///
/// Two-phase startup: [`new`](Self::new) wires the template and config,
/// [`initialize`](Self::initialize) populates the pool.
///
/// # Example
///
/// ```rust,ignore
/// let mut sounds = SinglePoolManager::new(config, || SoundEffect::default());
/// sounds.initialize()?;
///
/// if let Some(handle) = sounds.acquire_free_object() {
///     sounds.get_mut(handle).unwrap().play("explosion");
/// }
/// ```
pub struct SinglePoolManager<T> {
    config: PoolConfig,
    pool: Pool<T>,
    /// `None` once initialized.
    pending: Option<PendingChildren<T>>,
}

impl<T: PooledEntity + 'static> SinglePoolManager<T> {
    /// Constructs the manager. The pool stays empty until initialization.
    #[must_use]
    pub fn new(config: PoolConfig, template: impl Template<T> + 'static) -> Self {
        Self {
            config,
            pool: Pool::new(type_name::<T>(), template),
            pending: Some(PendingChildren::none()),
        }
    }

    /// Wires instances already present in the container, and the liveness
    /// predicate used to filter them.
    ///
    /// Ignored with a warning once the manager is initialized.
    #[must_use]
    pub fn with_existing_children(
        mut self,
        children: Vec<Box<dyn Any>>,
        is_active: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        match self.pending.as_mut() {
            Some(pending) => *pending = PendingChildren::new(children, is_active),
            None => tracing::warn!(
                "Pool '{}' already initialized; existing children ignored",
                self.pool.container()
            ),
        }
        self
    }

    /// Size the pool is populated to: the entity type's override if
    /// positive, otherwise the configured initial size.
    #[must_use]
    pub fn target_size(&self) -> usize {
        if T::POOL_SIZE_OVERRIDE > 0 {
            T::POOL_SIZE_OVERRIDE
        } else {
            self.config.initial_size
        }
    }

    /// Returns true once [`initialize`](Self::initialize) has run, even if it failed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.pending.is_none()
    }

    /// Populates the pool.
    ///
    /// # Errors
    ///
    /// [`PoolError::AlreadyInitialized`] on a second call,
    /// [`PoolError::InvalidConfig`] if the pool would be empty and may not
    /// grow, or the adoption error of [`Pool::init_checking_existing_children`].
    pub fn initialize(&mut self) -> PoolResult<()> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| PoolError::AlreadyInitialized(self.pool.container().to_owned()))?;
        let target_size = self.target_size();
        if target_size == 0 && !self.config.grow_on_starvation {
            tracing::error!("Pool '{}': size 0 without growth", self.pool.container());
            return Err(PoolError::InvalidConfig(format!(
                "pool '{}' has size 0 and grow_on_starvation is disabled",
                self.pool.container()
            )));
        }
        pending.populate(&mut self.pool, target_size, self.config.existing_children)
    }

    /// Acquires a free entity, growing by one if the config allows it.
    ///
    /// Returns `None` when the pool is starved and may not grow.
    pub fn acquire_free_object(&mut self) -> Option<PoolHandle> {
        debug_assert!(
            self.is_initialized(),
            "acquire on uninitialized pool '{}'",
            self.pool.container()
        );
        self.pool.acquire_free_entity(self.config.grow_on_starvation)
    }

    /// Releases one entity. Returns whether it was in use.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        self.pool.release(handle)
    }

    /// Entity behind a handle.
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.pool.get(handle)
    }

    /// Mutable entity behind a handle.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.pool.get_mut(handle)
    }

    /// Lazily yields the entities in use.
    pub fn objects_in_use(&self) -> impl Iterator<Item = &T> + '_ {
        self.pool.objects_in_use()
    }

    /// Lazily yields the entities in use, mutably.
    pub fn objects_in_use_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.pool.objects_in_use_mut()
    }

    /// Returns true if any entity is in use.
    #[must_use]
    pub fn any_in_use(&self) -> bool {
        self.pool.any_in_use()
    }

    /// Releases every entity in use.
    pub fn release_all_objects(&mut self) {
        self.pool.release_all_objects();
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<T> {
        &self.pool
    }

    /// The manager's configuration.
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Occupancy and starvation counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

impl<T: PooledEntity + 'static> PoolService for SinglePoolManager<T> {
    fn name(&self) -> &str {
        self.pool.container()
    }

    fn initialize(&mut self) -> PoolResult<()> {
        SinglePoolManager::initialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Occupancy;
    use crate::pool::HandleExistingChildren;
    use crate::testing::{probe_template, Probe};

    fn config(initial_size: usize, grow_on_starvation: bool) -> PoolConfig {
        PoolConfig {
            initial_size,
            grow_on_starvation,
            existing_children: HandleExistingChildren::AdoptActiveOnly,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(3, false), probe_template());
        manager.initialize().unwrap();

        let handles: Vec<PoolHandle> = (0..3).map(|_| manager.acquire_free_object().unwrap()).collect();
        assert_eq!(handles[0].index(), 0);
        assert_eq!(handles[1].index(), 1);
        assert_eq!(handles[2].index(), 2);
        assert!(manager.acquire_free_object().is_none());

        assert!(manager.release(handles[1]));
        assert_eq!(manager.acquire_free_object(), Some(handles[1]));

        let in_use: Vec<u32> = manager.objects_in_use().map(|probe| probe.id).collect();
        assert_eq!(in_use, [0, 1, 2]);
    }

    #[test]
    fn test_growth_follows_config() {
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(1, true), probe_template());
        manager.initialize().unwrap();

        manager.acquire_free_object().unwrap();
        manager.acquire_free_object().unwrap();
        assert_eq!(manager.pool().len(), 2);
        assert_eq!(manager.stats().grown, 1);
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(2, false), probe_template());
        manager.initialize().unwrap();
        assert!(matches!(manager.initialize(), Err(PoolError::AlreadyInitialized(_))));
        assert_eq!(manager.pool().len(), 2);
    }

    #[test]
    fn test_existing_children_adopted() {
        let children: Vec<Box<dyn Any>> = vec![
            Box::new(Probe::preexisting(100, true)),
            Box::new(Probe::preexisting(101, false)),
        ];
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(3, false), probe_template())
            .with_existing_children(children, |probe: &Probe| probe.active);
        manager.initialize().unwrap();

        assert_eq!(manager.pool().len(), 3);
        assert_eq!(manager.pool().get_object(0).unwrap().id, 100);
        assert!(!manager.any_in_use());
    }

    /// Entity type that asks for a bigger pool than configured.
    struct Crowd {
        occupancy: Occupancy,
    }

    impl PooledEntity for Crowd {
        const POOL_SIZE_OVERRIDE: usize = 50;

        fn is_in_use(&self) -> bool {
            self.occupancy.is_in_use()
        }

        fn acquire(&mut self) {
            self.occupancy.acquire();
        }

        fn release(&mut self) {
            self.occupancy.release();
        }
    }

    #[test]
    fn test_size_override_wins() {
        let mut manager: SinglePoolManager<Crowd> = SinglePoolManager::new(config(4, false), || Crowd {
            occupancy: Occupancy::new(),
        });
        assert_eq!(manager.target_size(), 50);

        manager.initialize().unwrap();
        assert_eq!(manager.pool().len(), 50);
    }

    #[test]
    fn test_existing_children_after_initialize_ignored() {
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(2, false), probe_template());
        manager.initialize().unwrap();

        let children: Vec<Box<dyn Any>> = vec![Box::new(Probe::preexisting(100, true))];
        let mut manager = manager.with_existing_children(children, |probe: &Probe| probe.active);

        assert_eq!(manager.pool().len(), 2);
        assert!(manager.pool().iter().all(|probe| probe.id < 100));
        assert!(matches!(manager.initialize(), Err(PoolError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_empty_pool_needs_growth() {
        let mut strict: SinglePoolManager<Probe> = SinglePoolManager::new(config(0, false), probe_template());
        assert!(matches!(strict.initialize(), Err(PoolError::InvalidConfig(_))));
        assert!(strict.pool().is_empty());

        let mut growing: SinglePoolManager<Probe> = SinglePoolManager::new(config(0, true), probe_template());
        growing.initialize().unwrap();
        assert!(growing.config().grow_on_starvation);
        assert!(growing.acquire_free_object().is_some());
        assert_eq!(growing.pool().len(), 1);
    }

    #[test]
    fn test_release_all() {
        let mut manager: SinglePoolManager<Probe> = SinglePoolManager::new(config(2, false), probe_template());
        manager.initialize().unwrap();
        manager.acquire_free_object();
        manager.acquire_free_object();

        manager.release_all_objects();
        assert!(!manager.any_in_use());
        assert!(manager.acquire_free_object().is_some());
    }
}
