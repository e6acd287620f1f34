//! # Ordered Pool Container
//!
//! A pool bound to one layout root, for dynamically sized lists such as save
//! slot menus: "show exactly the first N rows, hide the rest".
//!
//! Unlike the managers it is not scope-wide, and it always grows on demand.
//! These pools back UI that must exist, so an unplanned size increase beats a
//! missing row.

use std::any::Any;

use crate::bootstrap::PoolService;
use crate::config::OrderedPoolConfig;
use crate::entity::PooledEntity;
use crate::error::{PoolError, PoolResult};
use crate::manager::PendingChildren;
use crate::pool::{Pool, PoolHandle};
use crate::template::Template;

/// Pool whose entity `i` backs list position `i`.
pub struct OrderedPoolContainer<T> {
    config: OrderedPoolConfig,
    pool: Pool<T>,
    /// `None` once initialized.
    pending: Option<PendingChildren<T>>,
}

impl<T: PooledEntity + 'static> OrderedPoolContainer<T> {
    /// Constructs a container for the layout root named `container`.
    #[must_use]
    pub fn new(
        container: impl Into<String>,
        config: OrderedPoolConfig,
        template: impl Template<T> + 'static,
    ) -> Self {
        Self {
            config,
            pool: Pool::new(container, template),
            pending: Some(PendingChildren::none()),
        }
    }

    /// Wires rows already placed under the layout root.
    ///
    /// Ignored with a warning once the container is initialized.
    #[must_use]
    pub fn with_existing_children(
        mut self,
        children: Vec<Box<dyn Any>>,
        is_active: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        match self.pending.as_mut() {
            Some(pending) => *pending = PendingChildren::new(children, is_active),
            None => tracing::warn!(
                "Ordered pool '{}' already initialized; existing children ignored",
                self.pool.container()
            ),
        }
        self
    }

    /// Populates the pool to the configured initial size.
    ///
    /// # Errors
    ///
    /// [`PoolError::AlreadyInitialized`] on a second call, or the adoption
    /// error of [`Pool::init_checking_existing_children`].
    pub fn initialize(&mut self) -> PoolResult<()> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| PoolError::AlreadyInitialized(self.pool.container().to_owned()))?;
        pending.populate(&mut self.pool, self.config.initial_size, self.config.existing_children)
    }

    /// Returns true once [`initialize`](Self::initialize) has run, even if it failed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.pending.is_none()
    }

    /// Makes exactly the first `count` entities in use, releasing the rest.
    pub fn acquire_only_first_objects(&mut self, count: usize) -> &mut [T] {
        self.pool.acquire_only_first_entities(count)
    }

    /// Acquires any free entity, growing if needed.
    pub fn acquire_free_object(&mut self) -> PoolHandle {
        self.pool.acquire_or_grow()
    }

    /// Number of entities owned, in use or not.
    #[must_use]
    pub fn count_all_objects(&self) -> usize {
        self.pool.len()
    }

    /// Entity at list position `index`.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfBounds`] past the last entity.
    pub fn get_object(&self, index: usize) -> PoolResult<&T> {
        self.pool.get_object(index)
    }

    /// Mutable entity behind a handle.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.pool.get_mut(handle)
    }

    /// Releases one entity. Returns whether it was in use.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        self.pool.release(handle)
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
}

impl<T: PooledEntity + 'static> PoolService for OrderedPoolContainer<T> {
    fn name(&self) -> &str {
        self.pool.container()
    }

    fn initialize(&mut self) -> PoolResult<()> {
        OrderedPoolContainer::initialize(self)
    }
}
