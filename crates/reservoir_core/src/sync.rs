//! # Shared Pool
//!
//! A [`Pool`] behind a mutex, for hosts that acquire and release from worker
//! threads. The free-scan and the state transition run under one lock, so
//! an entity is never handed to two acquirers before it is released.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::entity::PooledEntity;
use crate::pool::{Pool, PoolHandle, PoolStats};

/// Cloneable, thread-safe handle to one pool.
pub struct SharedPool<T> {
    inner: Arc<Mutex<Pool<T>>>,
}

impl<T> Clone for SharedPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PooledEntity> SharedPool<T> {
    /// Wraps an (usually initialized) pool.
    #[must_use]
    pub fn new(pool: Pool<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// See [`Pool::acquire_free_entity`].
    pub fn acquire_free_entity(&self, grow_on_starvation: bool) -> Option<PoolHandle> {
        self.inner.lock().acquire_free_entity(grow_on_starvation)
    }

    /// See [`Pool::release`].
    pub fn release(&self, handle: PoolHandle) -> bool {
        self.inner.lock().release(handle)
    }

    /// See [`Pool::release_all_objects`].
    pub fn release_all_objects(&self) {
        self.inner.lock().release_all_objects();
    }

    /// Runs `f` on the entity behind `handle` while holding the lock.
    ///
    /// The lock is not reentrant: calling back into this pool (or a clone of
    /// it) from `f` deadlocks.
    pub fn with_entity<R>(&self, handle: PoolHandle, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.lock().get_mut(handle).map(f)
    }

    /// Runs `f` on the whole pool while holding the lock.
    ///
    /// Same reentrancy rule as [`with_entity`](Self::with_entity).
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// See [`Pool::stats`].
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}
