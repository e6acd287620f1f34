//! # Pool
//!
//! Ordered, growable storage of recycled entities.
//!
//! Entities live in a `Vec` in creation order and are never removed while the
//! pool lives. Acquisition is a linear free-scan, so selection is
//! deterministic: the first free entity by creation order always wins. The
//! ordered-prefix operation relies on this ("row i" is always entity i).
//!
//! # Thread Safety
//!
//! A pool is NOT thread-safe. Use [`SharedPool`](crate::SharedPool) to share
//! one across threads.

use std::any::{type_name, Any};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::PooledEntity;
use crate::error::{PoolError, PoolResult};
use crate::template::{SharedTemplate, Template};

/// Handle to one entity of one pool.
///
/// The index is the entity's creation order, which is stable for the
/// lifetime of the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    index: usize,
}

impl PoolHandle {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position of the entity in creation order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Policy for instances already present in a container at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleExistingChildren {
    /// Keep every pre-existing instance.
    AdoptAll,
    /// Keep only instances the liveness predicate accepts; drop the rest.
    #[default]
    AdoptActiveOnly,
    /// Drop every pre-existing instance up front.
    DiscardAll,
}

/// Snapshot of pool occupancy and starvation counters, for size tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Entities owned by the pool.
    pub total: usize,
    /// Entities currently checked out.
    pub in_use: usize,
    /// Entities available for acquisition.
    pub free: usize,
    /// Acquisitions that found no free entity.
    pub starved: u64,
    /// Starved acquisitions resolved by growing the pool.
    pub grown: u64,
}

/// A pool of recycled entities built from one template.
pub struct Pool<T> {
    /// Grouping name, used in diagnostics.
    container: String,
    /// Blueprint for new entities.
    template: SharedTemplate<T>,
    /// Every entity ever created or adopted, in creation order.
    entities: Vec<T>,
    /// Starved acquisitions.
    starved: u64,
    /// Starved acquisitions that grew the pool.
    grown: u64,
}

impl<T: PooledEntity> Pool<T> {
    /// Creates an empty pool.
    ///
    /// # Arguments
    ///
    /// * `container` - Grouping name reported in diagnostics
    /// * `template` - Factory for new entities
    #[must_use]
    pub fn new(container: impl Into<String>, template: impl Template<T> + 'static) -> Self {
        Self::with_shared_template(container, Arc::new(template))
    }

    /// Creates an empty pool around an already shared template.
    #[must_use]
    pub fn with_shared_template(container: impl Into<String>, template: SharedTemplate<T>) -> Self {
        Self {
            container: container.into(),
            template,
            entities: Vec::new(),
            starved: 0,
            grown: 0,
        }
    }

    /// Grouping name of this pool.
    #[inline]
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Number of entities owned, free or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the pool owns no entity yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Instantiates one entity, runs `init_once`, appends it. Returns its index.
    fn instantiate(&mut self) -> usize {
        let mut entity = self.template.instantiate();
        entity.init_once();
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Populates the pool, adopting instances already present in the container.
    ///
    /// Kept children are appended in their original order without
    /// `init_once`, then the pool is topped up from the template to
    /// `target_size`, then every entity is released. The pool may end up larger
    /// than `target_size` when more children were adopted.
    ///
    /// # Arguments
    ///
    /// * `target_size` - Minimum number of entities after the call
    /// * `existing` - The container's current children, type-erased
    /// * `mode` - Which children to keep
    /// * `is_active` - Liveness predicate used by [`HandleExistingChildren::AdoptActiveOnly`]
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::MissingEntityCapability`] if a child that would be
    /// inspected is not a `T`. Nothing is added to the pool in that case.
    pub fn init_checking_existing_children<F>(
        &mut self,
        target_size: usize,
        existing: Vec<Box<dyn Any>>,
        mode: HandleExistingChildren,
        is_active: F,
    ) -> PoolResult<()>
    where
        T: 'static,
        F: Fn(&T) -> bool,
    {
        let mut adopted = Vec::new();

        if mode == HandleExistingChildren::DiscardAll {
            if !existing.is_empty() {
                tracing::debug!(
                    "Pool '{}' discarding {} pre-existing children",
                    self.container,
                    existing.len()
                );
            }
            drop(existing);
        } else {
            adopted.reserve(existing.len());
            for (index, child) in existing.into_iter().enumerate() {
                match child.downcast::<T>() {
                    Ok(entity) => adopted.push(*entity),
                    Err(_) => {
                        tracing::error!(
                            "Pool '{}': child {} is not a pooled {}",
                            self.container,
                            index,
                            type_name::<T>()
                        );
                        return Err(PoolError::MissingEntityCapability {
                            container: self.container.clone(),
                            index,
                            expected: type_name::<T>(),
                        });
                    }
                }
            }

            if mode == HandleExistingChildren::AdoptActiveOnly {
                let before = adopted.len();
                adopted.retain(|entity| is_active(entity));
                if adopted.len() < before {
                    tracing::debug!(
                        "Pool '{}' dropped {} inactive pre-existing children",
                        self.container,
                        before - adopted.len()
                    );
                }
            }
        }

        let adopted_count = adopted.len();
        if adopted_count > target_size {
            tracing::debug!(
                "Pool '{}' adopted {} children, more than the target size {}",
                self.container,
                adopted_count,
                target_size
            );
        }
        self.entities.extend(adopted);

        let missing = target_size.saturating_sub(self.entities.len());
        self.entities.reserve(missing);
        for _ in 0..missing {
            self.instantiate();
        }

        for entity in &mut self.entities {
            entity.release();
        }

        tracing::debug!(
            "Pool '{}' initialized: {} adopted, {} created, {} total",
            self.container,
            adopted_count,
            missing,
            self.entities.len()
        );
        Ok(())
    }

    /// Acquires the first free entity in creation order.
    ///
    /// When every entity is in use the pool either grows by exactly one
    /// entity (`grow_on_starvation`) and logs a warning, or returns `None`.
    pub fn acquire_free_entity(&mut self, grow_on_starvation: bool) -> Option<PoolHandle> {
        if let Some(handle) = self.acquire_first_free() {
            return Some(handle);
        }

        self.starved += 1;
        if !grow_on_starvation {
            tracing::debug!(
                "Pool '{}' starved: all {} entities in use",
                self.container,
                self.entities.len()
            );
            return None;
        }
        Some(self.grow_and_acquire())
    }

    /// Acquires the first free entity, growing by one when starved.
    pub fn acquire_or_grow(&mut self) -> PoolHandle {
        match self.acquire_first_free() {
            Some(handle) => handle,
            None => {
                self.starved += 1;
                self.grow_and_acquire()
            }
        }
    }

    fn acquire_first_free(&mut self) -> Option<PoolHandle> {
        let index = self.entities.iter().position(|entity| !entity.is_in_use())?;
        self.entities[index].acquire();
        Some(PoolHandle::new(index))
    }

    fn grow_and_acquire(&mut self) -> PoolHandle {
        let index = self.instantiate();
        self.entities[index].acquire();
        self.grown += 1;
        tracing::warn!(
            "Pool '{}' starved: grew to {} entities. Consider a larger initial size",
            self.container,
            self.entities.len()
        );
        PoolHandle::new(index)
    }

    /// Makes exactly the first `count` entities in use and releases the rest.
    ///
    /// Grows unconditionally to at least `count` entities. The result does not
    /// depend on which entities were in use before the call.
    pub fn acquire_only_first_entities(&mut self, count: usize) -> &mut [T] {
        while self.entities.len() < count {
            self.instantiate();
        }

        for (index, entity) in self.entities.iter_mut().enumerate() {
            if index < count {
                if !entity.is_in_use() {
                    entity.acquire();
                }
            } else if entity.is_in_use() {
                entity.release();
            }
        }

        &mut self.entities[..count]
    }

    /// Returns true if any entity is checked out.
    #[must_use]
    pub fn any_in_use(&self) -> bool {
        self.entities.iter().any(|entity| entity.is_in_use())
    }

    /// Number of entities checked out.
    #[must_use]
    pub fn count_in_use(&self) -> usize {
        self.entities.iter().filter(|entity| entity.is_in_use()).count()
    }

    /// Number of free entities.
    #[must_use]
    pub fn count_free(&self) -> usize {
        self.len() - self.count_in_use()
    }

    /// Lazily yields the entities currently in use, in creation order.
    pub fn objects_in_use(&self) -> impl Iterator<Item = &T> + '_ {
        self.entities.iter().filter(|entity| entity.is_in_use())
    }

    /// Lazily yields handles of the entities currently in use.
    pub fn handles_in_use(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.is_in_use())
            .map(|(index, _)| PoolHandle::new(index))
    }

    /// Lazily yields the entities in use, mutably. Entities may release
    /// themselves through this iterator.
    pub fn objects_in_use_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entities.iter_mut().filter(|entity| entity.is_in_use())
    }

    /// Iterates over every entity in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entities.iter()
    }

    /// Iterates mutably over every entity in creation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entities.iter_mut()
    }

    /// Releases every entity that is in use.
    pub fn release_all_objects(&mut self) {
        for entity in self.entities.iter_mut().filter(|entity| entity.is_in_use()) {
            entity.release();
        }
    }

    /// Releases one entity. Returns whether it was in use.
    ///
    /// Releasing a free entity or an unknown handle changes nothing.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        match self.entities.get_mut(handle.index) {
            Some(entity) if entity.is_in_use() => {
                entity.release();
                true
            }
            _ => false,
        }
    }

    /// Entity at `index` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get_object(&self, index: usize) -> PoolResult<&T> {
        self.entities.get(index).ok_or(PoolError::IndexOutOfBounds {
            index,
            len: self.entities.len(),
        })
    }

    /// Mutable entity at `index` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get_object_mut(&mut self, index: usize) -> PoolResult<&mut T> {
        let len = self.entities.len();
        self.entities
            .get_mut(index)
            .ok_or(PoolError::IndexOutOfBounds { index, len })
    }

    /// Entity behind a handle.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.entities.get(handle.index)
    }

    /// Mutable entity behind a handle.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.entities.get_mut(handle.index)
    }

    /// Occupancy and starvation counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let in_use = self.count_in_use();
        PoolStats {
            total: self.entities.len(),
            in_use,
            free: self.entities.len() - in_use,
            starved: self.starved,
            grown: self.grown,
        }
    }
}
