//! # Pool Managers
//!
//! Long-lived owners that give the rest of the game one point of access to a
//! pool. They are plain values, constructed once at startup and passed by
//! reference; there is no global accessor.
//!
//! - [`SinglePoolManager`]: one pool of one entity type
//! - [`MultiPoolManager`]: one pool per template key

mod multi;
mod single;

use std::any::Any;

pub use multi::MultiPoolManager;
pub use single::SinglePoolManager;

use crate::entity::PooledEntity;
use crate::error::PoolResult;
use crate::pool::{HandleExistingChildren, Pool};

/// Children wired at construction, consumed by initialization.
pub(crate) struct PendingChildren<T> {
    children: Vec<Box<dyn Any>>,
    is_active: Box<dyn Fn(&T) -> bool>,
}

impl<T: PooledEntity + 'static> PendingChildren<T> {
    /// No pre-existing children.
    pub(crate) fn none() -> Self {
        Self::new(Vec::new(), |_: &T| true)
    }

    pub(crate) fn new(children: Vec<Box<dyn Any>>, is_active: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            children,
            is_active: Box::new(is_active),
        }
    }

    /// Populates `pool` from these children plus its template.
    pub(crate) fn populate(
        self,
        pool: &mut Pool<T>,
        target_size: usize,
        mode: HandleExistingChildren,
    ) -> PoolResult<()> {
        pool.init_checking_existing_children(target_size, self.children, mode, self.is_active)
    }
}
