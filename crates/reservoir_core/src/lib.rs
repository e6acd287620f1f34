//! # RESERVOIR Core
//!
//! Recycling allocator for short-lived, heavyweight game objects: sound
//! effects, projectiles, visual effects, list rows.
//!
//! Instead of creating and destroying an object per use, a pool creates a
//! fixed set up front and hands them out through an explicit
//! acquire/release lifecycle.
//!
//! ## Architecture Rules
//!
//! 1. **Entities are recycled, never destroyed** - a pool only grows
//! 2. **Deterministic selection** - first free entity in creation order
//! 3. **Starvation is policy, not failure** - grow by one, or hand back `None`
//! 4. **No global state** - owners are plain values, initialized explicitly
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`PooledEntity`] | Contract every pooled object implements |
//! | [`Pool`] | Ordered entity storage and acquisition algorithms |
//! | [`SinglePoolManager`] | One pool of one entity type |
//! | [`MultiPoolManager`] | One pool per template key |
//! | [`OrderedPoolContainer`] | "First N in use" pool for list layouts |
//! | [`SharedPool`] | Mutex-guarded pool for multi-threaded hosts |
//! | [`Bootstrap`] | Ordered two-phase initialization |
//!
//! ## Example
//!
//! ```rust,ignore
//! use reservoir_core::{PoolConfig, SinglePoolManager};
//!
//! let mut sparks = SinglePoolManager::new(PoolConfig::default(), Spark::default);
//! sparks.initialize()?;
//!
//! let handle = sparks.acquire_free_object();  // None when starved
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bootstrap;
pub mod config;
pub mod entity;
pub mod error;
pub mod manager;
pub mod ordered;
pub mod pool;
pub mod sync;
pub mod template;

#[cfg(test)]
mod testing;

pub use bootstrap::{Bootstrap, BootstrapError, PoolService};
pub use config::{MultiPoolConfig, OrderedPoolConfig, PoolConfig};
pub use entity::{Occupancy, PooledEntity};
pub use error::{PoolError, PoolResult};
pub use manager::{MultiPoolManager, SinglePoolManager};
pub use ordered::OrderedPoolContainer;
pub use pool::{HandleExistingChildren, Pool, PoolHandle, PoolStats};
pub use sync::SharedPool;
pub use template::{SharedTemplate, Template, TemplateLibrary, TemplateSource};
