//! # Pool Configuration
//!
//! Sizing and policy for pool owners, loaded once at startup from TOML.
//!
//! ```toml
//! initial_size = 16
//! grow_on_starvation = false
//! existing_children = "adopt_active_only"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};
use crate::pool::HandleExistingChildren;

/// Configuration of a [`SinglePoolManager`](crate::SinglePoolManager).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Entities created at initialization, unless the entity type overrides it.
    pub initial_size: usize,
    /// Grow by one entity when every entity is in use.
    pub grow_on_starvation: bool,
    /// What to do with instances already present in the container.
    pub existing_children: HandleExistingChildren,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 8,
            grow_on_starvation: false,
            existing_children: HandleExistingChildren::AdoptActiveOnly,
        }
    }
}

impl PoolConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] on malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> PoolResult<Self> {
        let config: Self = parse_toml(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the pool can ever hand out an entity.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] for a zero-sized pool that cannot grow.
    pub fn validate(&self) -> PoolResult<()> {
        if self.initial_size == 0 && !self.grow_on_starvation {
            return Err(PoolError::InvalidConfig(
                "initial_size is 0 and grow_on_starvation is disabled".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration of a [`MultiPoolManager`](crate::MultiPoolManager).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiPoolConfig {
    /// Entities created per template key.
    pub pool_size_per_key: usize,
    /// Grow a key's pool by one entity when it starves.
    pub grow_on_starvation: bool,
}

impl Default for MultiPoolConfig {
    fn default() -> Self {
        Self {
            pool_size_per_key: 4,
            grow_on_starvation: false,
        }
    }
}

impl MultiPoolConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] on malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> PoolResult<Self> {
        let config: Self = parse_toml(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty per-key pools.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `pool_size_per_key` is 0.
    pub fn validate(&self) -> PoolResult<()> {
        if self.pool_size_per_key == 0 {
            return Err(PoolError::InvalidConfig("pool_size_per_key must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration of an [`OrderedPoolContainer`](crate::OrderedPoolContainer).
///
/// Ordered containers always grow on demand, so there is no growth flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderedPoolConfig {
    /// Entities created at initialization.
    pub initial_size: usize,
    /// What to do with instances already present in the layout root.
    pub existing_children: HandleExistingChildren,
}

impl Default for OrderedPoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 4,
            existing_children: HandleExistingChildren::AdoptActiveOnly,
        }
    }
}

impl OrderedPoolConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] on malformed TOML.
    pub fn from_toml_str(source: &str) -> PoolResult<Self> {
        parse_toml(source)
    }
}

/// Shared TOML entry point; maps parse failures into [`PoolError::InvalidConfig`].
///
/// # Errors
///
/// Returns [`PoolError::InvalidConfig`] with the parser's message.
pub fn parse_toml<C: for<'de> Deserialize<'de>>(source: &str) -> PoolResult<C> {
    toml::from_str(source).map_err(|e| PoolError::InvalidConfig(e.to_string()))
}
