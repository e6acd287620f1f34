//! # Bootstrap
//!
//! Explicit, ordered initialization of pool owners.
//!
//! Owners are constructed first (wiring templates, configs and pre-existing
//! children), then registered here with an execution order and initialized
//! exactly once, lowest order first. Owners with the same order keep their
//! registration order.
//!
//! ```rust,ignore
//! let mut bootstrap = Bootstrap::new();
//! bootstrap.register(-10, &mut sound_effects);  // before anything that plays sounds
//! bootstrap.register(0, &mut save_slots);
//! bootstrap.run()?;
//! ```

use thiserror::Error;

use crate::error::PoolError;

/// An owner that populates its pool(s) in a separate initialization phase.
pub trait PoolService {
    /// Name reported in diagnostics and bootstrap errors.
    fn name(&self) -> &str;

    /// Populates the pool(s). Called exactly once by the bootstrap.
    ///
    /// # Errors
    ///
    /// Any configuration error found while populating.
    fn initialize(&mut self) -> Result<(), PoolError>;
}

/// A bootstrap stage that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("bootstrap stage '{stage}' (order {order}) failed: {source}")]
pub struct BootstrapError {
    /// Name of the failing service.
    pub stage: String,
    /// Its execution order.
    pub order: i32,
    /// What went wrong.
    pub source: PoolError,
}

/// Ordered list of services awaiting initialization.
#[derive(Default)]
pub struct Bootstrap<'a> {
    stages: Vec<(i32, &'a mut dyn PoolService)>,
}

impl<'a> Bootstrap<'a> {
    /// Creates an empty bootstrap.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Registers `service` to run at `order`.
    pub fn register(&mut self, order: i32, service: &'a mut dyn PoolService) -> &mut Self {
        self.stages.push((order, service));
        self
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Initializes every service, lowest order first.
    ///
    /// Stops at the first failure; later stages are not initialized.
    ///
    /// # Errors
    ///
    /// [`BootstrapError`] naming the failing stage.
    pub fn run(mut self) -> Result<(), BootstrapError> {
        self.stages.sort_by_key(|(order, _)| *order);

        for (order, service) in self.stages {
            tracing::debug!("Bootstrap: initializing '{}' (order {})", service.name(), order);
            service.initialize().map_err(|source| {
                tracing::error!("Bootstrap: '{}' failed: {}", service.name(), source);
                BootstrapError {
                    stage: service.name().to_owned(),
                    order,
                    source,
                }
            })?;
        }
        Ok(())
    }
}
