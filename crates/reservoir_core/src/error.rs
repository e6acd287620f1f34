//! # Pool Error Types
//!
//! Configuration and caller errors raised by pools and their owners.
//!
//! Starvation is NOT an error: it is resolved by policy (grow by one, or hand
//! back `None`) and reported through diagnostics only.

use thiserror::Error;

/// Errors that can occur while building or querying pools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pre-existing child of a container does not implement the pooled
    /// entity contract for this pool.
    #[error("child {index} of container '{container}' is not a pooled {expected}")]
    MissingEntityCapability {
        /// The container being initialized.
        container: String,
        /// Position of the offending child in the container.
        index: usize,
        /// Type name the pool expected.
        expected: &'static str,
    },

    /// A keyed pool was requested that was never registered.
    #[error("no pool registered for key '{0}'")]
    UnknownKey(String),

    /// The template source listed the same key twice.
    #[error("duplicate template key '{0}'")]
    DuplicateKey(String),

    /// A pool owner was initialized twice.
    #[error("pool owner '{0}' is already initialized")]
    AlreadyInitialized(String),

    /// Index past the end of the pool.
    #[error("index {index} out of bounds for pool of {len} entities")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of entities in the pool.
        len: usize,
    },

    /// Invalid configuration file or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
