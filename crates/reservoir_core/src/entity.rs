//! # Pooled Entity Contract
//!
//! Every object managed by a [`Pool`](crate::Pool) is in exactly one of two
//! states:
//!
//! ```text
//!         init_once()
//!  (none) ----------> Free
//!                       | acquire()
//!                       v
//!                     InUse
//!                       | release()
//!                       v
//!                     Free  (loops)
//! ```
//!
//! The pool owns creation. The entity only tracks its own occupancy.

/// Capability every pooled object must implement.
///
/// Most implementors embed an [`Occupancy`] and delegate to it.
///
/// # Example
///
/// ```rust,ignore
/// struct Spark { occupancy: Occupancy, life: f32 }
///
/// impl PooledEntity for Spark {
///     fn is_in_use(&self) -> bool { self.occupancy.is_in_use() }
///     fn acquire(&mut self) { self.occupancy.acquire(); self.life = 1.0; }
///     fn release(&mut self) { self.occupancy.release(); }
/// }
/// ```
pub trait PooledEntity {
    /// Minimum pool size this entity type asks for.
    ///
    /// `0` means no override. A positive value takes precedence over the
    /// size configured on a [`SinglePoolManager`](crate::SinglePoolManager).
    const POOL_SIZE_OVERRIDE: usize = 0;

    /// Construct-time setup.
    ///
    /// Called exactly once per instance created from a template. Adopted
    /// pre-existing instances are never re-initialized.
    fn init_once(&mut self) {}

    /// Returns true while the entity is checked out.
    fn is_in_use(&self) -> bool;

    /// Transition Free -> InUse.
    ///
    /// Acquiring an entity that is already in use is caller misuse.
    fn acquire(&mut self);

    /// Transition InUse -> Free.
    ///
    /// Releasing a free entity must be a no-op.
    fn release(&mut self);
}

/// Free/InUse flag with the contract's debug checks built in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    in_use: bool,
}

impl Occupancy {
    /// A free occupancy flag.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { in_use: false }
    }

    /// Returns true while checked out.
    #[inline]
    #[must_use]
    pub const fn is_in_use(self) -> bool {
        self.in_use
    }

    /// Marks the flag in use. Debug builds assert it was free.
    #[inline]
    pub fn acquire(&mut self) {
        debug_assert!(!self.in_use, "acquired an entity that is already in use");
        self.in_use = true;
    }

    /// Marks the flag free. Idempotent.
    #[inline]
    pub fn release(&mut self) {
        self.in_use = false;
    }
}
