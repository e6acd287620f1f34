//! Test fixtures shared by the unit tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::entity::{Occupancy, PooledEntity};
use crate::pool::Pool;

/// Pooled entity that records how it was built.
#[derive(Debug)]
pub(crate) struct Probe {
    pub(crate) id: u32,
    pub(crate) active: bool,
    pub(crate) init_calls: u32,
    occupancy: Occupancy,
}

impl Probe {
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id,
            active: true,
            init_calls: 0,
            occupancy: Occupancy::new(),
        }
    }

    /// An instance placed in a container ahead of time. Starts in use so
    /// tests can see initialization release it.
    pub(crate) fn preexisting(id: u32, active: bool) -> Self {
        let mut probe = Self::new(id);
        probe.active = active;
        probe.occupancy.acquire();
        probe
    }
}

impl PooledEntity for Probe {
    fn init_once(&mut self) {
        self.init_calls += 1;
    }

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

/// Template producing probes with ids 0, 1, 2, ...
pub(crate) fn probe_template() -> impl Fn() -> Probe + Send + Sync + 'static {
    let next = Arc::new(AtomicU32::new(0));
    move || Probe::new(next.fetch_add(1, Ordering::Relaxed))
}

/// Empty pool of probes.
pub(crate) fn probe_pool(container: &str) -> Pool<Probe> {
    Pool::new(container, probe_template())
}
