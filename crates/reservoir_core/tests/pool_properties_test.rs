//! Integration tests for the pool's lifecycle guarantees.

use std::any::Any;
use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reservoir_core::{
    HandleExistingChildren, Occupancy, Pool, PoolConfig, PoolHandle, PooledEntity, SinglePoolManager,
};

#[derive(Debug, Default)]
struct Bullet {
    serial: u32,
    visible: bool,
    occupancy: Occupancy,
}

impl PooledEntity for Bullet {
    fn is_in_use(&self) -> bool {
        self.occupancy.is_in_use()
    }

    fn acquire(&mut self) {
        self.occupancy.acquire();
        self.visible = true;
    }

    fn release(&mut self) {
        self.occupancy.release();
        self.visible = false;
    }
}

fn bullet_pool(size: usize) -> Pool<Bullet> {
    let mut pool = Pool::new("bullets", Bullet::default);
    pool.init_checking_existing_children(size, Vec::new(), HandleExistingChildren::AdoptAll, |_| true)
        .unwrap();
    pool
}

#[test]
fn test_capacity_is_monotonic_and_grows_only_when_full() {
    let mut pool = bullet_pool(4);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut held: Vec<PoolHandle> = Vec::new();

    for _ in 0..2_000 {
        let before = pool.len();
        if held.is_empty() || rng.gen_range(0..3) != 0 {
            let all_in_use = pool.count_free() == 0;
            held.push(pool.acquire_free_entity(true).unwrap());
            let after = pool.len();
            assert!(after >= before);
            assert_eq!(after > before, all_in_use);
        } else {
            let victim = held.swap_remove(rng.gen_range(0..held.len()));
            assert!(pool.release(victim));
            assert_eq!(pool.len(), before);
        }
    }
}

#[test]
fn test_exclusive_checkout() {
    let mut pool = bullet_pool(32);
    let handles: HashSet<PoolHandle> = (0..32).map(|_| pool.acquire_free_entity(false).unwrap()).collect();
    assert_eq!(handles.len(), 32);
    assert!(pool.acquire_free_entity(false).is_none());
}

#[test]
fn test_ordered_prefix_regardless_of_prior_state() {
    let mut pool = bullet_pool(8);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..50 {
        // Random prior occupancy.
        for index in 0..pool.len() {
            let handle = pool.handles_in_use().find(|h| h.index() == index);
            if rng.gen_bool(0.5) {
                if let Some(handle) = handle {
                    pool.release(handle);
                }
            } else if handle.is_none() {
                pool.get_object_mut(index).unwrap().acquire();
            }
        }

        let k = rng.gen_range(0..12_usize);
        assert_eq!(pool.acquire_only_first_entities(k).len(), k);
        for index in 0..pool.len() {
            assert_eq!(pool.get_object(index).unwrap().is_in_use(), index < k);
        }
    }
}

#[test]
fn test_release_of_free_entity_changes_nothing() {
    let mut pool = bullet_pool(3);
    let handle = pool.acquire_free_entity(false).unwrap();
    pool.release(handle);
    let before = pool.stats();

    assert!(!pool.release(handle));
    pool.release_all_objects();
    assert_eq!(pool.stats(), before);
}

#[test]
fn test_adopt_all_prepends_existing_in_order() {
    let existing: Vec<Box<dyn Any>> = (0..2)
        .map(|serial| {
            let mut bullet = Bullet {
                serial: 900 + serial,
                ..Bullet::default()
            };
            bullet.acquire();
            Box::new(bullet) as Box<dyn Any>
        })
        .collect();

    let mut pool: Pool<Bullet> = Pool::new("bullets", Bullet::default);
    pool.init_checking_existing_children(5, existing, HandleExistingChildren::AdoptAll, |b| b.visible)
        .unwrap();

    let serials: Vec<u32> = pool.iter().map(|b| b.serial).collect();
    assert_eq!(serials, [900, 901, 0, 0, 0]);
    assert!(!pool.any_in_use());
}

#[test]
fn test_starvation_policies() {
    let mut strict = bullet_pool(2);
    strict.acquire_free_entity(false).unwrap();
    strict.acquire_free_entity(false).unwrap();
    assert!(strict.acquire_free_entity(false).is_none());

    let mut growing = bullet_pool(2);
    let a = growing.acquire_free_entity(true).unwrap();
    let b = growing.acquire_free_entity(true).unwrap();
    let c = growing.acquire_free_entity(true).unwrap();
    assert_eq!(growing.len(), 3);
    assert!(c != a && c != b);
}

#[test]
fn test_manager_end_to_end() {
    let config = PoolConfig {
        initial_size: 3,
        grow_on_starvation: false,
        existing_children: HandleExistingChildren::DiscardAll,
    };
    let mut manager: SinglePoolManager<Bullet> = SinglePoolManager::new(config, Bullet::default);
    manager.initialize().unwrap();

    let first: Vec<PoolHandle> = (0..3).map(|_| manager.acquire_free_object().unwrap()).collect();
    let distinct: HashSet<PoolHandle> = first.iter().copied().collect();
    assert_eq!(distinct.len(), 3);
    assert!(manager.acquire_free_object().is_none());

    manager.release(first[0]);
    assert_eq!(manager.acquire_free_object(), Some(first[0]));
    assert_eq!(manager.objects_in_use().count(), 3);
    assert!(manager.objects_in_use().all(|bullet| bullet.visible));
}
