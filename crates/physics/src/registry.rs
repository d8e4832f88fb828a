//! The set of live colliders that toric queries run against.
//!
//! The registry is passed by reference into every query.  Queries only read
//! it; callers serialize mutation against querying, typically by updating
//! once per simulation tick.
use log::*;
use slab::Slab;

use crate::*;

/// Identifies a collider in the registry that issued it.
///
/// Handles are never reused: once a collider is unregistered its handle stops
/// resolving, even if the slot is handed out again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ColliderHandle {
    key: usize,
    generation: u64,
    registry_tag: usize,
}

#[derive(Debug)]
struct Entry {
    shape: Shape,
    generation: u64,
}

#[derive(Debug)]
pub struct ColliderRegistry {
    colliders: Slab<Entry>,
    next_generation: u64,
    /// Used to reject handles from other registries.
    registry_tag: usize,
}

fn get_registry_tag() -> usize {
    use std::sync::atomic::*;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

impl ColliderRegistry {
    pub fn new() -> ColliderRegistry {
        ColliderRegistry {
            colliders: Slab::new(),
            next_generation: 0,
            registry_tag: get_registry_tag(),
        }
    }

    pub fn register(&mut self, shape: impl Into<Shape>) -> ColliderHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        let key = self.colliders.insert(Entry {
            shape: shape.into(),
            generation,
        });
        debug!("Registered collider {} (generation {})", key, generation);
        ColliderHandle {
            key,
            generation,
            registry_tag: self.registry_tag,
        }
    }

    fn entry(&self, handle: ColliderHandle) -> Option<&Entry> {
        if handle.registry_tag != self.registry_tag {
            return None;
        }
        self.colliders
            .get(handle.key)
            .filter(|e| e.generation == handle.generation)
    }

    /// Remove a collider, returning its shape.  Stale handles return `None`.
    pub fn unregister(&mut self, handle: ColliderHandle) -> Option<Shape> {
        self.entry(handle)?;
        let entry = self.colliders.try_remove(handle.key)?;
        debug!("Unregistered collider {}", handle.key);
        Some(entry.shape)
    }

    pub fn get(&self, handle: ColliderHandle) -> Option<&Shape> {
        self.entry(handle).map(|e| &e.shape)
    }

    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Shape> {
        self.entry(handle)?;
        self.colliders.get_mut(handle.key).map(|e| &mut e.shape)
    }

    /// Every registered collider, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Shape)> + '_ {
        let registry_tag = self.registry_tag;
        self.colliders.iter().map(move |(key, e)| {
            (
                ColliderHandle {
                    key,
                    generation: e.generation,
                    registry_tag,
                },
                &e.shape,
            )
        })
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} colliders", self.colliders.len());
        self.colliders.clear();
    }
}

impl Default for ColliderRegistry {
    fn default() -> ColliderRegistry {
        ColliderRegistry::new()
    }
}
