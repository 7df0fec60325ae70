//! Fixed-capacity entity pools with swap-remove.
//!
//! Live entries occupy `[0, len)`. Slots past `len` hold default records and
//! are never observed through the public API. Spawning into a full pool is a
//! silent no-op: the caller gets `None` and the pool is untouched.

use std::collections::HashMap;

use arena_core::components::{Bullet, Enemy};
use arena_core::types::EnemyId;

/// Dense, fixed-capacity array of records plus a live count.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Box<[T]>,
    len: usize,
}

impl<T: Default> Pool<T> {
    /// Allocate all `capacity` slots up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
            len: 0,
        }
    }

    /// Append at the end of the live range. Returns the slot, or `None` when full.
    pub fn push(&mut self, item: T) -> Option<usize> {
        if self.is_full() {
            tracing::trace!(capacity = self.capacity(), "pool full, spawn dropped");
            return None;
        }
        let index = self.len;
        self.slots[index] = item;
        self.len += 1;
        Some(index)
    }

    /// Remove the entry at `index` by moving the last live entry into its slot.
    ///
    /// The vacated last slot is reset to `T::default()`. Entries after
    /// `index` keep their slots except the former last one.
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let last = self.len - 1;
        self.slots.swap(index, last);
        let removed = std::mem::take(&mut self.slots[last]);
        self.len = last;
        Some(removed)
    }

    /// Remove every slot in `indices`, highest first, and clear the list.
    ///
    /// Going from the highest slot down means the entry swapped into a
    /// removed slot is never itself pending removal. Duplicates and
    /// out-of-range slots are ignored. Returns the number removed.
    pub fn remove_indices(&mut self, indices: &mut Vec<usize>) -> usize {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        indices
            .drain(..)
            .filter_map(|i| self.swap_remove(i))
            .count()
    }

    /// Drop all live entries.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = T::default();
        }
        self.len = 0;
    }
}

impl<T> Pool<T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots[..self.len]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

pub type BulletPool = Pool<Bullet>;

/// Enemy pool with a stable id for every live enemy.
///
/// Keeps an `EnemyId -> slot` map in step with every swap so callers that
/// only hold ids (the spatial index) can find the enemy after compaction.
#[derive(Debug, Clone)]
pub struct EnemyPool {
    pool: Pool<Enemy>,
    slots: HashMap<EnemyId, usize>,
    next_id: u32,
}

impl EnemyPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: Pool::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Assign a fresh id and append. `None` when full; no id is consumed then.
    pub fn spawn(&mut self, mut enemy: Enemy) -> Option<EnemyId> {
        if self.pool.is_full() {
            tracing::trace!(capacity = self.capacity(), "enemy pool full, spawn dropped");
            return None;
        }
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        enemy.id = id;
        let slot = self.pool.push(enemy)?;
        self.slots.insert(id, slot);
        Some(id)
    }

    pub fn slot_of(&self, id: EnemyId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.slot_of(id).and_then(|slot| self.pool.get(slot))
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        let slot = self.slot_of(id)?;
        self.pool.get_mut(slot)
    }

    /// Swap-remove the enemy in `slot`, re-pointing the moved enemy's id.
    pub fn remove_slot(&mut self, slot: usize) -> Option<Enemy> {
        let removed = self.pool.swap_remove(slot)?;
        self.slots.remove(&removed.id);
        if let Some(moved) = self.pool.get(slot) {
            self.slots.insert(moved.id, slot);
        }
        Some(removed)
    }

    /// Remove every slot in `slots`, highest first, appending the removed
    /// enemies to `removed`. Clears `slots`.
    pub fn remove_slots(&mut self, slots: &mut Vec<usize>, removed: &mut Vec<Enemy>) {
        slots.sort_unstable_by(|a, b| b.cmp(a));
        slots.dedup();
        for slot in slots.drain(..) {
            if let Some(enemy) = self.remove_slot(slot) {
                removed.push(enemy);
            }
        }
    }

    /// Remove every enemy. Ids keep counting up.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.pool.is_full()
    }

    pub fn as_slice(&self) -> &[Enemy] {
        self.pool.as_slice()
    }

    /// Mutable view of the live enemies. Callers must not change `id`.
    pub fn as_mut_slice(&mut self) -> &mut [Enemy] {
        self.pool.as_mut_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Enemy> {
        self.pool.iter()
    }

    /// The id map, for invariant checks.
    pub(crate) fn slot_map(&self) -> &HashMap<EnemyId, usize> {
        &self.slots
    }
}
