//! Fixed-capacity slot pools
//!
//! Entities live in a contiguous buffer of `N` slots tagged active/inactive.
//! Allocation is a first-fit scan; a full pool silently drops the request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pool entry that can be switched off for reuse
pub trait Slot: Default + Clone {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Deserialized pool had the wrong number of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizeError {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for PoolSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pool expects {} slots, found {}",
            self.expected, self.found
        )
    }
}

impl std::error::Error for PoolSizeError {}

/// Fixed-size arena of reusable slots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<T>",
    into = "Vec<T>",
    bound(serialize = "T: Slot + Serialize", deserialize = "T: Slot + Deserialize<'de>")
)]
pub struct Pool<T: Slot, const N: usize> {
    /// Always exactly `N` entries
    slots: Vec<T>,
}

impl<T: Slot, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slot, const N: usize> Pool<T, N> {
    /// Create a pool with every slot inactive
    pub fn new() -> Self {
        Self {
            slots: vec![T::default(); N],
        }
    }

    /// Number of slots
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Store `item` in the first inactive slot.
    ///
    /// Returns the slot index, or `None` when every slot is in use.
    pub fn allocate(&mut self, item: T) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.is_active())?;
        self.slots[index] = item;
        Some(index)
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// All slots in index order, active or not
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Active slots in index order, with their indices
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    /// Mutable active slots in index order, with their indices
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_active())
    }
}

impl<T: Slot, const N: usize> TryFrom<Vec<T>> for Pool<T, N> {
    type Error = PoolSizeError;

    fn try_from(slots: Vec<T>) -> Result<Self, Self::Error> {
        if slots.len() != N {
            return Err(PoolSizeError {
                expected: N,
                found: slots.len(),
            });
        }
        Ok(Self { slots })
    }
}

impl<T: Slot, const N: usize> From<Pool<T, N>> for Vec<T> {
    fn from(pool: Pool<T, N>) -> Self {
        pool.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Dummy {
        value: u32,
        active: bool,
    }

    impl Slot for Dummy {
        fn is_active(&self) -> bool {
            self.active
        }

        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    fn live(value: u32) -> Dummy {
        Dummy {
            value,
            active: true,
        }
    }

    #[test]
    fn test_allocate_first_fit() {
        let mut pool: Pool<Dummy, 4> = Pool::new();
        assert_eq!(pool.allocate(live(1)), Some(0));
        assert_eq!(pool.allocate(live(2)), Some(1));
        assert_eq!(pool.allocate(live(3)), Some(2));

        // Freed slot is reused before later ones
        pool.get_mut(1).unwrap().deactivate();
        assert_eq!(pool.allocate(live(4)), Some(1));
        assert_eq!(pool.get(1).unwrap().value, 4);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_full_pool_drops_silently() {
        let mut pool: Pool<Dummy, 2> = Pool::new();
        pool.allocate(live(1));
        pool.allocate(live(2));
        assert!(pool.is_full());
        assert_eq!(pool.allocate(live(3)), None);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.capacity(), 2);
        // Existing slots untouched
        let values: Vec<u32> = pool.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_clear_and_iter_active() {
        let mut pool: Pool<Dummy, 3> = Pool::new();
        pool.allocate(live(10));
        pool.allocate(live(20));
        pool.get_mut(0).unwrap().deactivate();

        let active: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
        assert_eq!(active, vec![1]);

        for (_, d) in pool.iter_active_mut() {
            d.value += 1;
        }
        assert_eq!(pool.get(1).unwrap().value, 21);

        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter().count(), 3);
    }

    #[test]
    fn test_deserialize_rejects_wrong_length() {
        let json = serde_json::to_string(&vec![Dummy::default(); 2]).unwrap();
        let err = serde_json::from_str::<Pool<Dummy, 3>>(&json).unwrap_err();
        assert!(err.to_string().contains("pool expects 3 slots, found 2"));

        let pool: Pool<Dummy, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(pool.capacity(), 2);
    }
}
