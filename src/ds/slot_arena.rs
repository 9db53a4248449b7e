//! Generation-checked storage for the bucket nodes.
//!
//! Nodes sit in a `Vec` of slots and are addressed by [`SlotId`]: the slot
//! position plus the generation the slot had when the node was stored. Bucket
//! lists and the key index hold `SlotId`s instead of references, so the
//! doubly-linked chains never form ownership cycles.
//!
//! A slot's generation advances whenever its occupant leaves. A handle kept
//! past removal therefore stops resolving, even after the slot is reused:
//!
//! ```
//! use freqcache::ds::SlotArena;
//!
//! let mut arena = SlotArena::new();
//! let old = arena.insert("a");
//! arena.remove(old);
//!
//! let new = arena.insert("c");
//! assert_eq!(new.index(), old.index());
//! assert_eq!(arena.get(old), None);
//! assert_eq!(arena.get(new), Some(&"c"));
//! ```

/// Handle to a stored value: slot position and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    /// Empties the slot and invalidates every handle issued for it.
    fn vacate(&mut self) -> Option<T> {
        let value = self.value.take()?;
        self.generation = self.generation.wrapping_add(1);
        Some(value)
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    vacant: Vec<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            occupied: 0,
        }
    }

    /// Stores `value`, preferring the most recently vacated slot.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        if let Some(index) = self.vacant.pop()
            && let Some(slot) = self.slots.get_mut(index)
        {
            slot.value = Some(value);
            return SlotId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        SlotId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Takes the value out of `id`'s slot. Stale or unknown ids yield `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.vacate()?;
        self.vacant.push(id.index);
        self.occupied -= 1;
        Some(value)
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value. Slots are kept so that earlier handles stay stale.
    pub fn clear(&mut self) {
        self.vacant.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.vacate();
            self.vacant.push(index);
        }
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
