//! Fixed-capacity entity pools
//!
//! Slots are preallocated at construction; acquire fills the first free slot
//! and never allocates. Handles carry a generation so a handle kept past its
//! release never resolves to the slot's next occupant.

use serde::{Deserialize, Serialize};

/// Reference to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity pool of one entity kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    active: usize,
}

impl<T> Pool<T> {
    /// Create a pool with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot {
            generation: 0,
            value: None,
        });
        Self { slots, active: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Place `value` in the first inactive slot, or `None` if every slot is in use
    pub fn acquire(&mut self, value: T) -> Option<Handle> {
        let index = self.slots.iter().position(|s| s.value.is_none())?;
        let slot = &mut self.slots[index];
        slot.value = Some(value);
        self.active += 1;
        Some(Handle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Mark the slot inactive. Returns false if the handle was already released.
    pub fn release(&mut self, handle: Handle) -> bool {
        match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation && slot.value.is_some() => {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_mut())
    }

    /// Active entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.value.as_mut().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation,
                    },
                    v,
                )
            })
        })
    }

    /// Release every active entity matching `pred`; returns how many were released
    pub fn release_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut released = 0;
        for slot in &mut self.slots {
            if slot.value.as_ref().is_some_and(&mut pred) {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                released += 1;
            }
        }
        self.active -= released;
        released
    }

    /// Release everything (new game)
    pub fn clear(&mut self) -> usize {
        self.release_where(|_| true)
    }
}
