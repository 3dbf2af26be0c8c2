// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage shared by menus and items.

use alloc::vec::Vec;
use core::marker::PhantomData;

/// Keys produced by an [`Arena`].
pub(crate) trait ArenaKey: Copy {
    fn from_parts(idx: u32, generation: u32) -> Self;
    fn idx(self) -> usize;
    fn generation(self) -> u32;
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: T,
}

/// Slots are reused through a free list; the per-slot generation makes keys
/// to removed values stale instead of aliasing the new occupant.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Option<Slot<T>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    _key: PhantomData<K>,
}

impl<K, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            _key: PhantomData,
        }
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub(crate) fn insert(&mut self, value: T) -> K {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot { generation, value });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Ids use 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot { generation, value }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Ids use 32-bit indices by design."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        K::from_parts(idx, generation)
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        if !self.contains(key) {
            return None;
        }
        let slot = self.slots[key.idx()].take()?;
        self.free_list.push(key.idx());
        Some(slot.value)
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.idx()) {
            Some(Some(slot)) if slot.generation == key.generation() => Some(&slot.value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.idx()) {
            Some(Some(slot)) if slot.generation == key.generation() => Some(&mut slot.value),
            _ => None,
        }
    }

    /// Live keys in slot order.
    pub(crate) fn keys(&self) -> Vec<K> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let slot = slot.as_ref()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Ids use 32-bit indices by design."
                )]
                Some(K::from_parts(i as u32, slot.generation))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}
