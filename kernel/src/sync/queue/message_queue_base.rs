// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{
    functor::{QueueFunctor, SemaphoreFunctor},
    storage::QueueStorage,
};
use crate::{
    error::Error,
    sync::{Semaphore, SpinLock},
};
use alloc::boxed::Box;

/// Link node of the priority queue. Entry `i` is permanently bound to value
/// slot `i`; only the list membership changes at runtime.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    priority: u8,
    next: Option<u16>,
}

impl Entry {
    pub const fn new() -> Self {
        Self {
            priority: 0,
            next: None,
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) enum EntryStorage {
    Owned(Box<[Entry]>),
    Borrowed(&'static mut [Entry]),
}

impl EntryStorage {
    fn as_mut_slice(&mut self) -> &mut [Entry] {
        match self {
            EntryStorage::Owned(entries) => entries,
            EntryStorage::Borrowed(entries) => entries,
        }
    }
}

struct Lists {
    value_storage: QueueStorage,
    entries: EntryStorage,
    // free list, chained in ascending index order at construction
    free_head: Option<u16>,
    // occupied list, priority-descending, FIFO among equal priorities
    occupied_head: Option<u16>,
}

/// Priority-ordered queue core. Same paired-semaphore discipline as the FIFO
/// ring; the slots are tracked through two index-linked lists instead of a
/// pair of cursors. Insertion walks the occupied list; the walk is bounded
/// by the capacity and never allocates.
pub(crate) struct MessageQueueBase {
    pop_semaphore: Semaphore,
    push_semaphore: Semaphore,
    lists: SpinLock<Lists>,
    element_size: usize,
    capacity: usize,
}

impl MessageQueueBase {
    pub fn new(
        mut entries: EntryStorage,
        value_storage: QueueStorage,
        element_size: usize,
        capacity: usize,
    ) -> Self {
        let slice = entries.as_mut_slice();
        debug_assert_eq!(slice.len(), capacity);
        for (i, entry) in slice.iter_mut().enumerate() {
            *entry = Entry {
                priority: 0,
                next: if i + 1 < capacity {
                    Some((i + 1) as u16)
                } else {
                    None
                },
            };
        }
        Self {
            pop_semaphore: Semaphore::new(0, capacity),
            push_semaphore: Semaphore::new(capacity, capacity),
            lists: SpinLock::new(Lists {
                value_storage,
                entries,
                free_head: if capacity > 0 { Some(0) } else { None },
                occupied_head: None,
            }),
            element_size,
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn push(
        &self,
        wait: &dyn SemaphoreFunctor,
        priority: u8,
        functor: &mut dyn QueueFunctor,
    ) -> Result<(), Error> {
        wait.wait_on(&self.push_semaphore)?;
        {
            let mut guard = self.lists.irqsave_lock();
            let lists = &mut *guard;
            let slot_base = lists.value_storage.as_ptr();
            let entries = lists.entries.as_mut_slice();

            let Some(index) = lists.free_head else {
                unreachable!("free list empty while holding a push token");
            };
            lists.free_head = entries[usize::from(index)].next;

            // SAFETY: the push token guarantees this entry's value slot is
            // free, and the lock pins its address for the call.
            unsafe {
                let slot = slot_base.add(usize::from(index) * self.element_size);
                functor.operate(slot);
            }
            entries[usize::from(index)].priority = priority;

            // Walk past every entry of greater or equal priority, so equal
            // priorities pop in insertion order.
            let mut previous: Option<u16> = None;
            let mut current = lists.occupied_head;
            while let Some(cursor) = current {
                if entries[usize::from(cursor)].priority < priority {
                    break;
                }
                previous = Some(cursor);
                current = entries[usize::from(cursor)].next;
            }
            entries[usize::from(index)].next = current;
            match previous {
                None => lists.occupied_head = Some(index),
                Some(previous) => entries[usize::from(previous)].next = Some(index),
            }
        }
        self.pop_semaphore.post()
    }

    /// Pops the oldest entry of the highest priority; returns its priority.
    pub fn pop(
        &self,
        wait: &dyn SemaphoreFunctor,
        functor: &mut dyn QueueFunctor,
    ) -> Result<u8, Error> {
        wait.wait_on(&self.pop_semaphore)?;
        let priority;
        {
            let mut guard = self.lists.irqsave_lock();
            let lists = &mut *guard;
            let slot_base = lists.value_storage.as_ptr();
            let entries = lists.entries.as_mut_slice();

            let Some(index) = lists.occupied_head else {
                unreachable!("occupied list empty while holding a pop token");
            };
            lists.occupied_head = entries[usize::from(index)].next;
            priority = entries[usize::from(index)].priority;

            // SAFETY: the pop token guarantees this entry's value slot holds
            // a constructed element, and the lock pins its address.
            unsafe {
                let slot = slot_base.add(usize::from(index) * self.element_size);
                functor.operate(slot);
            }

            entries[usize::from(index)].next = lists.free_head;
            lists.free_head = Some(index);
        }
        self.push_semaphore.post()?;
        Ok(priority)
    }

    #[cfg(test)]
    pub fn semaphore_values(&self) -> (usize, usize) {
        (self.pop_semaphore.value(), self.push_semaphore.value())
    }
}
