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

struct Ring {
    storage: QueueStorage,
    // next slot to pop / next free slot to push into
    read_index: usize,
    write_index: usize,
}

/// Fixed-capacity ring of raw slots. Element-size-agnostic: the per-slot
/// operation comes in as a functor and runs while the ring lock pins the
/// cursor. `push_semaphore` counts free slots, `pop_semaphore` occupied
/// ones; their sum is the capacity whenever the queue is at rest.
pub(crate) struct FifoQueueBase {
    // its value equals the number of available elements
    pop_semaphore: Semaphore,
    // its value equals the number of free slots
    push_semaphore: Semaphore,
    ring: SpinLock<Ring>,
    element_size: usize,
    capacity: usize,
}

impl FifoQueueBase {
    pub fn new(storage: QueueStorage, element_size: usize, capacity: usize) -> Self {
        Self {
            pop_semaphore: Semaphore::new(0, capacity),
            push_semaphore: Semaphore::new(capacity, capacity),
            ring: SpinLock::new(Ring {
                storage,
                read_index: 0,
                write_index: 0,
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
        functor: &mut dyn QueueFunctor,
    ) -> Result<(), Error> {
        wait.wait_on(&self.push_semaphore)?;
        {
            let mut ring = self.ring.irqsave_lock();
            let index = ring.write_index;
            // SAFETY: holding a push_semaphore token means this slot is free
            // and no other producer is positioned on it.
            unsafe {
                let slot = ring.storage.as_ptr().add(index * self.element_size);
                functor.operate(slot);
            }
            ring.write_index = if index + 1 == self.capacity {
                0
            } else {
                index + 1
            };
        }
        self.pop_semaphore.post()
    }

    pub fn pop(
        &self,
        wait: &dyn SemaphoreFunctor,
        functor: &mut dyn QueueFunctor,
    ) -> Result<(), Error> {
        wait.wait_on(&self.pop_semaphore)?;
        {
            let mut ring = self.ring.irqsave_lock();
            let index = ring.read_index;
            // SAFETY: holding a pop_semaphore token means this slot holds a
            // constructed element and no other consumer is positioned on it.
            unsafe {
                let slot = ring.storage.as_ptr().add(index * self.element_size);
                functor.operate(slot);
            }
            ring.read_index = if index + 1 == self.capacity {
                0
            } else {
                index + 1
            };
        }
        self.push_semaphore.post()
    }

    #[cfg(test)]
    pub fn semaphore_values(&self) -> (usize, usize) {
        (self.pop_semaphore.value(), self.push_semaphore.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::queue::functor::{MemcpyPop, MemcpyPush, SemaphoreTryWait};
    use core::alloc::Layout;

    fn small_queue() -> FifoQueueBase {
        let storage = QueueStorage::dynamic(Layout::array::<u32>(3).unwrap()).unwrap();
        FifoQueueBase::new(storage, core::mem::size_of::<u32>(), 3)
    }

    #[test]
    fn test_semaphore_pairing_invariant() {
        let queue = small_queue();
        let (pop, push) = queue.semaphore_values();
        assert_eq!(pop + push, queue.capacity());

        let data = 0x11u32.to_ne_bytes();
        let mut functor = MemcpyPush { data: &data };
        queue.push(&SemaphoreTryWait, &mut functor).unwrap();

        let (pop, push) = queue.semaphore_values();
        assert_eq!(pop, 1);
        assert_eq!(push, 2);
        assert_eq!(pop + push, queue.capacity());
    }

    #[test]
    fn test_cursors_wrap() {
        let queue = small_queue();
        for round in 0u32..7 {
            let data = round.to_ne_bytes();
            let mut push = MemcpyPush { data: &data };
            queue.push(&SemaphoreTryWait, &mut push).unwrap();

            let mut buffer = [0u8; 4];
            let mut pop = MemcpyPop {
                buffer: &mut buffer,
            };
            queue.pop(&SemaphoreTryWait, &mut pop).unwrap();
            assert_eq!(u32::from_ne_bytes(buffer), round);
        }
        let (pop, push) = queue.semaphore_values();
        assert_eq!((pop, push), (0, 3));
    }
}
