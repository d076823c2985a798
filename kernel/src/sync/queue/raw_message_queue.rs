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
    functor::{
        MemcpyPop, MemcpyPush, SemaphoreFunctor, SemaphoreTryWait, SemaphoreTryWaitFor,
        SemaphoreTryWaitUntil, SemaphoreWait,
    },
    message_queue_base::{Entry, EntryStorage, MessageQueueBase},
    storage::QueueStorage,
};
use crate::{
    error::{code, Error},
    time::{TickDuration, TickInstant},
};
use core::{alloc::Layout, ptr::NonNull};

/// Priority queue of opaque, trivially copyable elements. Pops return the
/// oldest element of the highest priority along with that priority. Size
/// mismatches are rejected with `EMSGSIZE` before the queue is touched.
pub struct RawMessageQueue {
    base: MessageQueueBase,
}

impl RawMessageQueue {
    pub(crate) fn with_storage(
        entries: EntryStorage,
        values: QueueStorage,
        element_size: usize,
        capacity: usize,
    ) -> Self {
        Self {
            base: MessageQueueBase::new(entries, values, element_size, capacity),
        }
    }

    /// Builds a queue over caller-provided entry and value storage; both
    /// outlive the queue and are released by the caller.
    pub fn from_storage(
        entries: &'static mut [Entry],
        values: &'static mut [u8],
        element_size: usize,
    ) -> Result<Self, Error> {
        if element_size == 0 {
            return Err(code::EINVAL);
        }
        let capacity = values.len() / element_size;
        if capacity == 0 || entries.len() != capacity || u16::try_from(capacity).is_err() {
            return Err(code::EINVAL);
        }
        let layout = Layout::from_size_align(capacity * element_size, 1)
            .map_err(|_| code::EINVAL)?;
        // SAFETY: the 'static borrow is exclusive and outlives the queue.
        let values = unsafe {
            QueueStorage::from_raw(NonNull::new_unchecked(values.as_mut_ptr()), layout)
        };
        Ok(Self::with_storage(
            EntryStorage::Borrowed(entries),
            values,
            element_size,
            capacity,
        ))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.base.element_size()
    }

    pub fn push(&self, priority: u8, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreWait, priority, data)
    }

    pub fn try_push(&self, priority: u8, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWait, priority, data)
    }

    pub fn try_push_for(
        &self,
        duration: TickDuration,
        priority: u8,
        data: &[u8],
    ) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitFor { duration }, priority, data)
    }

    pub fn try_push_until(
        &self,
        deadline: TickInstant,
        priority: u8,
        data: &[u8],
    ) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitUntil { deadline }, priority, data)
    }

    /// On success returns the priority of the popped element.
    pub fn pop(&self, buffer: &mut [u8]) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreWait, buffer)
    }

    pub fn try_pop(&self, buffer: &mut [u8]) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWait, buffer)
    }

    pub fn try_pop_for(&self, duration: TickDuration, buffer: &mut [u8]) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWaitFor { duration }, buffer)
    }

    pub fn try_pop_until(&self, deadline: TickInstant, buffer: &mut [u8]) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWaitUntil { deadline }, buffer)
    }

    fn push_internal(
        &self,
        wait: &dyn SemaphoreFunctor,
        priority: u8,
        data: &[u8],
    ) -> Result<(), Error> {
        if data.len() != self.base.element_size() {
            return Err(code::EMSGSIZE);
        }
        let mut functor = MemcpyPush { data };
        self.base.push(wait, priority, &mut functor)
    }

    fn pop_internal(&self, wait: &dyn SemaphoreFunctor, buffer: &mut [u8]) -> Result<u8, Error> {
        if buffer.len() != self.base.element_size() {
            return Err(code::EMSGSIZE);
        }
        let mut functor = MemcpyPop { buffer };
        self.base.pop(wait, &mut functor)
    }
}
