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
    fifo_queue_base::FifoQueueBase,
    functor::{
        MemcpyPop, MemcpyPush, SemaphoreFunctor, SemaphoreTryWait, SemaphoreTryWaitFor,
        SemaphoreTryWaitUntil, SemaphoreWait,
    },
    storage::QueueStorage,
};
use crate::{
    error::{code, Error},
    time::{TickDuration, TickInstant},
};
use core::{alloc::Layout, ptr::NonNull};

/// FIFO queue of opaque, trivially copyable elements. The element size is
/// fixed at construction; every buffer handed to push/pop must match it
/// exactly, checked before any semaphore is touched.
///
/// Blocking and timed variants must not be called from interrupt context;
/// the `try_*` variants may.
pub struct RawFifoQueue {
    base: FifoQueueBase,
}

impl RawFifoQueue {
    pub(crate) fn with_storage(
        storage: QueueStorage,
        element_size: usize,
        capacity: usize,
    ) -> Self {
        Self {
            base: FifoQueueBase::new(storage, element_size, capacity),
        }
    }

    /// Builds a queue over caller-provided storage; the buffer is released
    /// by the caller, not the queue. Capacity is however many elements fit.
    pub fn from_storage(storage: &'static mut [u8], element_size: usize) -> Result<Self, Error> {
        if element_size == 0 {
            return Err(code::EINVAL);
        }
        let capacity = storage.len() / element_size;
        if capacity == 0 {
            return Err(code::EINVAL);
        }
        let layout = Layout::from_size_align(capacity * element_size, 1)
            .map_err(|_| code::EINVAL)?;
        // SAFETY: the 'static borrow is exclusive and outlives the queue.
        let storage = unsafe {
            QueueStorage::from_raw(NonNull::new_unchecked(storage.as_mut_ptr()), layout)
        };
        Ok(Self::with_storage(storage, element_size, capacity))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.base.element_size()
    }

    pub fn push(&self, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreWait, data)
    }

    pub fn try_push(&self, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWait, data)
    }

    pub fn try_push_for(&self, duration: TickDuration, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitFor { duration }, data)
    }

    pub fn try_push_until(&self, deadline: TickInstant, data: &[u8]) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitUntil { deadline }, data)
    }

    pub fn pop(&self, buffer: &mut [u8]) -> Result<(), Error> {
        self.pop_internal(&SemaphoreWait, buffer)
    }

    pub fn try_pop(&self, buffer: &mut [u8]) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWait, buffer)
    }

    pub fn try_pop_for(&self, duration: TickDuration, buffer: &mut [u8]) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWaitFor { duration }, buffer)
    }

    pub fn try_pop_until(&self, deadline: TickInstant, buffer: &mut [u8]) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWaitUntil { deadline }, buffer)
    }

    fn push_internal(&self, wait: &dyn SemaphoreFunctor, data: &[u8]) -> Result<(), Error> {
        if data.len() != self.base.element_size() {
            return Err(code::EMSGSIZE);
        }
        let mut functor = MemcpyPush { data };
        self.base.push(wait, &mut functor)
    }

    fn pop_internal(&self, wait: &dyn SemaphoreFunctor, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.len() != self.base.element_size() {
            return Err(code::EMSGSIZE);
        }
        let mut functor = MemcpyPop { buffer };
        self.base.pop(wait, &mut functor)
    }
}
