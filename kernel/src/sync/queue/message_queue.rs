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
        CopyConstruct, DropPop, EmplaceConstruct, MoveConstruct, SemaphoreFunctor,
        SemaphoreTryWait, SemaphoreTryWaitFor, SemaphoreTryWaitUntil, SemaphoreWait, SwapPop,
    },
    message_queue_base::{Entry, EntryStorage, MessageQueueBase},
    storage::QueueStorage,
};
use crate::{
    error::{code, Error},
    time::{TickDuration, TickInstant},
};
use core::{alloc::Layout, marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

/// Priority queue generic over the element type. Each element carries a
/// `u8` priority, higher meaning more urgent; pops return the oldest element
/// of the highest priority together with that priority. Construction and
/// destruction discipline matches [`FifoQueue`](super::FifoQueue).
pub struct MessageQueue<T> {
    base: MessageQueueBase,
    _marker: PhantomData<T>,
}

// Slots only ever hold T values, moved in and out under the queue's locks.
unsafe impl<T: Send> Send for MessageQueue<T> {}
unsafe impl<T: Send> Sync for MessageQueue<T> {}

impl<T> MessageQueue<T> {
    pub(crate) fn with_storage(
        entries: EntryStorage,
        values: QueueStorage,
        capacity: usize,
    ) -> Self {
        Self {
            base: MessageQueueBase::new(entries, values, core::mem::size_of::<T>(), capacity),
            _marker: PhantomData,
        }
    }

    /// Builds a queue over caller-provided entry and value storage; both
    /// outlive the queue and are released by the caller.
    pub fn from_storage(
        entries: &'static mut [Entry],
        values: &'static mut [MaybeUninit<T>],
    ) -> Result<Self, Error> {
        let capacity = values.len();
        if capacity == 0 || entries.len() != capacity || u16::try_from(capacity).is_err() {
            return Err(code::EINVAL);
        }
        let layout = Layout::for_value(values);
        // SAFETY: the 'static borrows are exclusive, properly aligned and
        // outlive the queue.
        let values = unsafe {
            QueueStorage::from_raw(
                NonNull::new_unchecked(values.as_mut_ptr().cast::<u8>()),
                layout,
            )
        };
        Ok(Self::with_storage(
            EntryStorage::Borrowed(entries),
            values,
            capacity,
        ))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    /// Pushes by move, blocking while the queue is full.
    pub fn push(&self, priority: u8, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreWait, priority, value)
    }

    pub fn try_push(&self, priority: u8, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWait, priority, value)
    }

    pub fn try_push_for(
        &self,
        duration: TickDuration,
        priority: u8,
        value: T,
    ) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitFor { duration }, priority, value)
    }

    pub fn try_push_until(
        &self,
        deadline: TickInstant,
        priority: u8,
        value: T,
    ) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitUntil { deadline }, priority, value)
    }

    /// Pushes a clone of `value`, blocking while the queue is full.
    pub fn push_cloned(&self, priority: u8, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreWait, priority, value)
    }

    pub fn try_push_cloned(&self, priority: u8, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWait, priority, value)
    }

    pub fn try_push_cloned_for(
        &self,
        duration: TickDuration,
        priority: u8,
        value: &T,
    ) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWaitFor { duration }, priority, value)
    }

    pub fn try_push_cloned_until(
        &self,
        deadline: TickInstant,
        priority: u8,
        value: &T,
    ) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWaitUntil { deadline }, priority, value)
    }

    /// Constructs the element directly in the slot from `ctor`.
    pub fn emplace<F: FnOnce() -> T>(&self, priority: u8, ctor: F) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreWait, priority, ctor)
    }

    pub fn try_emplace<F: FnOnce() -> T>(&self, priority: u8, ctor: F) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWait, priority, ctor)
    }

    pub fn try_emplace_for<F: FnOnce() -> T>(
        &self,
        duration: TickDuration,
        priority: u8,
        ctor: F,
    ) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWaitFor { duration }, priority, ctor)
    }

    pub fn try_emplace_until<F: FnOnce() -> T>(
        &self,
        deadline: TickInstant,
        priority: u8,
        ctor: F,
    ) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWaitUntil { deadline }, priority, ctor)
    }

    /// Pops the oldest element of the highest priority: its value is swapped
    /// into `value`, the previous contents of `value` are destroyed, and the
    /// element's priority is returned.
    pub fn pop(&self, value: &mut T) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreWait, value)
    }

    pub fn try_pop(&self, value: &mut T) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWait, value)
    }

    pub fn try_pop_for(&self, duration: TickDuration, value: &mut T) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWaitFor { duration }, value)
    }

    pub fn try_pop_until(&self, deadline: TickInstant, value: &mut T) -> Result<u8, Error> {
        self.pop_internal(&SemaphoreTryWaitUntil { deadline }, value)
    }

    fn push_internal(
        &self,
        wait: &dyn SemaphoreFunctor,
        priority: u8,
        value: T,
    ) -> Result<(), Error> {
        let mut functor = MoveConstruct::new(value);
        self.base.push(wait, priority, &mut functor)
    }

    fn push_cloned_internal(
        &self,
        wait: &dyn SemaphoreFunctor,
        priority: u8,
        value: &T,
    ) -> Result<(), Error>
    where
        T: Clone,
    {
        let mut functor = CopyConstruct { value };
        self.base.push(wait, priority, &mut functor)
    }

    fn emplace_internal<F: FnOnce() -> T>(
        &self,
        wait: &dyn SemaphoreFunctor,
        priority: u8,
        ctor: F,
    ) -> Result<(), Error> {
        let mut functor = EmplaceConstruct::new(ctor);
        self.base.push(wait, priority, &mut functor)
    }

    fn pop_internal(&self, wait: &dyn SemaphoreFunctor, value: &mut T) -> Result<u8, Error> {
        let mut functor = SwapPop { value };
        self.base.pop(wait, &mut functor)
    }
}

impl<T> Drop for MessageQueue<T> {
    /// Destroys every element still in the queue, in place.
    fn drop(&mut self) {
        let mut functor = DropPop::<T>::new();
        while self.base.pop(&SemaphoreTryWait, &mut functor).is_ok() {}
    }
}
