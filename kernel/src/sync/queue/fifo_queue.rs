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
        CopyConstruct, DropPop, EmplaceConstruct, MoveConstruct, SemaphoreFunctor,
        SemaphoreTryWait, SemaphoreTryWaitFor, SemaphoreTryWaitUntil, SemaphoreWait, SwapPop,
    },
    storage::QueueStorage,
};
use crate::{
    error::{code, Error},
    time::{TickDuration, TickInstant},
};
use core::{alloc::Layout, marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

/// FIFO queue generic over the element type. Elements are constructed in
/// place on push (moved, cloned or emplaced) and handed back through a swap
/// on pop; whatever is still queued when the queue is dropped is destroyed.
///
/// Blocking and timed variants must not be called from interrupt context;
/// the `try_*` variants may.
pub struct FifoQueue<T> {
    base: FifoQueueBase,
    _marker: PhantomData<T>,
}

// Slots only ever hold T values, moved in and out under the queue's locks.
unsafe impl<T: Send> Send for FifoQueue<T> {}
unsafe impl<T: Send> Sync for FifoQueue<T> {}

impl<T> FifoQueue<T> {
    pub(crate) fn with_storage(storage: QueueStorage, capacity: usize) -> Self {
        Self {
            base: FifoQueueBase::new(storage, core::mem::size_of::<T>(), capacity),
            _marker: PhantomData,
        }
    }

    /// Builds a queue over caller-provided slot storage; the buffer is
    /// released by the caller, not the queue.
    pub fn from_storage(storage: &'static mut [MaybeUninit<T>]) -> Result<Self, Error> {
        let capacity = storage.len();
        if capacity == 0 {
            return Err(code::EINVAL);
        }
        let layout = Layout::for_value(storage);
        // SAFETY: the 'static borrow is exclusive, properly aligned for T
        // and outlives the queue.
        let storage = unsafe {
            QueueStorage::from_raw(
                NonNull::new_unchecked(storage.as_mut_ptr().cast::<u8>()),
                layout,
            )
        };
        Ok(Self::with_storage(storage, capacity))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    /// Pushes by move, blocking while the queue is full.
    pub fn push(&self, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreWait, value)
    }

    pub fn try_push(&self, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWait, value)
    }

    pub fn try_push_for(&self, duration: TickDuration, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitFor { duration }, value)
    }

    pub fn try_push_until(&self, deadline: TickInstant, value: T) -> Result<(), Error> {
        self.push_internal(&SemaphoreTryWaitUntil { deadline }, value)
    }

    /// Pushes a clone of `value`, blocking while the queue is full.
    pub fn push_cloned(&self, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreWait, value)
    }

    pub fn try_push_cloned(&self, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWait, value)
    }

    pub fn try_push_cloned_for(&self, duration: TickDuration, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWaitFor { duration }, value)
    }

    pub fn try_push_cloned_until(&self, deadline: TickInstant, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.push_cloned_internal(&SemaphoreTryWaitUntil { deadline }, value)
    }

    /// Constructs the element directly in the slot from `ctor`; no move or
    /// clone of a finished element takes place.
    pub fn emplace<F: FnOnce() -> T>(&self, ctor: F) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreWait, ctor)
    }

    pub fn try_emplace<F: FnOnce() -> T>(&self, ctor: F) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWait, ctor)
    }

    pub fn try_emplace_for<F: FnOnce() -> T>(
        &self,
        duration: TickDuration,
        ctor: F,
    ) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWaitFor { duration }, ctor)
    }

    pub fn try_emplace_until<F: FnOnce() -> T>(
        &self,
        deadline: TickInstant,
        ctor: F,
    ) -> Result<(), Error> {
        self.emplace_internal(&SemaphoreTryWaitUntil { deadline }, ctor)
    }

    /// Pops the oldest element: its value is swapped into `value` and the
    /// previous contents of `value` are destroyed.
    pub fn pop(&self, value: &mut T) -> Result<(), Error> {
        self.pop_internal(&SemaphoreWait, value)
    }

    pub fn try_pop(&self, value: &mut T) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWait, value)
    }

    pub fn try_pop_for(&self, duration: TickDuration, value: &mut T) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWaitFor { duration }, value)
    }

    pub fn try_pop_until(&self, deadline: TickInstant, value: &mut T) -> Result<(), Error> {
        self.pop_internal(&SemaphoreTryWaitUntil { deadline }, value)
    }

    fn push_internal(&self, wait: &dyn SemaphoreFunctor, value: T) -> Result<(), Error> {
        let mut functor = MoveConstruct::new(value);
        self.base.push(wait, &mut functor)
    }

    fn push_cloned_internal(&self, wait: &dyn SemaphoreFunctor, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        let mut functor = CopyConstruct { value };
        self.base.push(wait, &mut functor)
    }

    fn emplace_internal<F: FnOnce() -> T>(
        &self,
        wait: &dyn SemaphoreFunctor,
        ctor: F,
    ) -> Result<(), Error> {
        let mut functor = EmplaceConstruct::new(ctor);
        self.base.push(wait, &mut functor)
    }

    fn pop_internal(&self, wait: &dyn SemaphoreFunctor, value: &mut T) -> Result<(), Error> {
        let mut functor = SwapPop { value };
        self.base.pop(wait, &mut functor)
    }
}

impl<T> Drop for FifoQueue<T> {
    /// Destroys every element still in the queue, in place.
    fn drop(&mut self) {
        let mut functor = DropPop::<T>::new();
        while self.base.pop(&SemaphoreTryWait, &mut functor).is_ok() {}
    }
}
